//! Configuration layer
//!
//! Settings that change calculation results are explicit here instead of
//! being baked into the engine: the day-count inclusivity, the year length,
//! the accepted date pattern and the rate grammar.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info};

use crate::error::{FeeError, Result};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "FEECALC_CONFIG";

/// Day count used unless configured otherwise: both endpoints count.
pub const DEFAULT_DAY_COUNT: DayCountPolicy = DayCountPolicy::Inclusive;

/// Denominator used to annualize the rate.
pub const DAYS_IN_YEAR: u32 = 365;

/// Month/day/year, zero padding optional on input.
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Whether the billing window counts both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCountPolicy {
    /// `end - start + 1`: a bill dated on the period end is charged one day.
    Inclusive,
    /// `end - start`: the half-open interval.
    Exclusive,
}

/// Accepted grammar for the rate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePolicy {
    /// Digits with at most one dot. No sign, no exponent.
    Strict,
    /// Strict grammar with an optional leading `+` or `-`.
    Signed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    pub policy: RatePolicy,
    /// Largest accepted rate. `None` (`max = "none"` in TOML) disables the check.
    #[serde(with = "optional_rate")]
    pub max: Option<Decimal>,
}

/// Rate bound written as a decimal string, or `"none"`.
mod optional_rate {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, s: S) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&v.to_string()),
            None => s.serialize_str("none"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<Decimal>, D::Error> {
        let text = String::deserialize(d)?;
        let text = text.trim();
        if text.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        Decimal::from_str(text)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid rate bound '{}': {}", text, e)))
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            policy: RatePolicy::Strict,
            max: Some(Decimal::ONE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub day_count: DayCountPolicy,
    pub days_in_year: u32,
    pub date_format: String,
    pub rate: RateConfig,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            day_count: DEFAULT_DAY_COUNT,
            days_in_year: DAYS_IN_YEAR,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            rate: RateConfig::default(),
        }
    }
}

impl FeeConfig {
    /// Parse a TOML document and check the settings make sense.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, FeeError> {
        let config: FeeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), FeeError> {
        if self.days_in_year == 0 {
            return Err(FeeError::ConfigError(
                "days_in_year must be greater than zero".to_string(),
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(FeeError::ConfigError(
                "date_format must not be empty".to_string(),
            ));
        }
        if let Some(max) = self.rate.max {
            if max <= Decimal::ZERO {
                return Err(FeeError::ConfigError(format!(
                    "rate.max must be positive, got {}",
                    max
                )));
            }
        }
        Ok(())
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `FEECALC_CONFIG` is tried, then
    /// `<config_home>/feecalc/config.toml`; when neither is present the
    /// defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV_VAR)
                .map(PathBuf::from)
                .or_else(|| default_config_path().filter(|p| p.exists())),
        };

        let Some(path) = path else {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to load config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// `<config_home>/feecalc/config.toml`, if the platform has a config home.
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("feecalc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FeeConfig::default();
        assert_eq!(config.day_count, DayCountPolicy::Inclusive);
        assert_eq!(config.days_in_year, 365);
        assert_eq!(config.date_format, "%m/%d/%Y");
        assert_eq!(config.rate.policy, RatePolicy::Strict);
        assert_eq!(config.rate.max, Some(dec!(1)));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = FeeConfig::from_toml_str("day_count = \"exclusive\"\n").unwrap();
        assert_eq!(config.day_count, DayCountPolicy::Exclusive);
        assert_eq!(config.days_in_year, 365);
        assert_eq!(config.rate.policy, RatePolicy::Strict);
    }

    #[test]
    fn test_rate_section() {
        let config = FeeConfig::from_toml_str(
            "days_in_year = 360\n[rate]\npolicy = \"signed\"\nmax = \"0.5\"\n",
        )
        .unwrap();
        assert_eq!(config.days_in_year, 360);
        assert_eq!(config.rate.policy, RatePolicy::Signed);
        assert_eq!(config.rate.max, Some(dec!(0.5)));
    }

    #[test]
    fn test_rate_bound_can_be_disabled() {
        let config = FeeConfig::from_toml_str("[rate]\nmax = \"none\"\n").unwrap();
        assert_eq!(config.rate.max, None);

        let config = FeeConfig::from_toml_str("[rate]\npolicy = \"signed\"\n").unwrap();
        assert_eq!(config.rate.max, Some(dec!(1)));
    }

    #[test]
    fn test_bad_rate_bound_rejected() {
        assert!(FeeConfig::from_toml_str("[rate]\nmax = \"lots\"\n").is_err());
        assert!(FeeConfig::from_toml_str("[rate]\nmax = \"-1\"\n").is_err());
    }

    #[test]
    fn test_zero_days_in_year_rejected() {
        let err = FeeConfig::from_toml_str("days_in_year = 0\n").unwrap_err();
        assert!(err.to_string().contains("days_in_year"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = FeeConfig::from_toml_str("day_count = \"both\"\n").unwrap_err();
        assert!(matches!(err, FeeError::ConfigParse(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "day_count = \"exclusive\"").unwrap();

        let config = FeeConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.day_count, DayCountPolicy::Exclusive);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = FeeConfig::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
