//! Day counting over the billing window.

use chrono::{Datelike, NaiveDate};

use crate::config::DayCountPolicy;

/// Days charged between the bill date and the period end.
///
/// Never negative: a bill dated after the period end counts zero days.
pub fn days_remaining(bill_date: NaiveDate, period_end: NaiveDate, policy: DayCountPolicy) -> u32 {
    let mut days = (period_end - bill_date).num_days();
    if policy == DayCountPolicy::Inclusive {
        days += 1;
    }
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Last day of the calendar quarter containing `date`.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    let last_month = ((date.month() - 1) / 3 + 1) * 3;
    last_day_of_month(date.year(), last_month).unwrap_or(date)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt())
}
