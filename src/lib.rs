//! Feecalc - pro-rated annualized fee calculator
//!
//! This library parses and validates fee requests, computes the fee over a
//! billing window, formats the two UDA upload rows and keeps a per-session
//! ledger of retained fees.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod export;
pub mod ledger;
pub mod session;
pub mod ui;
pub mod utils;
