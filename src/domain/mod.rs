//! Core domain types and logic.

pub mod trading_day;
pub mod modifier;
pub mod signal;
pub mod portfolio;
pub mod backtest;
pub mod natal_chart;
pub mod report;
pub mod config_validation;
pub mod error;
