//! Date-based scoring and signal sequence construction.
//!
//! Scoring never looks at prices or portfolio state: the same
//! (date, modifier) pair always yields the same [`Signal`].

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::modifier::Modifier;
use super::trading_day::TradingDay;

const BUY_THRESHOLD: i32 = 2;
const SELL_THRESHOLD: i32 = -2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar component of the score.
///
/// Months 1/4/7/10 score +2 on even days, months 2/5/8/11 score -2 on days
/// divisible by 3, everything else scores 0.
pub fn base_score(date: NaiveDate) -> i32 {
    let day = date.day();
    match date.month() {
        1 | 4 | 7 | 10 if day % 2 == 0 => 2,
        2 | 5 | 8 | 11 if day % 3 == 0 => -2,
        _ => 0,
    }
}

pub fn total_score(date: NaiveDate, modifier: Modifier) -> i32 {
    base_score(date) + modifier.score()
}

pub fn score(date: NaiveDate, modifier: Modifier) -> Signal {
    classify(total_score(date, modifier))
}

fn classify(total: i32) -> Signal {
    if total >= BUY_THRESHOLD {
        Signal::Buy
    } else if total <= SELL_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// One signal per trading day, in the same order.
pub fn build_signals(days: &[TradingDay], modifier: Modifier) -> Vec<Signal> {
    days.iter().map(|d| score(d.date, modifier)).collect()
}
