//! Daily price record and series validation.

use chrono::NaiveDate;

use super::error::InputError;

/// One trading day's open and close for the tracked instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradingDay {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
}

impl TradingDay {
    pub fn new(date: NaiveDate, open: f64, close: f64) -> Self {
        TradingDay { date, open, close }
    }

    /// Both prices finite and strictly positive.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in [("open", self.open), ("close", self.close)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(InputError::NonPositivePrice {
                    date: self.date,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Checks that `days` is non-empty, has valid prices and strictly increasing
/// dates.
pub fn validate_series(days: &[TradingDay]) -> Result<(), InputError> {
    if days.is_empty() {
        return Err(InputError::EmptySeries);
    }
    for day in days {
        day.validate()?;
    }
    for pair in days.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(InputError::UnorderedDates {
                previous: pair[0].date,
                date: pair[1].date,
            });
        }
    }
    Ok(())
}
