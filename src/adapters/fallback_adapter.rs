//! Primary/fallback data source composition.

use crate::domain::error::StartraderError;
use crate::domain::trading_day::TradingDay;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

/// Serves the primary source's series, switching to the fallback when the
/// primary fails or has no rows in the window.
pub struct FallbackDataAdapter {
    primary: Box<dyn DataPort>,
    fallback: Box<dyn DataPort>,
}

impl FallbackDataAdapter {
    pub fn new(primary: Box<dyn DataPort>, fallback: Box<dyn DataPort>) -> Self {
        Self { primary, fallback }
    }
}

impl DataPort for FallbackDataAdapter {
    fn fetch_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingDay>, StartraderError> {
        match self.primary.fetch_daily_series(symbol, start, end) {
            Ok(days) if !days.is_empty() => Ok(days),
            Ok(_) => {
                tracing::warn!(symbol, "primary data source returned no rows, using fallback");
                self.fallback.fetch_daily_series(symbol, start, end)
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "primary data source failed, using fallback");
                self.fallback.fetch_daily_series(symbol, start, end)
            }
        }
    }
}
