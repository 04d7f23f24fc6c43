//! Daily price data port trait.

use crate::domain::error::StartraderError;
use crate::domain::trading_day::TradingDay;
use chrono::NaiveDate;

pub trait DataPort {
    /// Trading days for `symbol` within `[start, end]`, sorted by date.
    fn fetch_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingDay>, StartraderError>;
}
