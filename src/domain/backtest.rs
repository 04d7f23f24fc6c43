//! Backtest simulator: walks trading days in order and fills signals at the
//! open.
//!
//! Every fill executes at the day's open price. A position still open after
//! the last day is liquidated at that day's open as well, not its close.

use chrono::NaiveDate;

use super::error::InputError;
use super::portfolio::{Fill, FillKind, Portfolio};
use super::signal::Signal;
use super::trading_day::{validate_series, TradingDay};

pub const DEFAULT_STARTING_CASH: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub starting_cash: f64,
}

/// One day of the series handed to report adapters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotatedDay {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub starting_cash: f64,
    pub final_cash: f64,
    /// Percentage, signed.
    pub roi: f64,
    pub series: Vec<AnnotatedDay>,
    pub fills: Vec<Fill>,
}

impl BacktestResult {
    pub fn signal_count(&self, signal: Signal) -> usize {
        self.series.iter().filter(|d| d.signal == signal).count()
    }
}

pub fn roi_pct(starting_cash: f64, final_cash: f64) -> f64 {
    (final_cash - starting_cash) / starting_cash * 100.0
}

/// Simulate `signals` over `days` starting from `starting_cash`.
///
/// Input is validated up front; on error nothing is simulated.
pub fn run_backtest(
    days: &[TradingDay],
    signals: &[Signal],
    starting_cash: f64,
) -> Result<BacktestResult, InputError> {
    validate_series(days)?;
    if days.len() != signals.len() {
        return Err(InputError::LengthMismatch {
            days: days.len(),
            signals: signals.len(),
        });
    }
    if !(starting_cash.is_finite() && starting_cash > 0.0) {
        return Err(InputError::NonPositiveCash {
            cash: starting_cash,
        });
    }

    let mut portfolio = Portfolio::new(starting_cash);
    let mut fills = Vec::new();

    for (day, &signal) in days.iter().zip(signals) {
        match signal {
            Signal::Buy if !portfolio.is_holding() => match portfolio.buy_all(day.open) {
                Some(shares) => {
                    tracing::debug!(date = %day.date, shares, price = day.open, "buy");
                    fills.push(fill(day.date, FillKind::Buy, shares, day.open, &portfolio));
                }
                None => {
                    tracing::debug!(
                        date = %day.date,
                        cash = portfolio.cash(),
                        price = day.open,
                        "insufficient cash for one share, staying flat"
                    );
                }
            },
            Signal::Sell => {
                if let Some(shares) = portfolio.sell_all(day.open) {
                    tracing::debug!(date = %day.date, shares, price = day.open, "sell");
                    fills.push(fill(day.date, FillKind::Sell, shares, day.open, &portfolio));
                }
            }
            _ => {}
        }
    }

    // validate_series guarantees at least one day
    let last = days[days.len() - 1];
    if let Some(shares) = portfolio.sell_all(last.open) {
        tracing::debug!(date = %last.date, shares, price = last.open, "liquidate");
        fills.push(fill(last.date, FillKind::Liquidation, shares, last.open, &portfolio));
    }

    let final_cash = portfolio.cash();
    let series = days
        .iter()
        .zip(signals)
        .map(|(day, &signal)| AnnotatedDay {
            date: day.date,
            close: day.close,
            signal,
        })
        .collect();

    Ok(BacktestResult {
        starting_cash,
        final_cash,
        roi: roi_pct(starting_cash, final_cash),
        series,
        fills,
    })
}

fn fill(date: NaiveDate, kind: FillKind, shares: u64, price: f64, portfolio: &Portfolio) -> Fill {
    Fill {
        date,
        kind,
        shares,
        price,
        cash_after: portfolio.cash(),
    }
}
