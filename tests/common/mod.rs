#![allow(dead_code)]

use chrono::NaiveDate;
use startrader::domain::error::StartraderError;
use startrader::domain::modifier::Modifier;
pub use startrader::domain::trading_day::TradingDay;
use startrader::ports::data_port::DataPort;
use startrader::ports::modifier_port::ModifierPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<TradingDay>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_days(mut self, symbol: &str, days: Vec<TradingDay>) -> Self {
        self.data.insert(symbol.to_string(), days);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingDay>, StartraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StartraderError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(symbol)
            .map(|days| {
                days.iter()
                    .filter(|d| d.date >= start && d.date <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub struct StaticModifier(pub Modifier);

impl ModifierPort for StaticModifier {
    fn modifier(&self) -> Modifier {
        self.0
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_day(date_str: &str, open: f64, close: f64) -> TradingDay {
    TradingDay::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open,
        close,
    )
}

/// Consecutive calendar days with a linear price drift.
pub fn generate_days(start_date: &str, count: usize, start_price: f64, step: f64) -> Vec<TradingDay> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let open = start_price + i as f64 * step;
            TradingDay::new(start + chrono::Duration::days(i as i64), open, open + step / 2.0)
        })
        .collect()
}

pub fn days_to_csv(days: &[TradingDay]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for d in days {
        out.push_str(&format!(
            "{},{},{},{},{},1000\n",
            d.date.format("%Y-%m-%d"),
            d.open,
            d.open.max(d.close),
            d.open.min(d.close),
            d.close
        ));
    }
    out
}
