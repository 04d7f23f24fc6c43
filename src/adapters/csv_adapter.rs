//! CSV file data adapter.
//!
//! Reads `<base_path>/<symbol>.csv`. Columns are located by header name so
//! exports with extra columns (high, low, volume, ...) load unchanged.

use crate::domain::error::StartraderError;
use crate::domain::trading_day::TradingDay;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const DATE_HEADERS: [&str; 2] = ["date", "trade_date"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct Columns {
    date: usize,
    open: usize,
    close: usize,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Symbols with a CSV file under the base path, sorted.
    pub fn list_symbols(&self) -> Result<Vec<String>, StartraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StartraderError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StartraderError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns, StartraderError> {
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
    };
    let missing = |name: &str| StartraderError::DataSource {
        reason: format!("missing {} column", name),
    };

    Ok(Columns {
        date: find(&DATE_HEADERS).ok_or_else(|| missing("date"))?,
        open: find(&["open"]).ok_or_else(|| missing("open"))?,
        close: find(&["close"]).ok_or_else(|| missing("close"))?,
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, StartraderError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| StartraderError::DataSource {
            reason: format!("invalid date '{}'", value),
        })
}

fn parse_price(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, StartraderError> {
    record
        .get(index)
        .ok_or_else(|| StartraderError::DataSource {
            reason: format!("missing {} value", name),
        })?
        .trim()
        .parse()
        .map_err(|e| StartraderError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_daily_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TradingDay>, StartraderError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StartraderError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| StartraderError::DataSource {
            reason: format!("CSV header error: {}", e),
        })?;
        let columns = locate_columns(headers)?;

        let mut days = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| StartraderError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record
                .get(columns.date)
                .ok_or_else(|| StartraderError::DataSource {
                    reason: "missing date value".into(),
                })?;
            let date = parse_date(date_str)?;

            if date < start || date > end {
                continue;
            }

            days.push(TradingDay {
                date,
                open: parse_price(&record, columns.open, "open")?,
                close: parse_price(&record, columns.close, "close")?,
            });
        }

        days.sort_by_key(|d| d.date);
        tracing::debug!(symbol, rows = days.len(), path = %path.display(), "loaded daily series");
        Ok(days)
    }
}
