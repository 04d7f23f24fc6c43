//! Annotated series export as CSV (`date,close,signal`).

use std::path::Path;

use serde::Serialize;

use crate::domain::error::StartraderError;
use crate::domain::report::ReportData;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct SeriesRow {
    date: String,
    close: f64,
    signal: &'static str,
}

pub struct CsvSeriesAdapter;

impl CsvSeriesAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvSeriesAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn report_err(path: &Path, e: impl std::fmt::Display) -> StartraderError {
    StartraderError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

impl ReportPort for CsvSeriesAdapter {
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), StartraderError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| report_err(output_path, e))?;
        for day in &report.result.series {
            writer
                .serialize(SeriesRow {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    close: day.close,
                    signal: day.signal.as_str(),
                })
                .map_err(|e| report_err(output_path, e))?;
        }
        writer.flush().map_err(|e| report_err(output_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{AnnotatedDay, BacktestResult};
    use crate::domain::modifier::Modifier;
    use crate::domain::signal::Signal;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report() -> ReportData {
        ReportData {
            symbol: "AAPL".into(),
            birth_year: None,
            modifier: Modifier::None,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 2, 28),
            result: BacktestResult {
                starting_cash: 100.0,
                final_cash: 120.0,
                roi: 20.0,
                series: vec![
                    AnnotatedDay {
                        date: date(2024, 1, 2),
                        close: 11.0,
                        signal: Signal::Buy,
                    },
                    AnnotatedDay {
                        date: date(2024, 2, 3),
                        close: 12.5,
                        signal: Signal::Sell,
                    },
                ],
                fills: Vec::new(),
            },
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("series.csv");
        CsvSeriesAdapter::new().write(&report(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "date,close,signal\n2024-01-02,11.0,buy\n2024-02-03,12.5,sell\n"
        );
    }

    #[test]
    fn unwritable_path_is_report_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("series.csv");
        let err = CsvSeriesAdapter::new().write(&report(), &path).unwrap_err();
        assert!(matches!(err, StartraderError::Report { .. }));
    }
}
