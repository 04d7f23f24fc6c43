//! Report data shaping: what the report adapters need from a run.

use chrono::NaiveDate;

use super::backtest::{AnnotatedDay, BacktestResult};
use super::modifier::Modifier;
use super::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub symbol: String,
    /// Set when the modifier came from a natal chart.
    pub birth_year: Option<i32>,
    pub modifier: Modifier,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub result: BacktestResult,
}

impl ReportData {
    pub fn title(&self) -> String {
        let source = match self.birth_year {
            Some(year) => format!("BirthYear={year}"),
            None => format!("Modifier={}", self.modifier),
        };
        format!(
            "{} Star Strategy ({}, ROI: {:.2}%)",
            self.symbol, source, self.result.roi
        )
    }

    pub fn points(&self, signal: Signal) -> impl Iterator<Item = &AnnotatedDay> {
        self.result.series.iter().filter(move |d| d.signal == signal)
    }

    pub fn buy_points(&self) -> Vec<(NaiveDate, f64)> {
        self.points(Signal::Buy).map(|d| (d.date, d.close)).collect()
    }

    pub fn sell_points(&self) -> Vec<(NaiveDate, f64)> {
        self.points(Signal::Sell).map(|d| (d.date, d.close)).collect()
    }
}
