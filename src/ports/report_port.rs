//! Report generation port trait.

use std::path::Path;

use crate::domain::error::StartraderError;
use crate::domain::report::ReportData;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(&self, report: &ReportData, output_path: &Path) -> Result<(), StartraderError>;
}
