//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod fallback_adapter;
pub mod file_config_adapter;
pub mod modifier_adapter;
pub mod svg_report_adapter;
