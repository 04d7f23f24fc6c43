//! Port traits the domain talks through; adapters implement them.

pub mod config_port;
pub mod data_port;
pub mod modifier_port;
pub mod report_port;
