//! Domain error types.

use chrono::NaiveDate;

/// A violated precondition of the backtest input, reported before any
/// simulation state is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("trading day series is empty")]
    EmptySeries,

    #[error("series length mismatch: {days} trading days but {signals} signals")]
    LengthMismatch { days: usize, signals: usize },

    #[error("starting cash must be positive, got {cash}")]
    NonPositiveCash { cash: f64 },

    #[error("{field} price on {date} must be positive, got {value}")]
    NonPositivePrice {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    #[error("trading days out of order: {date} does not follow {previous}")]
    UnorderedDates { previous: NaiveDate, date: NaiveDate },

    #[error("unknown modifier '{value}' (expected prosperity, authority, status, taboo or none)")]
    UnknownModifier { value: String },
}

/// Top-level error type for startrader.
#[derive(Debug, thiserror::Error)]
pub enum StartraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StartraderError {
    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        StartraderError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            StartraderError::Io(_) => 1,
            StartraderError::ConfigParse { .. }
            | StartraderError::ConfigMissing { .. }
            | StartraderError::ConfigInvalid { .. } => 2,
            StartraderError::DataSource { .. } => 3,
            StartraderError::InvalidInput(_) => 4,
            StartraderError::NoData { .. } => 5,
            StartraderError::Report { .. } => 6,
        }
    }
}

impl From<&StartraderError> for std::process::ExitCode {
    fn from(err: &StartraderError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
