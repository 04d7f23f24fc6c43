//! Configuration access port trait.
//!
//! Typed getters return `Ok(None)` for an absent key and
//! [`StartraderError::ConfigInvalid`] for a value that does not parse, so a
//! typo never turns into a default.

use chrono::NaiveDate;

use crate::domain::error::StartraderError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, StartraderError>;
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, StartraderError>;

    /// `YYYY-MM-DD` value.
    fn get_date(&self, section: &str, key: &str) -> Result<Option<NaiveDate>, StartraderError> {
        let Some(raw) = self.get_string(section, key) else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                StartraderError::config_invalid(
                    section,
                    key,
                    format!("'{}' is not a date (expected YYYY-MM-DD)", raw.trim()),
                )
            })
    }
}
