//! INI file configuration adapter.

use crate::domain::error::StartraderError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StartraderError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| StartraderError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, StartraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| StartraderError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, StartraderError> {
        self.config
            .getint(section, key)
            .map_err(|reason| StartraderError::config_invalid(section, key, reason))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, StartraderError> {
        self.config
            .getfloat(section, key)
            .map_err(|reason| StartraderError::config_invalid(section, key, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[backtest]
symbol = 600036.SH
starting_cash = 25000.5
start_date = 2024-01-01
end_date = 2024-12-31

[strategy]
birth_year = 1992
modifier = Prosperity

[data]
path = /var/data/daily
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "symbol"),
            Some("600036.SH".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("/var/data/daily".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "modifier"),
            Some("Prosperity".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("report", "chart_path"), None);
    }

    #[test]
    fn get_int_parses_or_rejects() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("strategy", "birth_year").unwrap(), Some(1992));
        assert_eq!(adapter.get_int("strategy", "missing").unwrap(), None);
        let err = adapter.get_int("backtest", "symbol").unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "symbol"));
    }

    #[test]
    fn get_double_parses_or_rejects() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_double("backtest", "starting_cash").unwrap(),
            Some(25000.5)
        );
        assert_eq!(adapter.get_double("backtest", "missing").unwrap(), None);
        let err = adapter.get_double("backtest", "symbol").unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { section, .. } if section == "backtest"));
    }

    #[test]
    fn get_date_parses_iso_dates() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_date("backtest", "start_date").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(adapter.get_date("backtest", "missing").unwrap(), None);
        let err = adapter.get_date("backtest", "symbol").unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "symbol"));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[report]\nchart_path = out/chart.svg\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "chart_path"),
            Some("out/chart.svg".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/startrader.ini").unwrap_err();
        assert!(
            matches!(err, StartraderError::ConfigParse { file, .. } if file.contains("startrader.ini"))
        );
    }
}
