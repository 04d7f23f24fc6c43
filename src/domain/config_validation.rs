//! Configuration validation.
//!
//! Validates all config fields before a backtest runs.

use crate::domain::error::StartraderError;
use crate::domain::modifier::Modifier;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    validate_symbol(config)?;
    validate_starting_cash(config)?;
    validate_dates(config)?;
    validate_data_path(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    validate_birth_year(config)?;
    validate_modifier(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StartraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_starting_cash(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    match config.get_double("backtest", "starting_cash")? {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(StartraderError::config_invalid(
            "backtest",
            "starting_cash",
            "starting_cash must be positive",
        )),
        _ => Ok(()),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    let start = config.get_date("backtest", "start_date")?;
    let end = config.get_date("backtest", "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(StartraderError::config_invalid(
                "backtest",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(StartraderError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
    }
}

/// Birth year from `[strategy] birth_year`, `None` when unset.
pub fn birth_year(config: &dyn ConfigPort) -> Result<Option<i32>, StartraderError> {
    config
        .get_int("strategy", "birth_year")?
        .map(|year| {
            i32::try_from(year).map_err(|_| {
                StartraderError::config_invalid(
                    "strategy",
                    "birth_year",
                    format!("{year} is out of range"),
                )
            })
        })
        .transpose()
}

fn validate_birth_year(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    birth_year(config).map(|_| ())
}

fn validate_modifier(config: &dyn ConfigPort) -> Result<(), StartraderError> {
    match config.get_string("strategy", "modifier") {
        None => Ok(()),
        Some(s) => s
            .parse::<Modifier>()
            .map(|_| ())
            .map_err(|e| StartraderError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "modifier".to_string(),
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    const VALID: &str = r#"
[backtest]
symbol = 600036.SH
starting_cash = 10000
start_date = 2024-01-01
end_date = 2024-12-31

[strategy]
birth_year = 1990

[data]
path = ./data
"#;

    #[test]
    fn valid_config_passes() {
        let c = config(VALID);
        assert!(validate_backtest_config(&c).is_ok());
        assert!(validate_strategy_config(&c).is_ok());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let c = config("[backtest]\nsymbol = AAPL\n[data]\npath = d\n");
        assert!(validate_backtest_config(&c).is_ok());
        assert!(validate_strategy_config(&c).is_ok());
    }

    #[test]
    fn missing_symbol() {
        let c = config("[backtest]\n[data]\npath = d\n");
        let err = validate_backtest_config(&c).unwrap_err();
        assert!(matches!(err, StartraderError::ConfigMissing { key, .. } if key == "symbol"));
    }

    #[test]
    fn blank_symbol() {
        let c = config("[backtest]\nsymbol =   \n[data]\npath = d\n");
        assert!(validate_backtest_config(&c).is_err());
    }

    #[test]
    fn zero_starting_cash() {
        let c = config("[backtest]\nsymbol = A\nstarting_cash = 0\n[data]\npath = d\n");
        let err = validate_backtest_config(&c).unwrap_err();
        assert!(
            matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "starting_cash")
        );
    }

    #[test]
    fn non_numeric_starting_cash() {
        let c = config("[backtest]\nsymbol = A\nstarting_cash = lots\n[data]\npath = d\n");
        let err = validate_backtest_config(&c).unwrap_err();
        assert!(
            matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "starting_cash")
        );
    }

    #[test]
    fn bad_date_format() {
        let c = config("[backtest]\nsymbol = A\nstart_date = 2024/01/01\n[data]\npath = d\n");
        let err = validate_backtest_config(&c).unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn start_after_end() {
        let c = config(
            "[backtest]\nsymbol = A\nstart_date = 2024-06-01\nend_date = 2024-01-01\n[data]\npath = d\n",
        );
        assert!(validate_backtest_config(&c).is_err());
    }

    #[test]
    fn missing_data_path() {
        let c = config("[backtest]\nsymbol = A\n");
        let err = validate_backtest_config(&c).unwrap_err();
        assert!(matches!(err, StartraderError::ConfigMissing { section, .. } if section == "data"));
    }

    #[test]
    fn bad_birth_year() {
        let c = config("[strategy]\nbirth_year = nineteen\n");
        let err = validate_strategy_config(&c).unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { key, .. } if key == "birth_year"));
    }

    #[test]
    fn birth_year_out_of_range() {
        let c = config("[strategy]\nbirth_year = 99999999999\n");
        assert!(validate_strategy_config(&c).is_err());
    }

    #[test]
    fn birth_year_value() {
        assert_eq!(birth_year(&config("[strategy]\nbirth_year = 1991\n")).unwrap(), Some(1991));
        assert_eq!(birth_year(&config("[strategy]\n")).unwrap(), None);
    }

    #[test]
    fn unknown_modifier() {
        let c = config("[strategy]\nmodifier = luck\n");
        let err = validate_strategy_config(&c).unwrap_err();
        assert!(matches!(err, StartraderError::ConfigInvalid { ref key, .. } if key == "modifier"));
        assert!(err.to_string().contains("luck"));
    }

    #[test]
    fn known_modifier() {
        let c = config("[strategy]\nmodifier = Taboo\n");
        assert!(validate_strategy_config(&c).is_ok());
    }
}
