//! Categorical modifier applied uniformly to every day's score in a run.

use std::fmt;
use std::str::FromStr;

use super::error::InputError;

/// The finance star's transformation for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    /// 禄
    Prosperity,
    /// 权
    Authority,
    /// 科
    Status,
    /// 忌
    Taboo,
    #[default]
    None,
}

impl Modifier {
    pub const ALL: [Modifier; 5] = [
        Modifier::Prosperity,
        Modifier::Authority,
        Modifier::Status,
        Modifier::Taboo,
        Modifier::None,
    ];

    /// Score contribution added to every day's base score.
    pub fn score(self) -> i32 {
        match self {
            Modifier::Prosperity => 2,
            Modifier::Authority => 1,
            Modifier::Status => 0,
            Modifier::Taboo => -2,
            Modifier::None => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Prosperity => "prosperity",
            Modifier::Authority => "authority",
            Modifier::Status => "status",
            Modifier::Taboo => "taboo",
            Modifier::None => "none",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modifier {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Modifier::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownModifier {
                value: trimmed.to_string(),
            })
    }
}
