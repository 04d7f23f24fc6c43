//! Modifier sources: natal-chart lookup or a fixed configured value.

use crate::domain::modifier::Modifier;
use crate::domain::natal_chart::NatalChart;
use crate::ports::modifier_port::ModifierPort;

impl ModifierPort for NatalChart {
    fn modifier(&self) -> Modifier {
        NatalChart::modifier(self)
    }

    fn birth_year(&self) -> Option<i32> {
        Some(self.birth_year)
    }
}

/// A modifier supplied directly, bypassing the natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedModifier(pub Modifier);

impl ModifierPort for FixedModifier {
    fn modifier(&self) -> Modifier {
        self.0
    }
}
