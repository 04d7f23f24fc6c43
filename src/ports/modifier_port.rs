//! Source of the run-wide categorical modifier.

use crate::domain::modifier::Modifier;

pub trait ModifierPort {
    fn modifier(&self) -> Modifier;

    /// Birth year behind the modifier, when it was derived from one.
    fn birth_year(&self) -> Option<i32> {
        None
    }
}
