//! Iterator values.

use std::fmt;

use super::Value;
use crate::types::Type;

/// A lazily enumerated view over an enumerable source value.
///
/// Enumerating an iterator enumerates its source; `element` is the type of
/// what that enumeration produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IteratorValue {
    pub source: Value,
    pub element: Type,
}

impl fmt::Display for IteratorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iterator[{}]-Value", self.element)
    }
}
