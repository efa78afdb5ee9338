//! Error codes for evaluation diagnostics.
//!
//! One code per evaluation error kind, in the E6xxx range.

use std::fmt;

/// Error codes for all evaluation diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// No dispatch entry matches the operand types
    E6001,
    /// Integer or float overflow/underflow
    E6002,
    /// Wrong argument count or block parameter count
    E6003,
    /// Malformed regular expression
    E6004,
    /// Scope registered twice
    E6005,
    /// Reference to an unregistered scope
    E6006,
    /// Attempt to pop the root scope
    E6007,
    /// Variable assigned twice in one scope
    E6008,
    /// Call to a function or operator with no registered descriptor
    E6009,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
    ];

    /// The code as it appears in output, e.g. `"E6001"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
        }
    }

    /// One-line description used by `--explain`-style tooling.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E6001 => "operand types do not match any accepted signature",
            ErrorCode::E6002 => "arithmetic overflow or underflow",
            ErrorCode::E6003 => "wrong number of arguments or block parameters",
            ErrorCode::E6004 => "invalid regular expression",
            ErrorCode::E6005 => "scope already exists",
            ErrorCode::E6006 => "unknown scope",
            ErrorCode::E6007 => "cannot pop the root scope",
            ErrorCode::E6008 => "variable already assigned in this scope",
            ErrorCode::E6009 => "unknown function or operator",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
