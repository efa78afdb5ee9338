//! Binary operator names.

use std::fmt;

/// A binary operator as named by the syntax tree.
///
/// Each operator owns one dispatch descriptor in the evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Minus,

    // Comparison
    Equals,
    NotEquals,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Pattern matching
    Match,
    NotMatch,

    // Membership
    In,
}

impl BinaryOp {
    /// Every operator, in declaration order.
    pub const ALL: [BinaryOp; 10] = [
        BinaryOp::Minus,
        BinaryOp::Equals,
        BinaryOp::NotEquals,
        BinaryOp::Less,
        BinaryOp::LessEqual,
        BinaryOp::Greater,
        BinaryOp::GreaterEqual,
        BinaryOp::Match,
        BinaryOp::NotMatch,
        BinaryOp::In,
    ];

    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Match => "=~",
            Self::NotMatch => "!~",
            Self::In => "in",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
