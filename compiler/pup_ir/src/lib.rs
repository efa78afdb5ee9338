//! Pup IR - the few syntax-level atoms the evaluation core shares with the
//! external grammar layer.
//!
//! The syntax tree itself is owned by the parser and never reaches this
//! workspace as data. What does reach it:
//! - [`Span`]: the caller-supplied source position attached to every error
//! - [`BinaryOp`]: the operator a tree node names, used as a dispatch key

mod binary_op;
mod span;

pub use binary_op::BinaryOp;
pub use span::{Span, SpanError};
