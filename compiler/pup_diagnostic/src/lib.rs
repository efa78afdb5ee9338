//! Diagnostic system for evaluation errors.
//!
//! The evaluation core does not print anything. Failures become
//! [`Diagnostic`]s carrying an [`ErrorCode`], a message and the caller's
//! span, and are collected in a [`DiagnosticQueue`] (the sink the
//! surrounding compiler drains and renders).

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
