//! Conversion of evaluation errors into diagnostics (E6xxx codes).

use pup_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind};

impl EvalErrorKind {
    /// Map this error kind to its `ErrorCode`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ErrorCode::E6001,
            Self::Arithmetic { .. } => ErrorCode::E6002,
            Self::Arity { .. } => ErrorCode::E6003,
            Self::Syntax { .. } => ErrorCode::E6004,
            Self::DuplicateScope { .. } => ErrorCode::E6005,
            Self::UnknownScope { .. } => ErrorCode::E6006,
            Self::RootScopePop => ErrorCode::E6007,
            Self::Reassignment { .. } => ErrorCode::E6008,
            Self::UnknownCallable { .. } => ErrorCode::E6009,
        }
    }

    /// Short label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "unexpected type",
            Self::Arithmetic { .. } => "arithmetic out of range",
            Self::Arity { .. } => "wrong arity",
            Self::Syntax { .. } => "invalid pattern",
            Self::DuplicateScope { .. } => "scope redefined here",
            Self::UnknownScope { .. } => "unknown scope",
            Self::RootScopePop => "root scope",
            Self::Reassignment { .. } => "reassigned here",
            Self::UnknownCallable { .. } => "not defined",
        }
    }
}

impl EvalError {
    /// Convert to a diagnostic for the sink.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code()).with_message(&self.message);
        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.primary_label());
        }
        if let EvalErrorKind::Syntax { reason, .. } = &self.kind {
            diag = diag.with_note(reason.clone());
        }
        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }
        diag
    }
}
