//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured data of each failure. Factory
//! functions (e.g. `arithmetic_overflow()`) are the public way to build an
//! `EvalError`; they fill in both `kind` and `message`. Callers attach the
//! source position with [`EvalError::with_span`].
//!
//! An undefined variable is not an error: lookups return `None`.

mod diagnostics;

use std::fmt;

use pup_ir::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Which way an arithmetic result left the representable range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticFault {
    Overflow,
    Underflow,
}

impl fmt::Display for ArithmeticFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticFault::Overflow => f.write_str("overflow"),
            ArithmeticFault::Underflow => f.write_str("underflow"),
        }
    }
}

/// What an arity error counted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AritySubject {
    Arguments,
    /// A block was required but none was passed.
    Block,
    BlockParameters,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A malformed regular expression.
    Syntax { pattern: String, reason: String },
    /// Operands or arguments of the wrong type.
    TypeMismatch {
        expected: String,
        found: String,
        /// Trailing qualifier for `expected`, e.g. `for '-'`.
        context: String,
    },
    Arithmetic {
        operation: String,
        left: String,
        right: String,
        fault: ArithmeticFault,
    },
    Arity {
        function: String,
        subject: AritySubject,
        expected: String,
        found: usize,
    },
    DuplicateScope { name: String },
    UnknownScope { name: String },
    RootScopePop,
    Reassignment { name: String },
    /// No descriptor is registered under this name.
    UnknownCallable { name: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { pattern, .. } => {
                write!(f, "invalid regular expression '{pattern}'")
            }
            Self::TypeMismatch {
                expected,
                found,
                context,
            } => {
                if context.is_empty() {
                    write!(f, "expected {expected} but found {found}")
                } else {
                    write!(f, "expected {expected} {context} but found {found}")
                }
            }
            Self::Arithmetic {
                operation,
                left,
                right,
                fault,
            } => write!(
                f,
                "{operation} of {left} and {right} results in an arithmetic {fault}"
            ),
            Self::Arity {
                function,
                subject,
                expected,
                found,
            } => {
                let verb = if *found == 1 { "was" } else { "were" };
                let plural = if expected == "1" { "" } else { "s" };
                match subject {
                    AritySubject::Arguments => write!(
                        f,
                        "expected {expected} argument{plural} to '{function}' function but {found} {verb} given"
                    ),
                    AritySubject::Block => {
                        write!(f, "expected a block to be passed to '{function}' function")
                    }
                    AritySubject::BlockParameters => write!(
                        f,
                        "expected {expected} block parameter{plural} for '{function}' function but {found} {verb} declared"
                    ),
                }
            }
            Self::DuplicateScope { name } => write!(f, "scope '{name}' already exists"),
            Self::UnknownScope { name } => write!(f, "unknown scope '{name}'"),
            Self::RootScopePop => write!(f, "cannot pop the root scope"),
            Self::Reassignment { name } => {
                write!(f, "cannot reassign variable '${name}'")
            }
            Self::UnknownCallable { name } => {
                write!(f, "unknown function or operator '{name}'")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message. Equals `kind.to_string()` unless a factory
    /// words it more specifically.
    pub message: String,
    /// Source position supplied by the caller.
    pub span: Option<Span>,
    /// Additional context lines.
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless the error already carries a more precise one.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Syntax

/// A pattern that failed to compile.
#[cold]
pub fn invalid_regex(pattern: &str, err: &regex::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    })
}

// Types

/// A single operand or argument of the wrong type.
#[cold]
pub fn type_mismatch(expected: &str, found: &str, context: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: found.to_string(),
        context: context.to_string(),
    })
}

/// No dispatch entry accepted the operand types.
///
/// `expected` lists each accepted pattern tuple in registration order.
#[cold]
pub fn dispatch_mismatch(name: &str, expected: &[String], found: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.join(" or "),
        found: found.to_string(),
        context: format!("for '{name}'"),
    })
}

/// An Integer range with an open bound cannot be enumerated.
#[cold]
pub fn not_enumerable(ty: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: "a bounded Integer range".to_string(),
        found: ty.to_string(),
        context: String::new(),
    })
    .with_message(format!(
        "cannot enumerate {ty}: 'from' or 'to' is a default value"
    ))
}

// Arithmetic

#[cold]
pub fn arithmetic_overflow(operation: &str, left: &Value, right: &Value) -> EvalError {
    arithmetic(operation, left, right, ArithmeticFault::Overflow)
}

#[cold]
pub fn arithmetic_underflow(operation: &str, left: &Value, right: &Value) -> EvalError {
    arithmetic(operation, left, right, ArithmeticFault::Underflow)
}

fn arithmetic(operation: &str, left: &Value, right: &Value, fault: ArithmeticFault) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arithmetic {
        operation: operation.to_string(),
        left: left.to_string(),
        right: right.to_string(),
        fault,
    })
}

// Arity

/// Wrong number of arguments. `expected` is a count or a list such as
/// `"1 or 2"`.
#[cold]
pub fn wrong_argument_count(function: &str, expected: &str, found: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arity {
        function: function.to_string(),
        subject: AritySubject::Arguments,
        expected: expected.to_string(),
        found,
    })
}

#[cold]
pub fn block_required(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arity {
        function: function.to_string(),
        subject: AritySubject::Block,
        expected: "1".to_string(),
        found: 0,
    })
}

#[cold]
pub fn block_parameter_mismatch(function: &str, expected: &str, found: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Arity {
        function: function.to_string(),
        subject: AritySubject::BlockParameters,
        expected: expected.to_string(),
        found,
    })
}

// Scopes

#[cold]
pub fn duplicate_scope(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateScope {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_scope(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownScope {
        name: name.to_string(),
    })
}

#[cold]
pub fn root_scope_pop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::RootScopePop)
}

#[cold]
pub fn reassignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Reassignment {
        name: name.to_string(),
    })
}

// Dispatch

#[cold]
pub fn unknown_callable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownCallable {
        name: name.to_string(),
    })
}
