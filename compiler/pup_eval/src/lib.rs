//! Pup Eval - dispatch and evaluation context for the Pup evaluation core.
//!
//! # Architecture
//!
//! - [`EvaluationContext`]: arena of named scopes plus the active scope stack
//! - [`Dispatcher`]: one ordered [`Descriptor`] per operator and function;
//!   the first entry whose patterns admit the operands wins
//! - operator and function handlers, registered by [`Dispatcher::builtin`]
//! - [`Evaluator`]: the facade the tree walker drives, reporting failures
//!   into a [`pup_diagnostic::DiagnosticQueue`]
//!
//! # Re-exports
//!
//! Value and type definitions live in `pup_runtime` and are re-exported here
//! for convenience: `Value`, `Type`, `EvalError`, `EvalResult`.

mod context;
pub mod dispatch;
mod evaluator;
mod functions;
mod operators;

use std::sync::Once;

pub use context::{EvaluationContext, Scope, ScopeError, ScopeId, ScopedContext, ROOT_SCOPE};
pub use dispatch::{
    BinaryCall, BinaryHandler, Block, Descriptor, Dispatcher, FnBlock, FunctionCall,
    FunctionHandler, Operand,
};
pub use evaluator::{Evaluator, EvaluatorBuilder};

pub use pup_ir::{BinaryOp, Span};
pub use pup_runtime::{EvalError, EvalErrorKind, EvalResult, RecursionGuard, Type, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=pup_eval=debug` for scope and dispatch events or
/// `RUST_LOG=pup_eval=trace` to also see every descriptor entry scanned.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
