//! The evaluation facade driven by the tree walker.
//!
//! `Evaluator` owns the scope arena and a diagnostic queue, and borrows the
//! shared dispatch table unless given its own. Operator and function calls
//! return their errors; the walker decides which to [`report`](Evaluator::report).

mod builder;

pub use builder::EvaluatorBuilder;

use std::borrow::Cow;

use pup_diagnostic::{Diagnostic, DiagnosticQueue};
use pup_ir::{BinaryOp, Span};
use pup_runtime::{EvalError, EvalResult, RecursionGuard, Type, Value};
use tracing::debug;

use crate::context::EvaluationContext;
use crate::dispatch::{Block, Dispatcher, Operand};

pub struct Evaluator {
    context: EvaluationContext,
    dispatcher: Cow<'static, Dispatcher>,
    diagnostics: DiagnosticQueue,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// An evaluator over the built-in operators and functions.
    pub fn new() -> Self {
        EvaluatorBuilder::new().build()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EvaluationContext {
        &mut self.context
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Evaluate `left op right`.
    #[tracing::instrument(level = "debug", skip(self, left, right))]
    pub fn evaluate_binary(&mut self, op: BinaryOp, left: Operand, right: Operand) -> EvalResult {
        self.dispatcher
            .dispatch_binary(op, left, right, &mut self.context)
    }

    /// Call function `name`; `span` covers the whole call expression.
    #[tracing::instrument(level = "debug", skip(self, arguments, block))]
    pub fn call_function(
        &mut self,
        name: &str,
        arguments: Vec<Operand>,
        block: Option<&mut dyn Block>,
        span: Span,
    ) -> EvalResult {
        self.dispatcher
            .dispatch_function(name, arguments, block, span, &mut self.context)
    }

    /// Whether `value` is an instance of `ty`, with a fresh recursion guard.
    pub fn is_instance(&self, ty: &Type, value: &Value) -> bool {
        ty.is_instance(value, &mut RecursionGuard::new())
    }

    /// Queue `error` as a diagnostic. Returns `false` once the error limit
    /// has been reached and the diagnostic was dropped.
    pub fn report(&mut self, error: &EvalError) -> bool {
        debug!(kind = ?error.kind, span = ?error.span, "report");
        self.diagnostics.add(error.to_diagnostic())
    }

    /// Unwrap `result`, reporting the error and yielding `None` on failure.
    pub fn reported(&mut self, result: EvalResult) -> Option<Value> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(&error);
                None
            }
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Drain queued diagnostics, sorted by position.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.flush()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

#[cfg(test)]
mod tests;
