//! `EvaluatorBuilder` for creating Evaluator instances with custom tables,
//! a seeded context, or diagnostic limits.

use std::borrow::Cow;

use pup_diagnostic::{DiagnosticConfig, DiagnosticQueue};

use super::Evaluator;
use crate::context::EvaluationContext;
use crate::dispatch::Dispatcher;

/// Builder for [`Evaluator`].
#[derive(Debug, Default)]
pub struct EvaluatorBuilder {
    config: DiagnosticConfig,
    dispatcher: Option<Dispatcher>,
    context: Option<EvaluationContext>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits and deduplication for reported errors.
    #[must_use]
    pub fn diagnostic_config(mut self, config: DiagnosticConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an owned dispatch table instead of the shared built-in one.
    ///
    /// Start from [`Dispatcher::builtin`] to extend the built-ins.
    #[must_use]
    pub fn dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Start from an existing context, e.g. one with scopes already pushed.
    #[must_use]
    pub fn context(mut self, context: EvaluationContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn build(self) -> Evaluator {
        let dispatcher = self
            .dispatcher
            .map_or(Cow::Borrowed(Dispatcher::shared()), Cow::Owned);
        Evaluator {
            context: self.context.unwrap_or_default(),
            dispatcher,
            diagnostics: DiagnosticQueue::with_config(self.config),
        }
    }
}
