//! Ordered-pattern multiple dispatch for operators and functions.
//!
//! Every operator and built-in function owns one [`Descriptor`]: an ordered
//! list of `(patterns, handler)` entries. A call is resolved by scanning the
//! entries against the concrete operand values; the first full match runs.
//! Nothing ranks entries by specificity, so a descriptor lists its narrow
//! signatures before its catch-alls.
//!
//! The built-in table is built once per process, see [`Dispatcher::shared`].

mod call;
mod descriptor;

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use tracing::debug;

use pup_ir::{BinaryOp, Span};
use pup_runtime::{unknown_callable, EvalResult};

use crate::context::EvaluationContext;

pub use call::{require_block, BinaryCall, Block, FnBlock, FunctionCall, Operand};
pub use descriptor::{Descriptor, DispatchError, Entry};

/// Handler for a binary operator.
pub type BinaryHandler = fn(BinaryCall<'_>) -> EvalResult;

/// Handler for a function.
pub type FunctionHandler = fn(FunctionCall<'_>) -> EvalResult;

/// Descriptor table for every operator and function.
#[derive(Clone, Default)]
pub struct Dispatcher {
    binary: FxHashMap<BinaryOp, Descriptor<BinaryHandler>>,
    functions: FxHashMap<String, Descriptor<FunctionHandler>>,
}

impl Dispatcher {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every built-in operator and function registered.
    pub fn builtin() -> Self {
        let mut dispatcher = Self::new();
        crate::operators::register(&mut dispatcher);
        crate::functions::register(&mut dispatcher);
        dispatcher
    }

    /// The process-wide built-in table, built on first use.
    pub fn shared() -> &'static Dispatcher {
        static SHARED: OnceLock<Dispatcher> = OnceLock::new();
        SHARED.get_or_init(Dispatcher::builtin)
    }

    /// Register (or replace) the descriptor for `op`.
    pub fn register_binary(&mut self, op: BinaryOp, descriptor: Descriptor<BinaryHandler>) {
        self.binary.insert(op, descriptor);
    }

    /// Register (or replace) a function descriptor under its name.
    pub fn register_function(&mut self, descriptor: Descriptor<FunctionHandler>) {
        self.functions
            .insert(descriptor.name().to_string(), descriptor);
    }

    pub fn binary(&self, op: BinaryOp) -> Option<&Descriptor<BinaryHandler>> {
        self.binary.get(&op)
    }

    pub fn function(&self, name: &str) -> Option<&Descriptor<FunctionHandler>> {
        self.functions.get(name)
    }

    /// Resolve and run the handler for `left op right`.
    pub fn dispatch_binary(
        &self,
        op: BinaryOp,
        left: Operand,
        right: Operand,
        context: &mut EvaluationContext,
    ) -> EvalResult {
        let span = left.span.merge(right.span);
        let Some(descriptor) = self.binary(op) else {
            return Err(unknown_callable(op.as_symbol()).with_span(span));
        };
        let operands = [left, right];
        let handler = match descriptor.resolve(&operands) {
            Ok(handler) => *handler,
            Err(err) => return Err(err.into_eval_error(descriptor.name(), &operands, span)),
        };
        debug!(
            %op,
            left = operands[0].value.type_name(),
            right = operands[1].value.type_name(),
            "dispatch binary"
        );
        let [left, right] = operands;
        handler(BinaryCall {
            op,
            left,
            right,
            context,
        })
    }

    /// Resolve and run the handler for function `name`.
    pub fn dispatch_function(
        &self,
        name: &str,
        arguments: Vec<Operand>,
        block: Option<&mut dyn Block>,
        span: Span,
        context: &mut EvaluationContext,
    ) -> EvalResult {
        let Some(descriptor) = self.function(name) else {
            return Err(unknown_callable(name).with_span(span));
        };
        let handler = match descriptor.resolve(&arguments) {
            Ok(handler) => *handler,
            Err(err) => return Err(err.into_eval_error(name, &arguments, span)),
        };
        debug!(
            function = name,
            arguments = arguments.len(),
            block = block.is_some(),
            "dispatch function"
        );
        handler(FunctionCall {
            name,
            arguments,
            span,
            // Shorten the trait object's lifetime to this call.
            block: block.map(|block| block as &mut dyn Block),
            context,
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operators: Vec<_> = self.binary.keys().map(|op| op.as_symbol()).collect();
        operators.sort_unstable();
        let mut functions: Vec<_> = self.functions.keys().map(String::as_str).collect();
        functions.sort_unstable();
        f.debug_struct("Dispatcher")
            .field("operators", &operators)
            .field("functions", &functions)
            .finish()
    }
}

/// `"1"`, `"1 or 2"`, `"1, 2 or 3"`.
pub(crate) fn join_alternatives(items: impl IntoIterator<Item = String>) -> String {
    let items: Vec<String> = items.into_iter().collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
    }
}
