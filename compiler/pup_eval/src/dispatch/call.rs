//! What a handler sees: operands with their spans, the context, and for
//! functions the optional block.

use pup_ir::{BinaryOp, Span};
use pup_runtime::{block_parameter_mismatch, block_required, EvalError, EvalResult, Value};

use crate::context::EvaluationContext;

/// A value together with the span of the expression that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub value: Value,
    pub span: Span,
}

impl Operand {
    pub fn new(value: Value, span: Span) -> Self {
        Operand { value, span }
    }

    /// An operand with no source position (built-ins, tests).
    pub fn unspanned(value: Value) -> Self {
        Operand {
            value,
            span: Span::DUMMY,
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::unspanned(value)
    }
}

/// Call context for a binary operator handler.
pub struct BinaryCall<'a> {
    pub op: BinaryOp,
    pub left: Operand,
    pub right: Operand,
    pub context: &'a mut EvaluationContext,
}

impl BinaryCall<'_> {
    /// Span covering both operands.
    pub fn span(&self) -> Span {
        self.left.span.merge(self.right.span)
    }
}

/// Call context for a function handler.
pub struct FunctionCall<'a> {
    pub name: &'a str,
    pub arguments: Vec<Operand>,
    /// Span of the whole call expression.
    pub span: Span,
    pub block: Option<&'a mut dyn Block>,
    pub context: &'a mut EvaluationContext,
}

impl FunctionCall<'_> {
    /// Span of argument `index`, or of the call when there is no such
    /// argument.
    pub fn argument_span(&self, index: usize) -> Span {
        self.arguments.get(index).map_or(self.span, |arg| arg.span)
    }
}

/// A lambda passed to a function call.
///
/// Implemented by the tree walker; the core only knows how many parameters
/// the block declares and how to invoke it. Handlers call it inside a fresh
/// local scope, so a block may bind its parameters with [`crate::Scope::set`]
/// on every invocation.
pub trait Block {
    /// Number of declared parameters.
    fn parameter_count(&self) -> usize;

    /// Span of the block, for arity errors.
    fn span(&self) -> Span;

    fn call(&mut self, context: &mut EvaluationContext, arguments: Vec<Value>) -> EvalResult;
}

/// Adapts a closure into a [`Block`].
pub struct FnBlock<F> {
    parameters: usize,
    span: Span,
    body: F,
}

impl<F> FnBlock<F>
where
    F: FnMut(&mut EvaluationContext, Vec<Value>) -> EvalResult,
{
    pub fn new(parameters: usize, body: F) -> Self {
        FnBlock {
            parameters,
            span: Span::DUMMY,
            body,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl<F> Block for FnBlock<F>
where
    F: FnMut(&mut EvaluationContext, Vec<Value>) -> EvalResult,
{
    fn parameter_count(&self) -> usize {
        self.parameters
    }

    fn span(&self) -> Span {
        self.span
    }

    fn call(&mut self, context: &mut EvaluationContext, arguments: Vec<Value>) -> EvalResult {
        (self.body)(context, arguments)
    }
}

/// Require a block declaring one of the `accepted` parameter counts.
pub fn require_block<'b>(
    function: &str,
    span: Span,
    block: Option<&'b mut dyn Block>,
    accepted: &[usize],
) -> Result<&'b mut dyn Block, EvalError> {
    let Some(block) = block else {
        return Err(block_required(function).with_span(span));
    };
    let count = block.parameter_count();
    if accepted.contains(&count) {
        Ok(block)
    } else {
        let expected = super::join_alternatives(accepted.iter().map(ToString::to_string));
        Err(block_parameter_mismatch(function, &expected, count).with_span(block.span()))
    }
}
