//! Built-in functions taking a block: `each` and `reduce`.
//!
//! Both walk their argument with [`enumerate`]. Every block invocation runs
//! in a fresh local scope, popped again whether the block succeeds or not.

mod each;
mod reduce;

use pup_ir::Span;
use pup_runtime::{
    dispatch_mismatch, not_enumerable, wrong_argument_count, EvalError, EvalResult, Type,
    Unwrapped, Value,
};

use crate::context::EvaluationContext;
use crate::dispatch::{require_block, Block, Dispatcher, FunctionCall};

/// Register every built-in function.
pub(crate) fn register(dispatcher: &mut Dispatcher) {
    dispatcher.register_function(each::descriptor());
    dispatcher.register_function(reduce::descriptor());
}

/// Argument kinds that [`enumerate`] accepts, in dispatch order.
fn enumerable_patterns() -> [Type; 6] {
    [
        Type::string(),
        Type::integer(),
        Type::array(Type::Any),
        Type::hash(Type::Any, Type::Any),
        Type::iterator(None),
        Type::type_of(Some(Type::integer())),
    ]
}

/// Catch-all entry registered after the enumerable patterns.
///
/// The block is validated before the argument, so a missing block or a
/// wrong parameter count is what gets reported. Otherwise the argument is
/// rejected the way dispatch would reject it. Extra operands beyond the
/// first are rendered as `Any`.
fn reject_argument(call: FunctionCall<'_>, parameters: &[usize]) -> EvalResult {
    let FunctionCall {
        name,
        arguments,
        span,
        block,
        ..
    } = call;
    require_block(name, span, block, parameters)?;
    let Some(first) = arguments.first() else {
        return Err(wrong_argument_count(name, "1", 0).with_span(span));
    };
    let rest = arguments.len() - 1;
    let tuple = |head: String, tail: &[String]| {
        if tail.is_empty() {
            head
        } else {
            format!("({head}, {})", tail.join(", "))
        }
    };
    let any = vec![Type::Any.to_string(); rest];
    let expected: Vec<String> = enumerable_patterns()
        .iter()
        .map(|pattern| tuple(pattern.to_string(), &any))
        .collect();
    let others: Vec<String> = arguments
        .iter()
        .skip(1)
        .map(|operand| operand.value.type_name().to_string())
        .collect();
    let found = tuple(first.value.type_name().to_string(), &others);
    Err(dispatch_mismatch(name, &expected, &found).with_span(first.span))
}

/// One step of an enumeration.
#[derive(Clone, Debug, PartialEq)]
enum Element {
    /// Position and value (strings, integers, arrays, ranges).
    Indexed(i64, Value),
    /// Key and value of a hash entry.
    Entry(Value, Value),
}

impl Element {
    /// Block arguments for a block declaring `parameters` parameters.
    fn into_arguments(self, parameters: usize) -> Vec<Value> {
        match (self, parameters) {
            (Element::Indexed(_, value), 1) => vec![value],
            (Element::Indexed(index, value), _) => vec![Value::int(index), value],
            (Element::Entry(key, value), 1) => vec![Value::array(vec![key, value])],
            (Element::Entry(key, value), _) => vec![key, value],
        }
    }

    /// The element as one value: hash entries become `[key, value]`.
    fn into_value(self) -> Value {
        match self {
            Element::Indexed(_, value) => value,
            Element::Entry(key, value) => Value::array(vec![key, value]),
        }
    }
}

fn position(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// Visit every element of `value` in order.
///
/// Strings yield characters, an integer `n` yields `0..n`, arrays their
/// elements and hashes their entries in insertion order. An iterator yields
/// its source's elements. A type value is unwrapped once: a bounded
/// `Integer[from, to]` yields `from..to` (upper bound excluded); an open
/// bound is an error at `span`.
fn enumerate<F>(value: &Value, span: Span, visit: &mut F) -> Result<(), EvalError>
where
    F: FnMut(Element) -> Result<(), EvalError>,
{
    match value.dereference() {
        Unwrapped::Type(ty) => enumerate_type(ty, span, visit),
        Unwrapped::Value(Value::String(text)) => text
            .chars()
            .enumerate()
            .try_for_each(|(i, c)| visit(Element::Indexed(position(i), Value::string(c)))),
        Unwrapped::Value(Value::Integer(count)) => {
            (0..*count).try_for_each(|i| visit(Element::Indexed(i, Value::int(i))))
        }
        Unwrapped::Value(Value::Array(items)) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| visit(Element::Indexed(position(i), item.clone()))),
        Unwrapped::Value(Value::Hash(map)) => map
            .iter()
            .try_for_each(|(key, value)| visit(Element::Entry(key.clone(), value.clone()))),
        Unwrapped::Value(Value::Iterator(iterator)) => enumerate(&iterator.source, span, visit),
        Unwrapped::Value(other) => Err(pup_runtime::type_mismatch(
            "an enumerable value",
            other.type_name(),
            "",
        )
        .with_span(span)),
    }
}

fn enumerate_type<F>(ty: &Type, span: Span, visit: &mut F) -> Result<(), EvalError>
where
    F: FnMut(Element) -> Result<(), EvalError>,
{
    let Some((from, to)) = ty.enumerable_range() else {
        return Err(not_enumerable(&ty.to_string()).with_span(span));
    };
    (from..to)
        .enumerate()
        .try_for_each(|(i, n)| visit(Element::Indexed(position(i), Value::int(n))))
}

/// Call `block` inside a fresh local scope.
fn invoke(
    block: &mut dyn Block,
    context: &mut EvaluationContext,
    arguments: Vec<Value>,
) -> EvalResult {
    let mut scoped = context.scoped_local();
    block.call(&mut scoped, arguments)
}

#[cfg(test)]
mod tests;
