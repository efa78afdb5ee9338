//! Ordering operators (`<`, `<=`, `>`, `>=`).
//!
//! Numbers compare numerically, strings without regard to case, and types
//! by specialization: `A < B` when every `A` is a `B` but not the reverse.

use std::cmp::Ordering;

use pup_ir::BinaryOp;
use pup_runtime::{compare_strings, type_mismatch, EvalResult, RecursionGuard, Type, Value};

use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor};

pub(super) fn descriptor(op: BinaryOp) -> Descriptor<BinaryHandler> {
    let types = || Type::type_of(None);

    let mut descriptor = Descriptor::<BinaryHandler>::new(op.as_symbol());
    descriptor
        .add([Type::Numeric, Type::Numeric], compare_numbers)
        .add([Type::string(), Type::string()], compare_text)
        .add([types(), types()], compare_types)
        .add([Type::Numeric, Type::Any], expected_numeric)
        .add([Type::string(), Type::Any], expected_string)
        .add([types(), Type::Any], expected_type)
        .add([Type::Any, Type::Any], not_comparable);
    descriptor
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed integer/float comparison promotes to float"
)]
fn numeric_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        _ => None,
    }
}

/// Whether `ordering` satisfies `op`. Unordered (NaN) satisfies nothing.
fn holds(op: BinaryOp, ordering: Option<Ordering>) -> bool {
    ordering.is_some_and(|ordering| match op {
        BinaryOp::Less => ordering.is_lt(),
        BinaryOp::LessEqual => ordering.is_le(),
        BinaryOp::Greater => ordering.is_gt(),
        BinaryOp::GreaterEqual => ordering.is_ge(),
        _ => false,
    })
}

fn compare_numbers(call: BinaryCall<'_>) -> EvalResult {
    let ordering = numeric_ordering(&call.left.value, &call.right.value);
    Ok(Value::boolean(holds(call.op, ordering)))
}

fn compare_text(call: BinaryCall<'_>) -> EvalResult {
    let ordering = match (call.left.value.as_str(), call.right.value.as_str()) {
        (Some(left), Some(right)) => Some(compare_strings(left, right)),
        _ => None,
    };
    Ok(Value::boolean(holds(call.op, ordering)))
}

fn compare_types(call: BinaryCall<'_>) -> EvalResult {
    let (Some(left), Some(right)) = (call.left.value.as_type(), call.right.value.as_type()) else {
        return not_comparable(call);
    };
    let equal = left == right;
    let mut guard = RecursionGuard::new();
    let result = match call.op {
        BinaryOp::Less => !equal && right.is_assignable(left, &mut guard),
        BinaryOp::LessEqual => equal || right.is_assignable(left, &mut guard),
        BinaryOp::Greater => !equal && left.is_assignable(right, &mut guard),
        BinaryOp::GreaterEqual => equal || left.is_assignable(right, &mut guard),
        _ => false,
    };
    Ok(Value::boolean(result))
}

fn mismatch(call: &BinaryCall<'_>, expected: &str) -> EvalResult {
    Err(
        type_mismatch(expected, call.right.value.type_name(), "for comparison")
            .with_span(call.right.span),
    )
}

fn expected_numeric(call: BinaryCall<'_>) -> EvalResult {
    mismatch(&call, "Numeric")
}

fn expected_string(call: BinaryCall<'_>) -> EvalResult {
    mismatch(&call, "String")
}

fn expected_type(call: BinaryCall<'_>) -> EvalResult {
    mismatch(&call, "Type")
}

fn not_comparable(call: BinaryCall<'_>) -> EvalResult {
    Err(type_mismatch(
        "Numeric, String or Type",
        call.left.value.type_name(),
        "for comparison",
    )
    .with_span(call.left.span))
}
