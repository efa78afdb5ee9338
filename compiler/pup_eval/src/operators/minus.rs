//! Subtraction and deletion (`-`).
//!
//! Numbers subtract; arrays and hashes delete. The left collection is
//! unshared before it is edited, so a variable holding the same array or
//! hash keeps its contents.

use pup_ir::BinaryOp;
use pup_runtime::{
    arithmetic_overflow, arithmetic_underflow, type_mismatch, EvalResult, Type, Value,
};

use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor};

pub(super) fn descriptor() -> Descriptor<BinaryHandler> {
    let array = || Type::array(Type::Any);
    let hash = || Type::hash(Type::Any, Type::Any);

    let mut descriptor = Descriptor::<BinaryHandler>::new(BinaryOp::Minus.as_symbol());
    descriptor
        .add([Type::integer(), Type::integer()], subtract_integers)
        .add([Type::Numeric, Type::Numeric], subtract_floats)
        .add([array(), array()], array_minus_array)
        .add([array(), hash()], array_minus_hash)
        .add([array(), Type::Any], array_minus_value)
        .add([hash(), hash()], hash_minus_hash)
        .add([hash(), array()], hash_minus_array)
        // Remaining pairings are errors, worded after the left operand.
        .add([hash(), Type::Any], expected_collection)
        .add([Type::Numeric, Type::Any], expected_numeric_right)
        .add([Type::Any, Type::Any], expected_numeric_left);
    descriptor
}

/// Checked before committing: `left - right` leaves the i64 range iff
/// `left < MIN + right` (right positive) or `left > MAX + right` (otherwise).
fn subtract_integers(call: BinaryCall<'_>) -> EvalResult {
    let (Value::Integer(left), Value::Integer(right)) = (&call.left.value, &call.right.value)
    else {
        return expected_numeric_left(call);
    };
    match left.checked_sub(*right) {
        Some(result) => Ok(Value::int(result)),
        None if *right > 0 => Err(arithmetic_underflow(
            "subtraction",
            &call.left.value,
            &call.right.value,
        )
        .with_span(call.left.span)),
        None => Err(
            arithmetic_overflow("subtraction", &call.left.value, &call.right.value)
                .with_span(call.left.span),
        ),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed integer/float arithmetic promotes to float"
)]
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(n) => Some(*n as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

/// Float subtraction (integers promoted). Fails when finite operands
/// produce an infinity, or when a nonzero difference lands subnormal or
/// rounds to zero.
fn subtract_floats(call: BinaryCall<'_>) -> EvalResult {
    let (Some(left), Some(right)) = (as_float(&call.left.value), as_float(&call.right.value))
    else {
        return expected_numeric_left(call);
    };
    let result = left - right;
    if result.is_infinite() && left.is_finite() && right.is_finite() {
        return Err(
            arithmetic_overflow("subtraction", &call.left.value, &call.right.value)
                .with_span(call.left.span),
        );
    }
    #[expect(clippy::float_cmp, reason = "exact zero test of the inputs")]
    let lost = result.is_subnormal() || (result == 0.0 && left != right);
    if lost {
        return Err(
            arithmetic_underflow("subtraction", &call.left.value, &call.right.value)
                .with_span(call.left.span),
        );
    }
    Ok(Value::float(result))
}

/// Remove every left element language-equal to some right element.
fn array_minus_array(call: BinaryCall<'_>) -> EvalResult {
    let BinaryCall {
        mut left, right, ..
    } = call;
    let remove = right.value.as_array().unwrap_or_default();
    if let Some(items) = left.value.array_mut() {
        items.retain(|item| !remove.iter().any(|r| item.equals(r)));
    }
    Ok(left.value)
}

/// Remove every `[key, value]` left element whose pair is in the hash.
fn array_minus_hash(call: BinaryCall<'_>) -> EvalResult {
    let BinaryCall {
        mut left, right, ..
    } = call;
    let Some(map) = right.value.as_hash() else {
        return Ok(left.value);
    };
    if let Some(items) = left.value.array_mut() {
        items.retain(|item| match item.as_array() {
            Some([key, value]) => !map.get(key).is_some_and(|v| v.equals(value)),
            _ => true,
        });
    }
    Ok(left.value)
}

/// Remove every left element language-equal to the right operand.
fn array_minus_value(call: BinaryCall<'_>) -> EvalResult {
    let BinaryCall {
        mut left, right, ..
    } = call;
    if let Some(items) = left.value.array_mut() {
        items.retain(|item| !item.equals(&right.value));
    }
    Ok(left.value)
}

/// Remove every left entry whose key is a right key.
fn hash_minus_hash(call: BinaryCall<'_>) -> EvalResult {
    let BinaryCall {
        mut left, right, ..
    } = call;
    let Some(keys) = right.value.as_hash() else {
        return Ok(left.value);
    };
    if let Some(map) = left.value.hash_mut() {
        map.retain(|key, _| !keys.contains_key(key));
    }
    Ok(left.value)
}

/// Remove every left entry whose key is listed.
fn hash_minus_array(call: BinaryCall<'_>) -> EvalResult {
    let BinaryCall {
        mut left, right, ..
    } = call;
    let keys = right.value.as_array().unwrap_or_default();
    if let Some(map) = left.value.hash_mut() {
        map.retain(|key, _| !keys.contains(key));
    }
    Ok(left.value)
}

fn expected_collection(call: BinaryCall<'_>) -> EvalResult {
    Err(
        type_mismatch("Array or Hash", call.right.value.type_name(), "for deletion")
            .with_span(call.right.span),
    )
}

fn expected_numeric_right(call: BinaryCall<'_>) -> EvalResult {
    Err(type_mismatch(
        "Numeric",
        call.right.value.type_name(),
        "for arithmetic subtraction",
    )
    .with_span(call.right.span))
}

fn expected_numeric_left(call: BinaryCall<'_>) -> EvalResult {
    Err(type_mismatch(
        "Numeric",
        call.left.value.type_name(),
        "for arithmetic subtraction",
    )
    .with_span(call.left.span))
}
