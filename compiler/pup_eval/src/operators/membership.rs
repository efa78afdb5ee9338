//! Membership (`in`).
//!
//! Never fails: a pairing with no membership rule answers `false`.

use pup_ir::BinaryOp;
use pup_runtime::{EvalResult, RecursionGuard, Type, Value};

use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor};

pub(super) fn descriptor() -> Descriptor<BinaryHandler> {
    let mut descriptor = Descriptor::<BinaryHandler>::new(BinaryOp::In.as_symbol());
    descriptor
        .add([Type::string(), Type::string()], substring)
        .add([Type::regexp(), Type::collection()], regexp_in)
        .add([Type::type_of(None), Type::collection()], type_in)
        .add([Type::Any, Type::collection()], member_in)
        .add([Type::Any, Type::Any], never);
    descriptor
}

/// Case-insensitive substring test.
fn substring(call: BinaryCall<'_>) -> EvalResult {
    let (Some(needle), Some(haystack)) = (call.left.value.as_str(), call.right.value.as_str())
    else {
        return never(call);
    };
    Ok(Value::boolean(
        haystack.to_lowercase().contains(&needle.to_lowercase()),
    ))
}

/// Elements of an array, keys of a hash.
fn members(collection: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match collection {
        Value::Array(items) => Box::new(items.iter()),
        Value::Hash(map) => Box::new(map.keys()),
        _ => Box::new(std::iter::empty()),
    }
}

fn regexp_in(call: BinaryCall<'_>) -> EvalResult {
    let Value::Regexp(regex) = &call.left.value else {
        return never(call);
    };
    let found = members(&call.right.value)
        .filter_map(Value::as_str)
        .any(|s| regex.regex().is_match(s));
    Ok(Value::boolean(found))
}

fn type_in(call: BinaryCall<'_>) -> EvalResult {
    let Some(ty) = call.left.value.as_type() else {
        return never(call);
    };
    let mut guard = RecursionGuard::new();
    let found = members(&call.right.value).any(|member| ty.is_instance(member, &mut guard));
    Ok(Value::boolean(found))
}

/// Any array element, or any hash key, equal to the left operand.
fn member_in(call: BinaryCall<'_>) -> EvalResult {
    let found = members(&call.right.value).any(|member| member.equals(&call.left.value));
    Ok(Value::boolean(found))
}

fn never(_call: BinaryCall<'_>) -> EvalResult {
    Ok(Value::boolean(false))
}
