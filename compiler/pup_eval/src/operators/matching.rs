//! Pattern match (`=~`) and its negation (`!~`).
//!
//! A string search publishes its groups into the current scope as `$0`,
//! `$1`, ... whether or not it matched; a failed search leaves an empty
//! capture list behind. Matching against a type is an instance check and
//! touches no captures.

use pup_ir::BinaryOp;
use pup_runtime::{EvalError, EvalResult, RecursionGuard, RegexValue, Type, Value};

use crate::context::EvaluationContext;
use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor};

pub(super) fn descriptor(op: BinaryOp) -> Descriptor<BinaryHandler> {
    let mut descriptor = Descriptor::<BinaryHandler>::new(op.as_symbol());
    descriptor
        .add([Type::string(), Type::string()], match_string)
        .add([Type::string(), Type::regexp()], match_regexp)
        .add([Type::Any, Type::type_of(None)], match_type);
    descriptor
}

fn match_string(call: BinaryCall<'_>) -> EvalResult {
    let pattern = call.right.value.as_str().unwrap_or_default();
    let regex = RegexValue::new(pattern).map_err(|err| err.with_span(call.right.span))?;
    let text = call.left.value.as_str().unwrap_or_default();
    Ok(outcome(call.op, search(call.context, text, &regex)))
}

fn match_regexp(call: BinaryCall<'_>) -> EvalResult {
    let (Value::String(text), Value::Regexp(regex)) = (&call.left.value, &call.right.value) else {
        return Err(expected_string(&call));
    };
    Ok(outcome(call.op, search(call.context, text, regex)))
}

fn match_type(call: BinaryCall<'_>) -> EvalResult {
    let Some(ty) = call.right.value.as_type() else {
        return Err(expected_string(&call));
    };
    let matched = ty.is_instance(&call.left.value, &mut RecursionGuard::new());
    Ok(outcome(call.op, matched))
}

/// Search `text` and publish the groups. An empty pattern matches anything
/// and captures nothing.
fn search(context: &mut EvaluationContext, text: &str, regex: &RegexValue) -> bool {
    if regex.is_empty() {
        context.current_mut().clear_captures();
        return true;
    }
    match regex.regex().captures(text) {
        Some(groups) => {
            let captures = groups
                .iter()
                .map(|group| group.map_or(Value::Undef, |m| Value::string(m.as_str())))
                .collect();
            context.current_mut().set_captures(captures);
            true
        }
        None => {
            context.current_mut().clear_captures();
            false
        }
    }
}

fn outcome(op: BinaryOp, matched: bool) -> Value {
    Value::boolean(if op == BinaryOp::NotMatch {
        !matched
    } else {
        matched
    })
}

#[cold]
fn expected_string(call: &BinaryCall<'_>) -> EvalError {
    pup_runtime::type_mismatch("String", call.left.value.type_name(), &format!("for '{}'", call.op))
        .with_span(call.left.span)
}
