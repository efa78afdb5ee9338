//! `reduce(enumerable[, memo]) |memo, element| { ... }`
//!
//! Folds the elements through the block and returns the final memo. Without
//! a start value the first element seeds the memo and folding begins at the
//! second; an empty enumerable then reduces to `undef`. Hash entries reach
//! the block as `[key, value]` pairs.

use pup_runtime::{wrong_argument_count, EvalResult, Type, Value};

use super::{enumerable_patterns, enumerate, invoke, reject_argument};
use crate::dispatch::{require_block, Descriptor, FunctionCall, FunctionHandler};

const NAME: &str = "reduce";

pub(super) fn descriptor() -> Descriptor<FunctionHandler> {
    let mut descriptor = Descriptor::<FunctionHandler>::new(NAME);
    for pattern in enumerable_patterns() {
        descriptor.add([pattern.clone()], reduce);
        descriptor.add([pattern, Type::Any], reduce);
    }
    descriptor.add([Type::Any], reject);
    descriptor.add([Type::Any, Type::Any], reject);
    descriptor
}

fn reject(call: FunctionCall<'_>) -> EvalResult {
    reject_argument(call, &[2])
}

fn reduce(call: FunctionCall<'_>) -> EvalResult {
    let FunctionCall {
        name,
        arguments,
        span,
        block,
        context,
    } = call;
    let block = require_block(name, span, block, &[2])?;
    let mut arguments = arguments.into_iter();
    let Some(enumerable) = arguments.next() else {
        return Err(wrong_argument_count(name, "1 or 2", 0).with_span(span));
    };
    let mut memo: Option<Value> = arguments.next().map(|start| start.value);

    enumerate(&enumerable.value, enumerable.span, &mut |element| {
        let element = element.into_value();
        memo = Some(match memo.take() {
            Some(acc) => invoke(&mut *block, context, vec![acc, element])?,
            None => element,
        });
        Ok(())
    })?;
    Ok(memo.unwrap_or(Value::Undef))
}
