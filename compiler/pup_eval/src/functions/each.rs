//! `each(enumerable) |params| { ... }`
//!
//! Calls the block once per element and returns the argument unchanged.
//! With one parameter the block receives the element (a `[key, value]` pair
//! for hashes); with two it receives index and element (key and value).

use pup_runtime::{wrong_argument_count, EvalResult, Type};

use super::{enumerable_patterns, enumerate, invoke, reject_argument};
use crate::dispatch::{require_block, Descriptor, FunctionCall, FunctionHandler};

const NAME: &str = "each";
const PARAMETERS: [usize; 2] = [1, 2];

pub(super) fn descriptor() -> Descriptor<FunctionHandler> {
    let mut descriptor = Descriptor::<FunctionHandler>::new(NAME);
    for pattern in enumerable_patterns() {
        descriptor.add([pattern], each);
    }
    descriptor.add([Type::Any], reject);
    descriptor
}

fn reject(call: FunctionCall<'_>) -> EvalResult {
    reject_argument(call, &PARAMETERS)
}

fn each(call: FunctionCall<'_>) -> EvalResult {
    let FunctionCall {
        name,
        arguments,
        span,
        block,
        context,
    } = call;
    let block = require_block(name, span, block, &PARAMETERS)?;
    let parameters = block.parameter_count();
    let Some(argument) = arguments.into_iter().next() else {
        return Err(wrong_argument_count(name, "1", 0).with_span(span));
    };

    enumerate(&argument.value, argument.span, &mut |element| {
        invoke(&mut *block, context, element.into_arguments(parameters)).map(drop)
    })?;
    Ok(argument.value)
}
