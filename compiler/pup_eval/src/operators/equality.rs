//! Equality (`==`) and inequality (`!=`) by language equality: strings
//! ignore case and integers equal floats of the same value.

use pup_ir::BinaryOp;
use pup_runtime::{EvalResult, Type, Value};

use crate::dispatch::{BinaryCall, BinaryHandler, Descriptor};

pub(super) fn descriptor(op: BinaryOp) -> Descriptor<BinaryHandler> {
    let mut descriptor = Descriptor::<BinaryHandler>::new(op.as_symbol());
    descriptor.add([Type::Any, Type::Any], equality);
    descriptor
}

fn equality(call: BinaryCall<'_>) -> EvalResult {
    let equal = call.left.value.equals(&call.right.value);
    Ok(Value::boolean(equal != (call.op == BinaryOp::NotEquals)))
}
