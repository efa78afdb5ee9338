//! Binary operator descriptors.

mod comparison;
mod equality;
mod matching;
mod membership;
mod minus;

use pup_ir::BinaryOp;

use crate::dispatch::Dispatcher;

/// Register a descriptor for every [`BinaryOp`].
pub(crate) fn register(dispatcher: &mut Dispatcher) {
    for op in BinaryOp::ALL {
        let descriptor = match op {
            BinaryOp::Minus => minus::descriptor(),
            BinaryOp::Equals | BinaryOp::NotEquals => equality::descriptor(op),
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                comparison::descriptor(op)
            }
            BinaryOp::Match | BinaryOp::NotMatch => matching::descriptor(op),
            BinaryOp::In => membership::descriptor(),
        };
        dispatcher.register_binary(op, descriptor);
    }
}
