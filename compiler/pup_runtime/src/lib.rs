//! Runtime data for the Pup evaluation core.
//!
//! - [`Value`]: the closed set of runtime values, with copy-on-write
//!   compound storage behind [`Heap`].
//! - [`Type`]: runtime type descriptors and their algebra (instance checks,
//!   subtyping, generalization, rendering), threaded with a
//!   [`RecursionGuard`] so self-referential aliases terminate.
//! - [`EvalError`]: the error taxonomy shared by operators, functions and
//!   the evaluation context.

mod errors;
mod types;
mod value;

pub use errors::{
    arithmetic_overflow, arithmetic_underflow, block_parameter_mismatch, block_required,
    dispatch_mismatch, duplicate_scope, invalid_regex, not_enumerable, reassignment,
    root_scope_pop, type_mismatch, unknown_callable, unknown_scope, wrong_argument_count,
    ArithmeticFault, AritySubject, EvalError, EvalErrorKind, EvalResult,
};
pub use types::{AliasId, RecursionGuard, Type, TypeAlias};
pub use value::{
    compare_strings, HashValue, Heap, IteratorValue, NativeHandle, RegexValue, RuntimeObject,
    Unwrapped, Value,
};
