//! Structural equality and hashing of types.
//!
//! Two aliases are equal when their names match and they share a definition
//! or have equal definitions. Comparing a definition is guarded, so a pair
//! of self-referential aliases compares equal once the descent returns to
//! an alias already being compared.

use std::hash::{Hash, Hasher};

use super::{RecursionGuard, Type};

impl Type {
    fn eq_guarded(&self, other: &Type, guard: &mut RecursionGuard) -> bool {
        match (self, other) {
            (Type::Any, Type::Any)
            | (Type::Undef, Type::Undef)
            | (Type::Default, Type::Default)
            | (Type::Boolean, Type::Boolean)
            | (Type::Numeric, Type::Numeric) => true,
            (Type::Integer { from, to }, Type::Integer { from: f2, to: t2 }) => {
                from == f2 && to == t2
            }
            (Type::Float { from, to }, Type::Float { from: f2, to: t2 }) => {
                from.to_bits() == f2.to_bits() && to.to_bits() == t2.to_bits()
            }
            (
                Type::String { min, max, pattern },
                Type::String {
                    min: m2,
                    max: x2,
                    pattern: p2,
                },
            ) => min == m2 && max == x2 && pattern == p2,
            (Type::Regexp(a), Type::Regexp(b)) => a == b,
            (
                Type::Array { element, min, max },
                Type::Array {
                    element: e2,
                    min: m2,
                    max: x2,
                },
            ) => min == m2 && max == x2 && element.eq_guarded(e2, guard),
            (
                Type::Hash {
                    key,
                    value,
                    min,
                    max,
                },
                Type::Hash {
                    key: k2,
                    value: v2,
                    min: m2,
                    max: x2,
                },
            ) => min == m2 && max == x2 && key.eq_guarded(k2, guard) && value.eq_guarded(v2, guard),
            (Type::Collection { min, max }, Type::Collection { min: m2, max: x2 }) => {
                min == m2 && max == x2
            }
            (Type::Iterator(a), Type::Iterator(b)) | (Type::TypeOf(a), Type::TypeOf(b)) => {
                match (a, b) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.eq_guarded(b, guard),
                    _ => false,
                }
            }
            (
                Type::Runtime {
                    runtime_name,
                    type_name,
                    object,
                },
                Type::Runtime {
                    runtime_name: r2,
                    type_name: t2,
                    object: o2,
                },
            ) => runtime_name == r2 && type_name == t2 && object == o2,
            (
                Type::Resource { type_name, title },
                Type::Resource {
                    type_name: n2,
                    title: t2,
                },
            ) => type_name == n2 && title == t2,
            (Type::Class { title }, Type::Class { title: t2 }) => title == t2,
            (Type::Alias(a), Type::Alias(b)) => {
                if a.name() != b.name() {
                    return false;
                }
                if a.ptr_eq(b) {
                    return true;
                }
                match (a.target(), b.target()) {
                    (None, None) => true,
                    (Some(ta), Some(tb)) => {
                        guard.with_alias(a, true, |guard| ta.eq_guarded(tb, guard))
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn hash_guarded<H: Hasher>(&self, state: &mut H, guard: &mut RecursionGuard) {
        std::mem::discriminant(self).hash(state);
        match self {
            Type::Any
            | Type::Undef
            | Type::Default
            | Type::Boolean
            | Type::Numeric => {}
            Type::Integer { from, to } => {
                from.hash(state);
                to.hash(state);
            }
            Type::Float { from, to } => {
                from.to_bits().hash(state);
                to.to_bits().hash(state);
            }
            Type::String { min, max, pattern } => {
                min.hash(state);
                max.hash(state);
                pattern.hash(state);
            }
            Type::Regexp(pattern) => pattern.hash(state),
            Type::Array { element, min, max } => {
                element.hash_guarded(state, guard);
                min.hash(state);
                max.hash(state);
            }
            Type::Hash {
                key,
                value,
                min,
                max,
            } => {
                key.hash_guarded(state, guard);
                value.hash_guarded(state, guard);
                min.hash(state);
                max.hash(state);
            }
            Type::Collection { min, max } => {
                min.hash(state);
                max.hash(state);
            }
            Type::Iterator(inner) | Type::TypeOf(inner) => {
                inner.is_some().hash(state);
                if let Some(inner) = inner {
                    inner.hash_guarded(state, guard);
                }
            }
            Type::Runtime {
                runtime_name,
                type_name,
                object,
            } => {
                runtime_name.hash(state);
                type_name.hash(state);
                object.hash(state);
            }
            Type::Resource { type_name, title } => {
                type_name.hash(state);
                title.hash(state);
            }
            Type::Class { title } => title.hash(state),
            Type::Alias(alias) => {
                alias.name().hash(state);
                if let Some(target) = alias.target() {
                    guard.with_alias(alias, (), |guard| target.hash_guarded(state, guard));
                }
            }
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        pup_stack::ensure_sufficient_stack(|| self.eq_guarded(other, &mut RecursionGuard::new()))
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        pup_stack::ensure_sufficient_stack(|| self.hash_guarded(state, &mut RecursionGuard::new()));
    }
}
