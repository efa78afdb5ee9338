//! Subtyping: is every instance of one type an instance of another?

use super::{RecursionGuard, Type};

/// Whether size range `outer` contains size range `inner`.
#[inline]
fn contains_range(outer: (usize, usize), inner: (usize, usize)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1
}

/// Optional type parameters, where absence means `Any`.
fn optional_assignable(
    target: Option<&Type>,
    source: Option<&Type>,
    guard: &mut RecursionGuard,
) -> bool {
    match (target, source) {
        (None, _) => true,
        (Some(target), None) => target.is_assignable(&Type::Any, guard),
        (Some(target), Some(source)) => target.is_assignable(source, guard),
    }
}

impl Type {
    /// Whether every instance of `other` is an instance of this type.
    ///
    /// Aliases on each side are guarded separately. Meeting an alias again
    /// on the side where it is already being expanded answers `true`.
    pub fn is_assignable(&self, other: &Type, guard: &mut RecursionGuard) -> bool {
        pup_stack::ensure_sufficient_stack(|| self.assignable_from(other, guard))
    }

    fn assignable_from(&self, other: &Type, guard: &mut RecursionGuard) -> bool {
        if let Type::Alias(alias) = self {
            return match alias.target() {
                Some(target) => {
                    guard.with_alias(alias, true, |guard| target.is_assignable(other, guard))
                }
                None => true,
            };
        }
        if let Type::Alias(alias) = other {
            return match alias.target() {
                Some(target) => {
                    guard.with_source_alias(alias, true, |guard| {
                        self.is_assignable(target, guard)
                    })
                }
                // An unresolved alias admits anything, so only Any covers it.
                None => matches!(self, Type::Any),
            };
        }

        match (self, other) {
            (Type::Any, _)
            | (Type::Undef, Type::Undef)
            | (Type::Default, Type::Default)
            | (Type::Boolean, Type::Boolean)
            | (Type::Numeric, Type::Integer { .. } | Type::Float { .. } | Type::Numeric) => true,

            (Type::Integer { from, to }, Type::Integer { from: f2, to: t2 }) => {
                from <= f2 && t2 <= to
            }
            (Type::Float { from, to }, Type::Float { from: f2, to: t2 }) => {
                from <= f2 && t2 <= to
            }

            (
                Type::String { min, max, pattern },
                Type::String {
                    min: m2,
                    max: x2,
                    pattern: p2,
                },
            ) => contains_range((*min, *max), (*m2, *x2)) && (pattern.is_none() || pattern == p2),
            (Type::Regexp(pattern), Type::Regexp(p2)) => pattern.is_none() || pattern == p2,

            (
                Type::Array { element, min, max },
                Type::Array {
                    element: e2,
                    min: m2,
                    max: x2,
                },
            ) => contains_range((*min, *max), (*m2, *x2)) && element.is_assignable(e2, guard),
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
            ) => {
                contains_range((*min, *max), (*m2, *x2))
                    && key.is_assignable(k2, guard)
                    && value.is_assignable(v2, guard)
            }
            (
                Type::Collection { min, max },
                Type::Array { min: m2, max: x2, .. }
                | Type::Hash { min: m2, max: x2, .. }
                | Type::Collection { min: m2, max: x2 },
            ) => contains_range((*min, *max), (*m2, *x2)),

            (Type::Iterator(element), Type::Iterator(e2)) => {
                optional_assignable(element.as_deref(), e2.as_deref(), guard)
            }
            (Type::TypeOf(inner), Type::TypeOf(i2)) => {
                optional_assignable(inner.as_deref(), i2.as_deref(), guard)
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
            ) => {
                (runtime_name.is_empty() || runtime_name == r2)
                    && (type_name.is_empty() || type_name == t2)
                    && (object.is_none() || object == o2)
            }
            (
                Type::Resource { type_name, title },
                Type::Resource {
                    type_name: n2,
                    title: t2,
                },
            ) => match (type_name, n2) {
                (None, _) => true,
                (Some(name), Some(n2)) if name.eq_ignore_ascii_case(n2) => {
                    title.is_none() || title == t2
                }
                _ => false,
            },
            (Type::Class { title }, Type::Class { title: t2 }) => title.is_none() || title == t2,

            _ => false,
        }
    }
}
