//! Instance checks: does a value belong to a type?

use super::{RecursionGuard, Type};
use crate::value::Value;

/// Whether `Float[from, to]` spans every float.
fn unbounded(from: f64, to: f64) -> bool {
    from.is_infinite() && from.is_sign_negative() && to.is_infinite() && to.is_sign_positive()
}

impl Type {
    /// Whether `value` is an instance of this type.
    ///
    /// Revisiting an alias that is already being checked answers `true`:
    /// the outer check of that alias is still deciding the result.
    pub fn is_instance(&self, value: &Value, guard: &mut RecursionGuard) -> bool {
        pup_stack::ensure_sufficient_stack(|| self.instance_of(value, guard))
    }

    fn instance_of(&self, value: &Value, guard: &mut RecursionGuard) -> bool {
        match (self, value) {
            (Type::Any, _)
            | (Type::Undef, Value::Undef)
            | (Type::Default, Value::Default)
            | (Type::Boolean, Value::Boolean(_))
            | (Type::Numeric, Value::Integer(_) | Value::Float(_)) => true,

            (Type::Integer { from, to }, Value::Integer(n)) => (*from..=*to).contains(n),
            // NaN lies in no range, but it is still a Float.
            (Type::Float { from, to }, Value::Float(f)) if f.is_nan() => unbounded(*from, *to),
            (Type::Float { from, to }, Value::Float(f)) => *from <= *f && *f <= *to,

            (Type::String { min, max, pattern }, Value::String(s)) => {
                let len = s.chars().count();
                (*min..=*max).contains(&len)
                    && pattern.as_ref().map_or(true, |p| p.regex().is_match(s))
            }
            (Type::Regexp(pattern), Value::Regexp(regex)) => {
                pattern.as_ref().map_or(true, |p| p == &**regex)
            }

            (Type::Array { element, min, max }, Value::Array(items)) => {
                (*min..=*max).contains(&items.len())
                    && items.iter().all(|item| element.is_instance(item, guard))
            }
            (
                Type::Hash {
                    key,
                    value: value_type,
                    min,
                    max,
                },
                Value::Hash(map),
            ) => {
                (*min..=*max).contains(&map.len())
                    && map
                        .iter()
                        .all(|(k, v)| key.is_instance(k, guard) && value_type.is_instance(v, guard))
            }
            (Type::Collection { min, max }, Value::Array(items)) => {
                (*min..=*max).contains(&items.len())
            }
            (Type::Collection { min, max }, Value::Hash(map)) => (*min..=*max).contains(&map.len()),

            (Type::Iterator(element), Value::Iterator(it)) => element
                .as_ref()
                .map_or(true, |e| e.is_assignable(&it.element, guard)),
            (Type::TypeOf(inner), Value::Type(ty)) => {
                inner.as_ref().map_or(true, |i| i.is_assignable(ty, guard))
            }

            (
                Type::Runtime {
                    runtime_name,
                    type_name,
                    object,
                },
                Value::Runtime(obj),
            ) => {
                (runtime_name.is_empty() || *runtime_name == obj.runtime_name)
                    && (type_name.is_empty() || *type_name == obj.type_name)
                    && object
                        .as_ref()
                        .map_or(true, |o| obj.handle.as_ref() == Some(o))
            }

            (Type::Alias(alias), _) => match alias.target() {
                Some(target) => {
                    guard.with_alias(alias, true, |guard| target.is_instance(value, guard))
                }
                None => true,
            },

            // Resources and classes are only ever matched as `Type[...]`.
            _ => false,
        }
    }
}
