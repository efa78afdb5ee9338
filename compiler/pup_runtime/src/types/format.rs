//! Canonical rendering of types.

use std::fmt::{self, Write};

use super::{RecursionGuard, Type};
use crate::value::write_float;

fn write_size(out: &mut dyn Write, size: usize) -> fmt::Result {
    if size == usize::MAX {
        out.write_str("default")
    } else {
        write!(out, "{size}")
    }
}

fn write_sizes(out: &mut dyn Write, min: usize, max: usize) -> fmt::Result {
    write_size(out, min)?;
    out.write_str(", ")?;
    write_size(out, max)
}

fn is_open_sizes(min: usize, max: usize) -> bool {
    min == 0 && max == usize::MAX
}

/// `file` -> `File`, `foo::bar` -> `Foo::Bar`.
fn capitalize_segments(out: &mut dyn Write, name: &str) -> fmt::Result {
    for (i, segment) in name.split("::").enumerate() {
        if i > 0 {
            out.write_str("::")?;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            for upper in first.to_uppercase() {
                out.write_char(upper)?;
            }
            out.write_str(chars.as_str())?;
        }
    }
    Ok(())
}

impl Type {
    /// Write the canonical form of this type.
    ///
    /// With `expand`, aliases render their definition, except an alias that
    /// is already being rendered further up, which renders by name. Without
    /// `expand`, every alias renders by name.
    pub fn write(&self, out: &mut dyn Write, expand: bool, guard: &mut RecursionGuard) -> fmt::Result {
        pup_stack::ensure_sufficient_stack(|| self.write_inner(out, expand, guard))
    }

    fn write_inner(&self, out: &mut dyn Write, expand: bool, guard: &mut RecursionGuard) -> fmt::Result {
        match self {
            Type::Any => out.write_str("Any"),
            Type::Undef => out.write_str("Undef"),
            Type::Default => out.write_str("Default"),
            Type::Boolean => out.write_str("Boolean"),
            Type::Numeric => out.write_str("Numeric"),
            Type::Integer { from, to } => {
                if *from == i64::MIN && *to == i64::MAX {
                    return out.write_str("Integer");
                }
                out.write_str("Integer[")?;
                if *from == i64::MIN {
                    out.write_str("default")?;
                } else {
                    write!(out, "{from}")?;
                }
                out.write_str(", ")?;
                if *to == i64::MAX {
                    out.write_str("default")?;
                } else {
                    write!(out, "{to}")?;
                }
                out.write_char(']')
            }
            Type::Float { from, to } => {
                if from.is_infinite() && to.is_infinite() {
                    return out.write_str("Float");
                }
                out.write_str("Float[")?;
                if from.is_infinite() {
                    out.write_str("default")?;
                } else {
                    write_float(out, *from)?;
                }
                out.write_str(", ")?;
                if to.is_infinite() {
                    out.write_str("default")?;
                } else {
                    write_float(out, *to)?;
                }
                out.write_char(']')
            }
            Type::String { min, max, pattern } => {
                if is_open_sizes(*min, *max) && pattern.is_none() {
                    return out.write_str("String");
                }
                out.write_str("String[")?;
                write_sizes(out, *min, *max)?;
                if let Some(pattern) = pattern {
                    write!(out, ", {pattern}")?;
                }
                out.write_char(']')
            }
            Type::Regexp(None) => out.write_str("Regexp"),
            Type::Regexp(Some(pattern)) => write!(out, "Regexp[{pattern}]"),
            Type::Array { element, min, max } => {
                let open = is_open_sizes(*min, *max);
                if open && matches!(**element, Type::Any) {
                    return out.write_str("Array");
                }
                out.write_str("Array[")?;
                element.write(out, expand, guard)?;
                if !open {
                    out.write_str(", ")?;
                    write_sizes(out, *min, *max)?;
                }
                out.write_char(']')
            }
            Type::Hash {
                key,
                value,
                min,
                max,
            } => {
                let open = is_open_sizes(*min, *max);
                if open && matches!(**key, Type::Any) && matches!(**value, Type::Any) {
                    return out.write_str("Hash");
                }
                out.write_str("Hash[")?;
                key.write(out, expand, guard)?;
                out.write_str(", ")?;
                value.write(out, expand, guard)?;
                if !open {
                    out.write_str(", ")?;
                    write_sizes(out, *min, *max)?;
                }
                out.write_char(']')
            }
            Type::Collection { min, max } => {
                if is_open_sizes(*min, *max) {
                    return out.write_str("Collection");
                }
                out.write_str("Collection[")?;
                write_sizes(out, *min, *max)?;
                out.write_char(']')
            }
            Type::Iterator(element) => {
                out.write_str("Iterator")?;
                if let Some(element) = element {
                    out.write_char('[')?;
                    element.write(out, expand, guard)?;
                    out.write_char(']')?;
                }
                Ok(())
            }
            Type::TypeOf(inner) => {
                out.write_str("Type")?;
                if let Some(inner) = inner {
                    out.write_char('[')?;
                    inner.write(out, expand, guard)?;
                    out.write_char(']')?;
                }
                Ok(())
            }
            Type::Runtime {
                runtime_name,
                type_name,
                object,
            } => {
                out.write_str("Runtime")?;
                if !runtime_name.is_empty() {
                    write!(out, "['{runtime_name}'")?;
                    if !type_name.is_empty() {
                        write!(out, ", '{type_name}'")?;
                    }
                    out.write_char(']')?;
                } else if let Some(object) = object {
                    write!(out, "[{object:?}]")?;
                }
                Ok(())
            }
            Type::Resource { type_name, title } => match type_name {
                None => out.write_str("Resource"),
                Some(name) => {
                    capitalize_segments(out, name)?;
                    if let Some(title) = title {
                        write!(out, "['{title}']")?;
                    }
                    Ok(())
                }
            },
            Type::Class { title } => match title {
                None => out.write_str("Class"),
                Some(title) => write!(out, "Class['{title}']"),
            },
            Type::Alias(alias) => {
                let target = match alias.target() {
                    Some(target) if expand => target,
                    _ => return out.write_str(alias.name()),
                };
                guard
                    .with_alias(alias, None, |guard| Some(target.write(out, expand, guard)))
                    .unwrap_or_else(|| out.write_str(alias.name()))
            }
        }
    }
}
