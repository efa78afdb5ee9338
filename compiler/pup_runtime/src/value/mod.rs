//! Runtime values for the Pup evaluation core.
//!
//! # Copy-on-write
//!
//! Compound values (strings, regexps, arrays, hashes, types, iterators and
//! runtime objects) live behind [`Heap`]. Cloning a `Value` shares storage.
//! Anything that mutates a compound goes through [`Value::array_mut`] /
//! [`Value::hash_mut`], which unshare first, so a variable that still holds
//! the old value never sees the change.
//!
//! ```text
//! let s = Value::string("hello");        // OK
//! let a = Value::array(vec![]);          // OK
//! let s = Value::String(Heap::new(..));  // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Two equalities
//!
//! [`Value::equals`] is the language's `==`: strings compare without case and
//! integers compare numerically against floats. The `PartialEq`/`Hash` impls
//! are exact (case-sensitive, float bit patterns) and decide hash-key
//! identity.

mod heap;
mod iterator;
mod regexp;
mod runtime;

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHasher};

use crate::errors::EvalError;
use crate::types::Type;

pub use heap::Heap;
pub use iterator::IteratorValue;
pub use regexp::RegexValue;
pub use runtime::{NativeHandle, RuntimeObject};

/// Insertion-ordered map used by hash values.
pub type HashValue = IndexMap<Value, Value, FxBuildHasher>;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Scalars (inline)
    Undef,
    /// The `default` literal.
    Default,
    Boolean(bool),
    Integer(i64),
    Float(f64),

    // Compounds (shared via Heap<T>)
    String(Heap<String>),
    Regexp(Heap<RegexValue>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<HashValue>),
    Type(Heap<Type>),
    Iterator(Heap<IteratorValue>),
    Runtime(Heap<RuntimeObject>),
}

/// Result of [`Value::dereference`]: either the type a type value holds
/// (aliases followed) or the value itself.
#[derive(Copy, Clone, Debug)]
pub enum Unwrapped<'a> {
    Type(&'a Type),
    Value(&'a Value),
}

impl Value {
    #[inline]
    pub fn undef() -> Self {
        Value::Undef
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Integer(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    /// Compile `pattern` into a regexp value.
    pub fn regexp(pattern: impl Into<String>) -> Result<Self, EvalError> {
        Ok(Value::Regexp(Heap::new(RegexValue::new(pattern)?)))
    }

    /// Wrap an already compiled regular expression.
    #[inline]
    pub fn regexp_value(regex: RegexValue) -> Self {
        Value::Regexp(Heap::new(regex))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn hash(entries: HashValue) -> Self {
        Value::Hash(Heap::new(entries))
    }

    /// Build a hash from key/value pairs. Later duplicates overwrite earlier
    /// values but keep the first key's position.
    pub fn hash_from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::hash(pairs.into_iter().collect())
    }

    #[inline]
    pub fn type_value(ty: Type) -> Self {
        Value::Type(Heap::new(ty))
    }

    #[inline]
    pub fn iterator(source: Value, element: Type) -> Self {
        Value::Iterator(Heap::new(IteratorValue { source, element }))
    }

    #[inline]
    pub fn runtime(object: RuntimeObject) -> Self {
        Value::Runtime(Heap::new(object))
    }

    // Accessors

    pub fn is_undef(&self) -> bool {
        matches!(self, Value::Undef)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&HashValue> {
        match self {
            Value::Hash(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&Type> {
        match self {
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    /// Mutable array contents, unsharing the storage first.
    pub fn array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(Heap::make_mut(items)),
            _ => None,
        }
    }

    /// Mutable hash contents, unsharing the storage first.
    pub fn hash_mut(&mut self) -> Option<&mut HashValue> {
        match self {
            Value::Hash(map) => Some(Heap::make_mut(map)),
            _ => None,
        }
    }

    /// Name of this value's kind, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undef => "Undef",
            Value::Default => "Default",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Regexp(_) => "Regexp",
            Value::Array(_) => "Array",
            Value::Hash(_) => "Hash",
            Value::Type(_) => "Type",
            Value::Iterator(_) => "Iterator",
            Value::Runtime(_) => "Runtime",
        }
    }

    /// Unwrap a type value to the type it holds, following aliases.
    pub fn dereference(&self) -> Unwrapped<'_> {
        match self {
            Value::Type(ty) => Unwrapped::Type(ty.resolved()),
            other => Unwrapped::Value(other),
        }
    }

    /// The most specific type describing this value.
    pub fn infer_type(&self) -> Type {
        match self {
            Value::Undef => Type::Undef,
            Value::Default => Type::Default,
            Value::Boolean(_) => Type::Boolean,
            Value::Integer(n) => Type::integer_range(*n, *n),
            Value::Float(f) if f.is_nan() => Type::float(),
            Value::Float(f) => Type::float_range(*f, *f),
            Value::String(s) => {
                let len = s.chars().count();
                Type::string_sized(len, len)
            }
            Value::Regexp(r) => Type::Regexp(Some((**r).clone())),
            Value::Array(items) => {
                Type::array_sized(common_type(items.iter()), items.len(), items.len())
            }
            Value::Hash(map) => Type::hash_sized(
                common_type(map.keys()),
                common_type(map.values()),
                map.len(),
                map.len(),
            ),
            Value::Type(ty) => Type::type_of(Some((**ty).clone())),
            Value::Iterator(it) => Type::iterator(Some(it.element.clone())),
            Value::Runtime(obj) => Type::runtime(&*obj.runtime_name, &*obj.type_name),
        }
    }

    /// Language equality (`==`).
    pub fn equals(&self, other: &Value) -> bool {
        pup_stack::ensure_sufficient_stack(|| self.equals_inner(other))
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integer/float equality compares in the float domain"
    )]
    fn equals_inner(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undef, Value::Undef) | (Value::Default, Value::Default) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                *a as f64 == *b
            }
            (Value::String(a), Value::String(b)) => {
                compare_strings(a, b) == Ordering::Equal
            }
            (Value::Regexp(a), Value::Regexp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                Heap::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y)))
            }
            (Value::Hash(a), Value::Hash(b)) => {
                Heap::ptr_eq(a, b)
                    || (a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).is_some_and(|other| v.equals(other))))
            }
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Iterator(a), Value::Iterator(b)) => {
                a.element == b.element && a.source.equals(&b.source)
            }
            (Value::Runtime(a), Value::Runtime(b)) => a == b,
            _ => false,
        }
    }
}

/// Case-insensitive lexicographic ordering of two strings.
pub fn compare_strings(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// The narrowest type shared by every item: their exact type if they all
/// agree, else their common generalized kind, else `Any`.
fn common_type<'a>(mut items: impl Iterator<Item = &'a Value>) -> Type {
    let Some(first) = items.next() else {
        return Type::Any;
    };
    let mut exact = Some(first.infer_type());
    let mut general = Some(first.infer_type().generalize());
    for item in items {
        let ty = item.infer_type();
        if exact.as_ref().is_some_and(|e| *e != ty) {
            exact = None;
        }
        if general.as_ref().is_some_and(|g| *g != ty.generalize()) {
            general = None;
        }
        if exact.is_none() && general.is_none() {
            break;
        }
    }
    exact.or(general).unwrap_or(Type::Any)
}

/// Render a float so it always reads as one (`1.0`, not `1`).
pub(crate) fn write_float(out: &mut dyn fmt::Write, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        write!(out, "{value:.1}")
    } else {
        write!(out, "{value}")
    }
}

// Exact identity, used for hash keys.

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undef, Value::Undef) | (Value::Default, Value::Default) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regexp(a), Value::Regexp(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Iterator(a), Value::Iterator(b)) => a == b,
            (Value::Runtime(a), Value::Runtime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undef | Value::Default => {}
            Value::Boolean(b) => b.hash(state),
            Value::Integer(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Regexp(r) => r.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Hash(map) => {
                // Hash equality ignores entry order, so the hash must too.
                map.len().hash(state);
                let combined = map.iter().fold(0u64, |acc, (k, v)| {
                    let mut entry = FxHasher::default();
                    k.hash(&mut entry);
                    v.hash(&mut entry);
                    acc.wrapping_add(entry.finish())
                });
                combined.hash(state);
            }
            Value::Type(ty) => ty.hash(state),
            Value::Iterator(it) => it.hash(state),
            Value::Runtime(obj) => obj.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undef => f.write_str("undef"),
            Value::Default => f.write_str("default"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::String(s) => f.write_str(s),
            Value::Regexp(r) => write!(f, "{r}"),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Hash(map) => {
                f.write_char('{')?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_char('}')
            }
            Value::Type(ty) => write!(f, "{ty}"),
            Value::Iterator(it) => write!(f, "{it}"),
            Value::Runtime(obj) => write!(f, "{obj}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::type_value(ty)
    }
}
