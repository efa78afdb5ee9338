//! Runtime type descriptors and their algebra.
//!
//! Every recursive operation (`is_instance`, `is_assignable`, `write`,
//! equality, hashing) threads a [`RecursionGuard`] so a self-referential
//! alias such as `Tree = Array[Tree]` is entered at most once per descent.
//!
//! # Bounds
//!
//! Numeric ranges are inclusive and stored normalised (`from <= to`). Size
//! ranges use `usize::MAX` for an open upper bound; `i64::MIN`/`i64::MAX`
//! and the float infinities are the open numeric bounds. All of them render
//! as `default`.

mod assignable;
mod equality;
mod format;
mod generalize;
mod guard;
mod instance;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::value::{NativeHandle, RegexValue};

pub use guard::{AliasId, RecursionGuard};

/// Runtime type.
#[derive(Clone, Debug)]
pub enum Type {
    Any,
    Undef,
    Default,
    Boolean,
    Integer {
        from: i64,
        to: i64,
    },
    Float {
        from: f64,
        to: f64,
    },
    /// Integer or Float.
    Numeric,
    String {
        min: usize,
        max: usize,
        pattern: Option<RegexValue>,
    },
    Regexp(Option<RegexValue>),
    Array {
        element: Box<Type>,
        min: usize,
        max: usize,
    },
    Hash {
        key: Box<Type>,
        value: Box<Type>,
        min: usize,
        max: usize,
    },
    /// Array or Hash.
    Collection {
        min: usize,
        max: usize,
    },
    Iterator(Option<Box<Type>>),
    /// The type of type values, `Type[T]`.
    TypeOf(Option<Box<Type>>),
    /// Host runtime objects. Empty names match any name.
    Runtime {
        runtime_name: String,
        type_name: String,
        object: Option<NativeHandle>,
    },
    Resource {
        type_name: Option<String>,
        title: Option<String>,
    },
    Class {
        title: Option<String>,
    },
    Alias(TypeAlias),
}

static ANY: Type = Type::Any;

impl Type {
    pub fn integer() -> Self {
        Type::Integer {
            from: i64::MIN,
            to: i64::MAX,
        }
    }

    /// `Integer[from, to]`; reversed bounds describe the same range.
    pub fn integer_range(from: i64, to: i64) -> Self {
        Type::Integer {
            from: from.min(to),
            to: from.max(to),
        }
    }

    pub fn float() -> Self {
        Type::Float {
            from: f64::NEG_INFINITY,
            to: f64::INFINITY,
        }
    }

    /// `Float[from, to]`; reversed bounds describe the same range.
    pub fn float_range(from: f64, to: f64) -> Self {
        Type::Float {
            from: from.min(to),
            to: from.max(to),
        }
    }

    pub fn string() -> Self {
        Type::string_sized(0, usize::MAX)
    }

    pub fn string_sized(min: usize, max: usize) -> Self {
        Type::String {
            min: min.min(max),
            max: min.max(max),
            pattern: None,
        }
    }

    /// Strings the pattern matches somewhere.
    pub fn string_matching(pattern: RegexValue) -> Self {
        Type::String {
            min: 0,
            max: usize::MAX,
            pattern: Some(pattern),
        }
    }

    pub fn regexp() -> Self {
        Type::Regexp(None)
    }

    pub fn array(element: Type) -> Self {
        Type::array_sized(element, 0, usize::MAX)
    }

    pub fn array_sized(element: Type, min: usize, max: usize) -> Self {
        Type::Array {
            element: Box::new(element),
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn hash(key: Type, value: Type) -> Self {
        Type::hash_sized(key, value, 0, usize::MAX)
    }

    pub fn hash_sized(key: Type, value: Type, min: usize, max: usize) -> Self {
        Type::Hash {
            key: Box::new(key),
            value: Box::new(value),
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn collection() -> Self {
        Type::collection_sized(0, usize::MAX)
    }

    pub fn collection_sized(min: usize, max: usize) -> Self {
        Type::Collection {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn iterator(element: Option<Type>) -> Self {
        Type::Iterator(element.map(Box::new))
    }

    pub fn type_of(inner: Option<Type>) -> Self {
        Type::TypeOf(inner.map(Box::new))
    }

    pub fn runtime(runtime_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Type::Runtime {
            runtime_name: runtime_name.into(),
            type_name: type_name.into(),
            object: None,
        }
    }

    /// The type whose only instance is the runtime object holding `object`.
    pub fn runtime_object(object: NativeHandle) -> Self {
        Type::Runtime {
            runtime_name: String::new(),
            type_name: String::new(),
            object: Some(object),
        }
    }

    pub fn resource(type_name: Option<&str>, title: Option<&str>) -> Self {
        Type::Resource {
            type_name: type_name.map(str::to_owned),
            title: title.map(str::to_owned),
        }
    }

    pub fn class(title: Option<&str>) -> Self {
        Type::Class {
            title: title.map(str::to_owned),
        }
    }

    /// Integer bounds when neither end is open.
    pub fn enumerable_range(&self) -> Option<(i64, i64)> {
        match self.resolved() {
            Type::Integer { from, to } if *from != i64::MIN && *to != i64::MAX => {
                Some((*from, *to))
            }
            _ => None,
        }
    }

    /// Follow alias chains to a concrete type.
    ///
    /// An unresolved alias, or a chain of aliases that loops back on itself
    /// without reaching a concrete type, resolves to `Any`.
    pub fn resolved(&self) -> &Type {
        let mut current = self;
        let mut guard = RecursionGuard::new();
        while let Type::Alias(alias) = current {
            if !guard.enter(alias) {
                return &ANY;
            }
            match alias.target() {
                Some(target) => current = target,
                None => return &ANY,
            }
        }
        current
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, false, &mut RecursionGuard::new())
    }
}

struct AliasDef {
    name: String,
    target: OnceLock<Type>,
}

/// A named type whose definition is supplied after creation, so it can
/// refer to itself.
///
/// Clones share one definition. Identity (for the recursion guard) is that
/// shared definition, not the name.
///
/// A self-referential alias holds a reference cycle and is never freed.
/// Aliases are defined once per compilation, so this is bounded.
#[derive(Clone)]
pub struct TypeAlias(Arc<AliasDef>);

impl TypeAlias {
    /// An alias with no definition yet. Until resolved it behaves as `Any`.
    pub fn new(name: impl Into<String>) -> Self {
        TypeAlias(Arc::new(AliasDef {
            name: name.into(),
            target: OnceLock::new(),
        }))
    }

    /// Supply the definition. Fails (returning `target`) if already resolved.
    pub fn resolve(&self, target: Type) -> Result<(), Type> {
        self.0.target.set(target)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn target(&self) -> Option<&Type> {
        self.0.target.get()
    }

    pub fn id(&self) -> AliasId {
        AliasId::of(&self.0)
    }

    /// Whether both handles refer to the same definition.
    pub fn ptr_eq(&self, other: &TypeAlias) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeAlias({})", self.0.name)
    }
}

impl From<TypeAlias> for Type {
    fn from(alias: TypeAlias) -> Self {
        Type::Alias(alias)
    }
}
