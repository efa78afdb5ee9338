//! A single scope: variable table, parent link and match captures.

use std::fmt;

use rustc_hash::FxHashMap;

use pup_runtime::{reassignment, EvalError, Value};

use super::ScopeId;

/// Error returned by [`Scope::set`].
///
/// Converted into an [`EvalError`] with `?` once the caller has a span to
/// attach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// The variable is already assigned in this scope.
    Reassignment { name: String },
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::Reassignment { name } => write!(f, "cannot reassign variable '${name}'"),
        }
    }
}

impl std::error::Error for ScopeError {}

impl From<ScopeError> for EvalError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::Reassignment { name } => reassignment(&name),
        }
    }
}

/// A variable table with an optional parent for lookup delegation.
#[derive(Clone, Debug)]
pub struct Scope {
    /// `None` for local (lambda body) scopes, which are never registered.
    name: Option<String>,
    parent: Option<ScopeId>,
    variables: FxHashMap<String, Value>,
    /// Groups of the last regex search in this scope, `$0` first.
    ///
    /// `Some(empty)` after a failed search: it hides captures further up the
    /// chain rather than falling through to them.
    captures: Option<Vec<Value>>,
}

impl Scope {
    pub(super) fn new(name: Option<String>, parent: Option<ScopeId>) -> Self {
        Scope {
            name,
            parent,
            variables: FxHashMap::default(),
            captures: None,
        }
    }

    /// The registered name, or `None` for a local scope.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Look up a variable in this scope only.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Assign a variable. Variables are single-assignment per scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Result<(), ScopeError> {
        use std::collections::hash_map::Entry;

        match self.variables.entry(name.into()) {
            Entry::Occupied(slot) => Err(ScopeError::Reassignment {
                name: slot.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Number of variables assigned in this scope.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Captures published by the last search in this scope, if any.
    pub fn captures(&self) -> Option<&[Value]> {
        self.captures.as_deref()
    }

    /// Publish the groups of a successful search.
    pub fn set_captures(&mut self, captures: Vec<Value>) {
        self.captures = Some(captures);
    }

    /// Forget captures after a failed (or empty-pattern) search.
    pub fn clear_captures(&mut self) {
        self.captures = Some(Vec::new());
    }
}
