//! Evaluation context: named scopes and the active scope stack.
//!
//! Scopes live in an arena owned by the context and are addressed by
//! [`ScopeId`]. The registry maps names to ids for every named scope ever
//! pushed; the active stack records the current lexical nesting. Parent
//! links are ids too, so a scope stays reachable for inheritance lookups
//! long after it was popped.
//!
//! ```text
//! scopes:  [::] [A] [B] [<local>]
//! names:   "::" -> 0, "A" -> 1, "B" -> 2
//! stack:   [1, 2]              (root is implicit at the bottom)
//! ```

mod scope;
mod scope_guard;

use rustc_hash::FxHashMap;
use tracing::debug;

use pup_runtime::{duplicate_scope, root_scope_pop, unknown_scope, EvalError, Value};

pub use scope::{Scope, ScopeError};
pub use scope_guard::ScopedContext;

/// Registered name of the root scope.
pub const ROOT_SCOPE: &str = "::";

/// Index of a scope in its context's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root scope, present in every context.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scope registry plus active stack for one compilation unit.
#[derive(Clone, Debug)]
pub struct EvaluationContext {
    scopes: Vec<Scope>,
    names: FxHashMap<String, ScopeId>,
    /// Active scopes above the root, innermost last.
    stack: Vec<ScopeId>,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationContext {
    /// Create a context holding only the root scope.
    pub fn new() -> Self {
        let mut names = FxHashMap::default();
        names.insert(ROOT_SCOPE.to_string(), ScopeId::ROOT);
        EvaluationContext {
            scopes: vec![Scope::new(Some(ROOT_SCOPE.to_string()), None)],
            names,
            stack: Vec::new(),
        }
    }

    /// Register a named scope and make it current.
    ///
    /// The new scope's parent is `parent` when given, else the current scope.
    /// Fails without touching the context if `name` is already registered or
    /// `parent` is not.
    pub fn push(&mut self, name: &str, parent: Option<&str>) -> Result<ScopeId, EvalError> {
        if self.names.contains_key(name) {
            return Err(duplicate_scope(name));
        }
        let parent = match parent {
            Some(parent) => self.find(parent).ok_or_else(|| unknown_scope(parent))?,
            None => self.current_id(),
        };
        let id = self.alloc(Scope::new(Some(name.to_string()), Some(parent)));
        self.names.insert(name.to_string(), id);
        self.stack.push(id);
        debug!(scope = name, ?id, ?parent, depth = self.depth(), "push scope");
        Ok(id)
    }

    /// Push an unregistered scope chained to the current one (lambda bodies).
    pub fn push_local(&mut self) -> ScopeId {
        let parent = self.current_id();
        let id = self.alloc(Scope::new(None, Some(parent)));
        self.stack.push(id);
        debug!(?id, ?parent, depth = self.depth(), "push local scope");
        id
    }

    fn alloc(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(scope);
        id
    }

    /// Deactivate the current scope. The root scope cannot be popped.
    pub fn pop(&mut self) -> Result<ScopeId, EvalError> {
        let id = self.stack.pop().ok_or_else(root_scope_pop)?;
        debug!(?id, depth = self.depth(), "pop scope");
        Ok(id)
    }

    /// Id of the current scope.
    pub fn current_id(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.current_id().index()]
    }

    pub fn current_mut(&mut self) -> &mut Scope {
        let id = self.current_id();
        &mut self.scopes[id.index()]
    }

    /// Number of active scopes, root included.
    pub fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.index())
    }

    /// Find a registered scope. `""` and `"::"` both name the root.
    pub fn find(&self, name: &str) -> Option<ScopeId> {
        if name.is_empty() {
            return Some(ScopeId::ROOT);
        }
        self.names.get(name).copied()
    }

    /// Resolve a variable, `None` if it is not defined.
    ///
    /// - `x` walks the parent chain from the current scope.
    /// - `a::b::x` reads `x` from scope `a::b` only; `::x` reads the root.
    /// - `0`, `1`, ... read match captures along the parent chain; the
    ///   nearest scope that has searched decides.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        if let Some((qualifier, variable)) = name.rsplit_once("::") {
            let qualifier = qualifier.strip_prefix("::").unwrap_or(qualifier);
            let id = self.find(qualifier)?;
            return self.scope(id)?.get(variable);
        }
        if let Ok(index) = name.parse::<usize>() {
            return self
                .chain(self.current_id())
                .find_map(Scope::captures)
                .and_then(|captures| captures.get(index));
        }
        self.chain(self.current_id()).find_map(|scope| scope.get(name))
    }

    /// The scope `start` and its ancestors, innermost first.
    pub fn chain(&self, start: ScopeId) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(self.scope(start), |scope| {
            scope.parent().and_then(|parent| self.scope(parent))
        })
    }

    /// Push a named scope, popping it again when the guard drops.
    pub fn scoped(
        &mut self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<ScopedContext<'_>, EvalError> {
        let id = self.push(name, parent)?;
        Ok(ScopedContext::new(self, id))
    }

    /// Push a local scope, popping it again when the guard drops.
    pub fn scoped_local(&mut self) -> ScopedContext<'_> {
        let id = self.push_local();
        ScopedContext::new(self, id)
    }

    /// Run `f` inside a new named scope.
    pub fn with_scope<T>(
        &mut self,
        name: &str,
        parent: Option<&str>,
        f: impl FnOnce(&mut ScopedContext<'_>) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        let mut scoped = self.scoped(name, parent)?;
        f(&mut scoped)
    }

    /// Run `f` inside a new local scope.
    pub fn with_local_scope<T>(&mut self, f: impl FnOnce(&mut ScopedContext<'_>) -> T) -> T {
        let mut scoped = self.scoped_local();
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests;
