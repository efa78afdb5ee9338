//! Recursion guard for self-referential type aliases.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::{AliasDef, TypeAlias};

/// Identity of an alias definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AliasId(usize);

impl AliasId {
    pub(super) fn of(def: &Arc<AliasDef>) -> Self {
        AliasId(Arc::as_ptr(def) as usize)
    }
}

/// The aliases being expanded on the current descent.
///
/// Passed by `&mut` through every recursive type operation. An operation
/// entering an alias that is already in the set stops there and applies its
/// own revisit rule instead of recursing.
///
/// Subtyping descends into two types at once, so aliases met on the source
/// side (the type being assigned) are tracked apart from the rest. Only an
/// alias that recurs on its own side is a revisit.
#[derive(Debug, Default)]
pub struct RecursionGuard {
    active: FxHashSet<AliasId>,
    sources: FxHashSet<AliasId>,
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `alias` as being expanded. Returns `false` if it already was.
    pub fn enter(&mut self, alias: &TypeAlias) -> bool {
        self.active.insert(alias.id())
    }

    pub fn leave(&mut self, alias: &TypeAlias) {
        self.active.remove(&alias.id());
    }

    pub fn contains(&self, alias: &TypeAlias) -> bool {
        self.active.contains(&alias.id())
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.sources.is_empty()
    }

    /// Run `f` with `alias` entered, or return `revisit` without running it
    /// if `alias` is already being expanded.
    pub fn with_alias<R>(
        &mut self,
        alias: &TypeAlias,
        revisit: R,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        if !self.enter(alias) {
            tracing::trace!(alias = alias.name(), "alias revisited");
            return revisit;
        }
        let result = f(self);
        self.leave(alias);
        result
    }

    /// Like [`with_alias`](Self::with_alias), for an alias met on the source
    /// side of an assignability check.
    pub fn with_source_alias<R>(
        &mut self,
        alias: &TypeAlias,
        revisit: R,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        if !self.sources.insert(alias.id()) {
            tracing::trace!(alias = alias.name(), "source alias revisited");
            return revisit;
        }
        let result = f(self);
        self.sources.remove(&alias.id());
        result
    }
}
