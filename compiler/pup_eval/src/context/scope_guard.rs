//! RAII guard pairing every scope push with a pop.
//!
//! A construct that pushes a scope for its body must pop it on every exit
//! path, including `?` early returns out of the body. The guard holds
//! `&mut EvaluationContext` and implements `Deref`/`DerefMut`, so the body
//! uses it exactly like the context itself.
//!
//! ```text
//! {
//!     let mut scoped = context.scoped("Foo", None)?;
//!     scoped.current_mut().set("x", value)?;
//!     body(&mut scoped)?;
//! } // "Foo" popped here, on success or error
//! ```

use std::ops::{Deref, DerefMut};

use tracing::warn;

use super::{EvaluationContext, ScopeId};

/// Guard that pops the scope it pushed when dropped.
pub struct ScopedContext<'ctx> {
    context: &'ctx mut EvaluationContext,
    id: ScopeId,
}

impl<'ctx> ScopedContext<'ctx> {
    pub(super) fn new(context: &'ctx mut EvaluationContext, id: ScopeId) -> Self {
        ScopedContext { context, id }
    }

    /// Id of the scope this guard owns.
    pub fn id(&self) -> ScopeId {
        self.id
    }
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        // The body may have popped the guarded scope itself; never pop past it.
        if self.context.current_id() == self.id {
            let _ = self.context.pop();
        } else {
            warn!(id = ?self.id, current = ?self.context.current_id(), "scope guard out of order");
        }
    }
}

impl Deref for ScopedContext<'_> {
    type Target = EvaluationContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}
