//! Opaque objects owned by the host runtime.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A native object handed to the language by the host (e.g. a collector).
///
/// Handles compare by identity: two handles are equal only when they share
/// one allocation.
#[derive(Clone)]
pub struct NativeHandle(Arc<dyn Any + Send + Sync>);

impl NativeHandle {
    pub fn new<T: Any + Send + Sync>(object: T) -> Self {
        NativeHandle(Arc::new(object))
    }

    /// Borrow the object as `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for NativeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for NativeHandle {}

impl Hash for NativeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.addr())
    }
}

/// A runtime object value: which runtime owns it, what it calls the type,
/// and optionally the native object itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuntimeObject {
    pub runtime_name: String,
    pub type_name: String,
    pub handle: Option<NativeHandle>,
}

impl RuntimeObject {
    pub fn new(runtime_name: impl Into<String>, type_name: impl Into<String>) -> Self {
        RuntimeObject {
            runtime_name: runtime_name.into(),
            type_name: type_name.into(),
            handle: None,
        }
    }

    #[must_use]
    pub fn with_handle(mut self, handle: NativeHandle) -> Self {
        self.handle = Some(handle);
        self
    }
}

impl fmt::Display for RuntimeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtime['{}', '{}']", self.runtime_name, self.type_name)
    }
}
