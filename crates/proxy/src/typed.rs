//! Deferred values that masquerade as a declared type.
//!
//! Downstream code often checks "is this an X?" before using a value. A
//! `TypedDeferred<T>` answers that question with its declared type `T`
//! without forcing resolution, where the plain handle would have to
//! resolve first. The declared type is an explicit accessor: call sites
//! that would otherwise rely on structural identity ask
//! `declared_type()` / `is::<U>()` instead.
//!
//! Unlike [`Deferred::with_remote_ref`](crate::Deferred::with_remote_ref),
//! a typed handle is built from a producer only and never touches the
//! remote-reference registry.

use crate::deferred::Deferred;
use latent_core::Result;
use std::any::{type_name, TypeId};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// A deferred value carrying a static declared type for identity checks.
pub struct TypedDeferred<T: 'static> {
    inner: Deferred<T>,
}

impl<T: 'static> TypedDeferred<T> {
    /// Create a typed deferred value from a producer callback.
    pub fn new(producer: impl FnMut() -> Result<T> + Send + 'static) -> Self {
        Self {
            inner: Deferred::new(producer),
        }
    }

    /// The declared type. Never forces resolution.
    #[must_use]
    pub fn declared_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    /// Human-readable name of the declared type. Never forces resolution.
    #[must_use]
    pub fn declared_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    /// Identity check against the declared type. Never forces resolution.
    #[must_use]
    pub fn is<U: 'static>(&self) -> bool {
        TypeId::of::<U>() == TypeId::of::<T>()
    }

    /// Strip the declared-type layer, keeping resolution state.
    #[must_use]
    pub fn into_deferred(self) -> Deferred<T> {
        self.inner
    }
}

impl<T: 'static> Deref for TypedDeferred<T> {
    type Target = Deferred<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: 'static> DerefMut for TypedDeferred<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for TypedDeferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDeferred")
            .field("declared", &self.declared_type_name())
            .field("inner", &self.inner)
            .finish()
    }
}
