//! The generic deferred-value handle.
//!
//! A `Deferred<T>` holds a producer callback and resolves it at most once
//! on success, routing every subsequent observable operation to the
//! cached value. Transparency is an explicit surface: `get`/`value`
//! accessors plus targeted operator implementations for equality,
//! ordering, arithmetic, display, truthiness and iteration.
//!
//! Resolution is thread-safe: the producer runs under a lock and the
//! resolved value sits behind a once-only cell, so concurrent first use
//! invokes the producer once and every thread observes the same value.

use crate::registry::{RemoteRefRegistry, Slot};
use latent_core::{Error, Result, Truthy};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

/// Producer callback for a deferred value.
///
/// `FnMut` rather than `FnOnce`: a failing producer is retried on the
/// next access, since only successful results are cached.
pub type Producer<T> = Box<dyn FnMut() -> Result<T> + Send>;

struct RemoteHandle {
    registry: RemoteRefRegistry,
    slot: Arc<Slot>,
}

/// A handle to a value that is computed on first use.
pub struct Deferred<T> {
    resolved: OnceCell<T>,
    producer: Mutex<Option<Producer<T>>>,
    remote: Option<RemoteHandle>,
}

impl<T> Deferred<T> {
    /// Create a deferred value from a producer callback.
    pub fn new(producer: impl FnMut() -> Result<T> + Send + 'static) -> Self {
        Self {
            resolved: OnceCell::new(),
            producer: Mutex::new(Some(Box::new(producer))),
            remote: None,
        }
    }

    /// Create a deferred value that also carries a pending remote-side
    /// trigger, registered with `registry` until consumed or flushed.
    pub fn with_remote_ref(
        producer: impl FnMut() -> Result<T> + Send + 'static,
        registry: &RemoteRefRegistry,
        remote: impl FnOnce() -> Result<()> + Send + 'static,
    ) -> Self {
        let slot = registry.register(Box::new(remote));
        Self {
            resolved: OnceCell::new(),
            producer: Mutex::new(Some(Box::new(producer))),
            remote: Some(RemoteHandle {
                registry: registry.clone(),
                slot,
            }),
        }
    }

    /// Resolve if needed and borrow the value.
    ///
    /// The producer runs at most once on success. A producer error
    /// propagates unmodified and is not cached, so the next access
    /// retries.
    pub fn get(&self) -> Result<&T> {
        if let Some(value) = self.resolved.get() {
            return Ok(value);
        }
        let mut producer = self.producer.lock();
        // Another thread may have resolved while we waited for the lock.
        if let Some(value) = self.resolved.get() {
            return Ok(value);
        }
        let Some(active) = producer.as_mut() else {
            return Err(Error::resolve("producer consumed with no cached value"));
        };
        let value = active()?;
        *producer = None;
        Ok(self.resolved.get_or_init(|| value))
    }

    /// Resolve if needed and borrow the value mutably.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.get()?;
        self.resolved
            .get_mut()
            .ok_or_else(|| Error::resolve("resolved value missing after resolution"))
    }

    /// Resolve if needed and clone the value out.
    pub fn value(&self) -> Result<T>
    where
        T: Clone,
    {
        Ok(self.get()?.clone())
    }

    /// Resolve if needed and take ownership of the value.
    pub fn into_inner(mut self) -> Result<T> {
        self.get()?;
        self.resolved
            .take()
            .ok_or_else(|| Error::resolve("resolved value missing after resolution"))
    }

    /// Whether the producer has already run successfully
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Borrow the value only if already resolved. Never forces.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.resolved.get()
    }

    /// Truthiness of the underlying value. Forces resolution.
    pub fn is_truthy(&self) -> Result<bool>
    where
        T: Truthy,
    {
        Ok(self.get()?.is_truthy())
    }

    /// Iterate the underlying value. Forces resolution.
    pub fn try_iter<'a>(&'a self) -> Result<<&'a T as IntoIterator>::IntoIter>
    where
        &'a T: IntoIterator,
    {
        Ok(self.get()?.into_iter())
    }

    /// Whether this handle still carries a remote reference
    #[must_use]
    pub fn has_remote_ref(&self) -> bool {
        self.remote.is_some()
    }

    /// Consume the pending remote reference: remove it from the registry
    /// (a no-op if already flushed) and invoke it at most once.
    ///
    /// Returns whether the call fired. Does not force resolution.
    pub fn trigger_remote_ref(&self) -> Result<bool> {
        let Some(handle) = &self.remote else {
            return Ok(false);
        };
        handle.registry.unregister(&handle.slot);
        match handle.slot.call.lock().take() {
            Some(call) => {
                call()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// Comparisons are value-vs-value: both sides are forced first, so a
// handle is never compared by wrapper identity against another handle.
// A resolution failure makes the comparison false/unordered rather than
// panicking inside an operator.
impl<T: PartialEq> PartialEq for Deferred<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: PartialEq> PartialEq<T> for Deferred<T> {
    fn eq(&self, other: &T) -> bool {
        self.get().map(|v| v == other).unwrap_or(false)
    }
}

impl<T: PartialOrd> PartialOrd for Deferred<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.get(), other.get()) {
            (Ok(a), Ok(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl<T: PartialOrd> PartialOrd<T> for Deferred<T> {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.get().ok()?.partial_cmp(other)
    }
}

/// Forces resolution; a producer failure surfaces as `fmt::Error`.
impl<T: fmt::Display> fmt::Display for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().map_err(|_| fmt::Error)?.fmt(f)
    }
}

/// Never forces resolution: debugging a handle must not trigger the
/// producer.
impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved.get() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<unresolved>)"),
        }
    }
}

// Arithmetic on a handle yields a Result so a producer failure reaches
// the caller instead of panicking inside the operator.
impl<T, Rhs> Add<Rhs> for &Deferred<T>
where
    T: Clone + Add<Rhs>,
{
    type Output = Result<<T as Add<Rhs>>::Output>;

    fn add(self, rhs: Rhs) -> Self::Output {
        Ok(self.get()?.clone() + rhs)
    }
}

impl<T, Rhs> Sub<Rhs> for &Deferred<T>
where
    T: Clone + Sub<Rhs>,
{
    type Output = Result<<T as Sub<Rhs>>::Output>;

    fn sub(self, rhs: Rhs) -> Self::Output {
        Ok(self.get()?.clone() - rhs)
    }
}

impl<T, Rhs> Mul<Rhs> for &Deferred<T>
where
    T: Clone + Mul<Rhs>,
{
    type Output = Result<<T as Mul<Rhs>>::Output>;

    fn mul(self, rhs: Rhs) -> Self::Output {
        Ok(self.get()?.clone() * rhs)
    }
}
