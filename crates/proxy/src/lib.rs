//! Deferred-value proxies: handles to values that have not been computed
//! yet.
//!
//! A [`Deferred`] is built from a producer callback and behaves like the
//! value the producer will return: comparisons, ordering, arithmetic,
//! display, truthiness and iteration all force resolution on first use and
//! observe the same cached value afterwards. The producer runs at most
//! once on success; a failing producer propagates its error to the caller
//! and is retried on the next access.
//!
//! A deferred value may carry a *remote reference* — a secondary callback
//! representing a pending remote side effect — tracked by an explicit,
//! injectable [`RemoteRefRegistry`] so a host can flush every outstanding
//! side effect before shutdown.
//!
//! [`TypedDeferred`] is the specialized variant that also answers
//! type-identity queries with a caller-declared type, without forcing
//! resolution.

pub mod deferred;
pub mod registry;
pub mod typed;

pub use self::{
    deferred::Deferred,
    registry::RemoteRefRegistry,
    typed::TypedDeferred,
};
