//! Core error taxonomy and shared value traits for the `latent` workspace.
//!
//! This crate establishes the building blocks the other members lean on:
//!
//! - **`errors`**: the primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes so callers get predictable error
//!   handling across the workspace.
//! - **`truthy`**: the `Truthy` trait, giving a single definition of
//!   "truthiness" for the closed set of dynamic values the workspace
//!   handles.
//! - **`logging`**: an idempotent tracing bootstrap for binaries and tests.

pub mod errors;
pub mod logging;
pub mod truthy;

pub use self::{
    errors::{Error, Result, ResultExt},
    truthy::Truthy,
};
