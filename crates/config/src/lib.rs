//! Type-casting, shape utilities and mutation-intercepting mapping
//! wrappers for nested configuration trees.
//!
//! Configuration values travel as `serde_json::Value`, which fixes the
//! dynamic value set at the boundary: scalars, sequences and mappings.
//! On top of that this crate provides:
//!
//! - **`cast`**: string/tag round-tripping for typed values (`type_tag`,
//!   `cast_from_tag`) with a degrade-and-warn failure policy.
//! - **`flatten`**: path-keyed flattening and reconstruction of nested
//!   mappings plus a leaf-rewriting visitor.
//! - **`notify`**: a mapping wrapper that reports every write, at any
//!   nesting depth, to an owner exactly once per logical mutation.
//! - **`filter`**: a mapping wrapper whose writes are vetoed or rewritten
//!   by an owner callback before they are applied.

pub mod cast;
pub mod filter;
pub mod flatten;
pub mod notify;

pub use self::{
    cast::{cast_from_tag, is_primitive_tree, parse_bool, type_tag, TagKind},
    filter::FilteringMap,
    flatten::{flatten, map_leaves, naive_unflatten, unflatten},
    notify::NotifyingMap,
};
