//! Pre-write filtering mapping wrapper.
//!
//! `FilteringMap` routes every write through an owner callback before it
//! is applied. The callback sees the dotted path of the write
//! (`"section.key"` for nested writes) and either returns the
//! possibly-rewritten `(key, value)` pair to store, or `None` to drop the
//! write silently. Dropped writes leave storage untouched and raise no
//! error.
//!
//! As with [`crate::notify::NotifyingMap`], the nested tree lives inside
//! the root wrapper and nested levels are reached through scoped
//! [`FilteringChild`] views, so every write passes the filter regardless
//! of depth.

use serde_json::{Map, Value};

type Entries = Map<String, Value>;

/// Write callback: receives the owner, the dotted path of the write and
/// the proposed value; returns the pair to store or `None` to veto.
pub type WriteFn<O> = Box<dyn FnMut(&mut O, &str, Value) -> Option<(String, Value)> + Send>;

/// A mapping wrapper whose every write is vetoed or rewritten by its
/// owner before being applied.
pub struct FilteringMap<O> {
    owner: O,
    on_write: WriteFn<O>,
    entries: Entries,
}

impl<O> FilteringMap<O> {
    /// Wrap an initial mapping. Seed entries bypass the filter; only
    /// subsequent writes are routed through it.
    pub fn new(
        owner: O,
        on_write: impl FnMut(&mut O, &str, Value) -> Option<(String, Value)> + Send + 'static,
        initial: Entries,
    ) -> Self {
        Self {
            owner,
            on_write: Box::new(on_write),
            entries: initial,
        }
    }

    /// Propose a write at the top level
    pub fn set(&mut self, key: &str, value: Value) {
        self.set_at(&[], key, value);
    }

    /// Read a top-level value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Scoped view over a nested mapping, or `None` if `key` is not a
    /// mapping. Writes through the view report dotted paths.
    pub fn child(&mut self, key: &str) -> Option<FilteringChild<'_, O>> {
        match self.entries.get(key) {
            Some(Value::Object(_)) => Some(FilteringChild {
                map: self,
                path: vec![key.to_string()],
            }),
            _ => None,
        }
    }

    /// Plain snapshot of the nested mapping, carrying no wrapper behavior
    #[must_use]
    pub fn to_map(&self) -> Entries {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    fn node_at(&self, path: &[String]) -> Option<&Entries> {
        let mut current = &self.entries;
        for segment in path {
            match current.get(segment) {
                Some(Value::Object(next)) => current = next,
                _ => return None,
            }
        }
        Some(current)
    }

    fn set_at(&mut self, path: &[String], key: &str, value: Value) {
        let dotted = if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path.join("."), key)
        };
        let Some((new_key, new_value)) = (self.on_write)(&mut self.owner, &dotted, value) else {
            // Write vetoed; storage stays untouched.
            return;
        };
        let mut current = &mut self.entries;
        for segment in path {
            match current.get_mut(segment) {
                Some(Value::Object(next)) => current = next,
                _ => return,
            }
        }
        // A rewritten key lands at the level the write targeted.
        current.insert(new_key, new_value);
    }
}

impl<O: std::fmt::Debug> std::fmt::Debug for FilteringMap<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteringMap")
            .field("owner", &self.owner)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Scoped view over a nested mapping inside a [`FilteringMap`].
pub struct FilteringChild<'a, O> {
    map: &'a mut FilteringMap<O>,
    path: Vec<String>,
}

impl<'a, O> FilteringChild<'a, O> {
    /// Propose a write at this nesting level; the filter sees the full
    /// dotted path.
    pub fn set(&mut self, key: &str, value: Value) {
        self.map.set_at(&self.path, key, value);
    }

    /// Read a value at this nesting level
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.node_at(&self.path).and_then(|node| node.get(key))
    }

    /// Descend one more level, or `None` if `key` is not a mapping
    pub fn child(self, key: &str) -> Option<FilteringChild<'a, O>> {
        let is_mapping = matches!(
            self.map.node_at(&self.path).and_then(|node| node.get(key)),
            Some(Value::Object(_))
        );
        if !is_mapping {
            return None;
        }
        let mut path = self.path;
        path.push(key.to_string());
        Some(FilteringChild {
            map: self.map,
            path,
        })
    }
}
