//! Post-write notifying mapping wrapper.
//!
//! `NotifyingMap` owns a nested mapping and reports every write to its
//! owner, so the owner can mark state dirty the moment configuration is
//! edited. The nested tree lives inside the root wrapper and every
//! mutation flows through the root or a scoped [`NotifyingChild`] view;
//! no unwrapped nested mapping is ever reachable, so nested writes cannot
//! bypass the notification.
//!
//! Notification granularity is one call per logical mutation: `set` fires
//! once, and a bulk `update` fires once after all entries are applied,
//! not once per entry. The callback always receives the root entries.

use serde_json::{Map, Value};

type Entries = Map<String, Value>;

/// Change callback: invoked with the owner and the root entries after
/// every write.
pub type ChangeFn<O> = Box<dyn FnMut(&mut O, &Entries) + Send>;

/// A mapping wrapper that notifies an owner after every write, at any
/// nesting depth.
pub struct NotifyingMap<O> {
    owner: O,
    on_change: ChangeFn<O>,
    entries: Entries,
}

impl<O> NotifyingMap<O> {
    /// Wrap an initial mapping. Seeding does not notify.
    pub fn new(
        owner: O,
        on_change: impl FnMut(&mut O, &Entries) + Send + 'static,
        initial: Entries,
    ) -> Self {
        Self {
            owner,
            on_change: Box::new(on_change),
            entries: initial,
        }
    }

    /// Insert a value at the top level, then notify once.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
        self.notify();
    }

    /// Merge all entries from `other`, then notify exactly once.
    pub fn update(&mut self, other: Entries) {
        for (key, value) in other {
            self.entries.insert(key, value);
        }
        self.notify();
    }

    /// Read a top-level value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Scoped view over a nested mapping, or `None` if `key` is not a
    /// mapping. Writes through the view notify with the root.
    pub fn child(&mut self, key: &str) -> Option<NotifyingChild<'_, O>> {
        match self.entries.get(key) {
            Some(Value::Object(_)) => Some(NotifyingChild {
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

    fn notify(&mut self) {
        (self.on_change)(&mut self.owner, &self.entries)
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

    fn node_at_mut(&mut self, path: &[String]) -> Option<&mut Entries> {
        let mut current = &mut self.entries;
        for segment in path {
            match current.get_mut(segment) {
                Some(Value::Object(next)) => current = next,
                _ => return None,
            }
        }
        Some(current)
    }

    fn set_at(&mut self, path: &[String], key: String, value: Value) {
        if let Some(node) = self.node_at_mut(path) {
            node.insert(key, value);
            self.notify();
        }
    }

    fn update_at(&mut self, path: &[String], other: Entries) {
        if let Some(node) = self.node_at_mut(path) {
            for (key, value) in other {
                node.insert(key, value);
            }
            self.notify();
        }
    }
}

impl<O: std::fmt::Debug> std::fmt::Debug for NotifyingMap<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyingMap")
            .field("owner", &self.owner)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Scoped view over a nested mapping inside a [`NotifyingMap`].
///
/// Holds the root mutably, so the path stays valid for the view's
/// lifetime and every write lands in the root tree.
pub struct NotifyingChild<'a, O> {
    map: &'a mut NotifyingMap<O>,
    path: Vec<String>,
}

impl<'a, O> NotifyingChild<'a, O> {
    /// Insert a value at this nesting level, then notify once with the root.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.map.set_at(&self.path, key, value);
    }

    /// Merge entries at this nesting level, then notify exactly once.
    pub fn update(&mut self, other: Entries) {
        self.map.update_at(&self.path, other);
    }

    /// Read a value at this nesting level
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.node_at(&self.path).and_then(|node| node.get(key))
    }

    /// Descend one more level, or `None` if `key` is not a mapping
    pub fn child(self, key: &str) -> Option<NotifyingChild<'a, O>> {
        let is_mapping = matches!(
            self.map.node_at(&self.path).and_then(|node| node.get(key)),
            Some(Value::Object(_))
        );
        if !is_mapping {
            return None;
        }
        let mut path = self.path;
        path.push(key.to_string());
        Some(NotifyingChild {
            map: self.map,
            path,
        })
    }
}
