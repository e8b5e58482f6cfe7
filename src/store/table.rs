//! Keyed multi-row table.

use std::collections::BTreeMap;

/// An ordered keyed table.
///
/// Rows are created with [`Table::emplace`], changed in place with
/// [`Table::modify`], and removed with [`Table::erase`].  Iteration is in
/// key order, which keeps query results deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<K, V> {
    rows: BTreeMap<K, V>,
}

impl<K: Ord, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V> Table<K, V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the row stored under `key`.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    /// Returns `true` if a row exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    /// Inserts a new row.  Returns `false` and leaves the table unchanged
    /// if the key is already taken.
    pub fn emplace(&mut self, key: K, row: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        self.rows.insert(key, row);
        true
    }

    /// Inserts or replaces the row under `key`.
    pub fn upsert(&mut self, key: K, row: V) {
        self.rows.insert(key, row);
    }

    /// Applies `f` to the row under `key`.  Returns `None` if there is no
    /// such row.
    pub fn modify<R>(&mut self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.rows.get_mut(key).map(f)
    }

    /// Removes and returns the row under `key`.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        self.rows.remove(key)
    }

    /// Iterates rows in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
