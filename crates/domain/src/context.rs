//! Run-scoped variable store.
//!
//! Values extracted from responses are written here and read back by
//! interpolation and by property-value expectations. Writes are
//! last-write-wins; nothing is ever deleted during a run.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::path;

/// Mapping from variable name to the JSON value extracted for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContextStore {
    variables: IndexMap<String, Value>,
}

impl ContextStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, replacing any earlier value under the same name.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.variables.insert(name.into(), value)
    }

    /// Gets a value by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Resolves a name, falling back to a dotted path rooted at a stored key.
    ///
    /// `user.id` first looks for a variable literally named `user.id`, then
    /// for field `id` inside the variable `user`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value);
        }

        let (root, rest) = name.split_once('.')?;
        self.variables
            .get(root)
            .and_then(|value| path::lookup(value, rest))
    }

    /// Returns true if the exact name is stored.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Iterates over variables in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variables.iter()
    }

    /// Returns the number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ContextStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (name, value) in iter {
            store.insert(name, value);
        }
        store
    }
}
