//! Insertion-ordered parameter maps.
//!
//! Target declarations are small (tens of keys), so the map is a plain
//! ordered vector of entries. Insertion order is load-bearing: when
//! platform merging or combining folds two keys together, the earlier key
//! keeps its position and the later values append to it, which makes the
//! resolved parameter lists deterministic.
//!
//! # Example
//!
//! ```rust
//! use girder_core::{ParamMap, ParamValue};
//!
//! let mut params = ParamMap::new();
//! params.insert("libs", ParamValue::list(["jingle"]));
//! params.merge("libs", ParamValue::list(["expat"]));
//! assert_eq!(params.get("libs"), Some(&ParamValue::list(["jingle", "expat"])));
//! ```

use crate::value::ParamValue;

/// A string-keyed parameter map preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, ParamValue)>,
}

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        ParamMap::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Insert or replace a value. Replacement keeps the key's original
    /// position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove and return a value, or `None` if the key is absent. This is
    /// how control keys are consumed so they never leak into the
    /// environment.
    pub fn take(&mut self, key: &str) -> Option<ParamValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Remove a flag key. Absent or non-boolean keys read as `false`.
    pub fn take_bool(&mut self, key: &str) -> bool {
        self.take(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Remove a list key, coercing a scalar string to a one-element list.
    pub fn take_list(&mut self, key: &str) -> Option<Vec<String>> {
        self.take(key).and_then(ParamValue::into_list)
    }

    /// Remove a string key.
    pub fn take_str(&mut self, key: &str) -> Option<String> {
        match self.take(key) {
            Some(ParamValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Merge a value under `key`: insert when absent, otherwise append via
    /// [`ParamValue::concat`].
    pub fn merge(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => {
                let current = std::mem::replace(&mut self.entries[i].1, ParamValue::Bool(false));
                self.entries[i].1 = current.concat(value);
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Merge a value under `key` with the new values placed first.
    pub fn merge_front(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => {
                let current = std::mem::replace(&mut self.entries[i].1, ParamValue::Bool(false));
                self.entries[i].1 = current.concat_front(value);
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Move a value from `old` to `new`, merging with any existing value
    /// under `new`.
    pub fn rename(&mut self, old: &str, new: &str) {
        if let Some(value) = self.take(old) {
            self.merge(new, value);
        }
    }

    /// Union two maps into a new one, without mutating either input.
    ///
    /// Keys present in both concatenate `self`'s values before `other`'s
    /// and keep `self`'s position; keys only in `other` follow in `other`'s
    /// order.
    pub fn combine(&self, other: &ParamMap) -> ParamMap {
        let mut result = self.clone();
        for (key, value) in &other.entries {
            result.merge(key.clone(), value.clone());
        }
        result
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = ParamMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
