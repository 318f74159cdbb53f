// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

//! Ordered column-name to value map used to build rows.

use std::collections::HashMap;
use std::fmt;

use crate::value::{Value, ValueType};

/// Row content keyed by column name.
///
/// Iteration follows first-insertion order, which is also the order in which
/// INSERT and UPDATE statements list their columns and bind their values.
/// Re-inserting an existing key replaces the value but keeps its position.
#[derive(Clone, Default, PartialEq)]
pub struct Content {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or replace `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn insert_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.insert(key, Value::Text(text.into()));
    }

    pub fn insert_int(&mut self, key: impl Into<String>, i: i64) {
        self.insert(key, Value::Integer(i));
    }

    pub fn insert_real(&mut self, key: impl Into<String>, r: f64) {
        self.insert(key, Value::Real(r));
    }

    pub fn insert_blob(&mut self, key: impl Into<String>, blob: impl Into<Vec<u8>>) {
        self.insert(key, Value::Blob(blob.into()));
    }

    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.insert(key, Value::Null);
    }

    /// Remove `key`. Remaining keys keep their relative order.
    pub fn erase(&mut self, key: &str) -> Option<Value> {
        let pos = self.index.remove(key)?;
        let (_, value) = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn value_type(&self, key: &str) -> Option<ValueType> {
        self.get(key).map(Value::value_type)
    }

    /// Text stored under `key`; `None` if absent or not text.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Integer stored under `key`; `None` if absent or not an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// Real stored under `key`; `None` if absent or not a real.
    pub fn get_real(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_real)
    }

    pub fn get_blob(&self, key: &str) -> Option<&[u8]> {
        self.get(key).and_then(Value::as_blob)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Borrowing iterator over `(key, value)` pairs in insertion order.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (String, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Content {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Content {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Content {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut content = Content::new();
        content.extend(iter);
        content
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
