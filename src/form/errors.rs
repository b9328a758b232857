use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Sparse field -> message map. A missing key and an empty message both mean
/// the field is valid; empty messages are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord> {
    entries: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.entries.remove(&field);
        } else {
            self.entries.insert(field, message);
        }
    }

    /// Replaces the entry for `field` with whatever `source` holds for it.
    pub fn copy_field_from(&mut self, source: &FieldErrors<F>, field: F) {
        match source.get(field) {
            Some(message) => self.insert(field, message),
            None => {
                self.entries.remove(&field);
            }
        }
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: F) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.entries.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Fields the user has left at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touched<F: Ord> {
    fields: BTreeSet<F>,
}

impl<F: Ord> Default for Touched<F> {
    fn default() -> Self {
        Self {
            fields: BTreeSet::new(),
        }
    }
}

impl<F: Ord + Copy> Touched<F> {
    pub fn mark(&mut self, field: F) {
        self.fields.insert(field);
    }

    pub fn mark_all(&mut self, fields: &[F]) {
        self.fields.extend(fields.iter().copied());
    }

    pub fn contains(&self, field: F) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
