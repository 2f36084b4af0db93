//! Document type
//!
//! A `Document` is the user content stored in a record: an ordered mapping
//! from field name to [`Value`]. It serializes as a plain JSON object.

use crate::error::{Error, Result};
use crate::limits::{validate_depth, LimitError};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field mapping stored in a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(BTreeMap<String, Value>);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from a JSON value, which must be an object
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match Value::from(value) {
            Value::Object(map) => Ok(Document(map)),
            other => Err(Error::invalid_input(format!(
                "document must be a JSON object, got {}",
                other.type_name()
            ))),
        }
    }

    /// Parse a document from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(text)?)
    }

    /// Convert into a JSON object value
    pub fn to_json(&self) -> serde_json::Value {
        Value::Object(self.0.clone()).into()
    }

    /// Builder-style field insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a mutable field value
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the document has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge a partial document into this one
    ///
    /// Fields present in `changes` overwrite or add; absent fields are left
    /// alone. Object-valued fields merge recursively.
    pub fn merge(&mut self, changes: Document) {
        for (field, value) in changes.0 {
            match self.0.get_mut(&field) {
                Some(existing) => existing.merge(value),
                None => {
                    self.0.insert(field, value);
                }
            }
        }
    }

    /// Return a copy of this document with `changes` merged in
    pub fn merged(&self, changes: Document) -> Document {
        let mut next = self.clone();
        next.merge(changes);
        next
    }

    /// Check the nesting depth against a limit
    pub fn validate_depth(&self, max: usize) -> std::result::Result<(), LimitError> {
        validate_depth(self.0.values(), max)
    }

    /// Unwrap the field map
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for Document {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Document(map)
    }
}

impl TryFrom<serde_json::Value> for Document {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Document::from_json(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
