//! Domain types shared by the client, the presentation pipeline and the server.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type ItemId = String;

/// Metadata of one item. Keys are kept sorted so the JSON form is canonical.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A scalar metadata value as stored by Chroma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl MetadataValue {
    /// Returns the text of a string value; other scalars have none.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for MetadataValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One record of a collection.
///
/// - `id`: unique within the collection, never empty
/// - `document`: the stored text, if any
/// - `metadata`: scalar key/value pairs, if any
/// - `embedding`: the stored vector, if it was returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub embedding: Option<Vec<f64>>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into(), metadata: None, document: None, embedding: None }
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_metadata<K, V, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.metadata = Some(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f64>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// Identifies the remote collection currently loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionRef {
    pub endpoint_url: String,
    pub collection_name: String,
}

impl CollectionRef {
    pub fn new(endpoint_url: impl AsRef<str>, collection_name: impl Into<String>) -> Self {
        Self {
            endpoint_url: sanitize_endpoint(endpoint_url.as_ref()).to_string(),
            collection_name: collection_name.into(),
        }
    }
}

/// Drops one trailing `/` from a user-typed endpoint URL.
pub fn sanitize_endpoint(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_values_deserialize_from_plain_json() {
        let m: Metadata = serde_json::from_str(r#"{"a":"x","b":3,"c":1.5,"d":true,"e":null}"#)
            .expect("metadata");
        assert_eq!(m["a"], MetadataValue::Str("x".into()));
        assert_eq!(m["b"], MetadataValue::Int(3));
        assert_eq!(m["c"], MetadataValue::Float(1.5));
        assert_eq!(m["d"], MetadataValue::Bool(true));
        assert_eq!(m["e"], MetadataValue::Null);
    }

    #[test]
    fn item_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(Item::new("a")).expect("json");
        assert_eq!(
            json,
            serde_json::json!({"id": "a", "metadata": null, "document": null, "embedding": null})
        );
    }

    #[test]
    fn item_deserializes_with_missing_fields() {
        let item: Item = serde_json::from_str(r#"{"id":"x","document":"hi"}"#).expect("item");
        assert_eq!(item, Item::new("x").with_document("hi"));
    }

    #[test]
    fn sanitize_endpoint_strips_one_trailing_slash() {
        assert_eq!(sanitize_endpoint("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(sanitize_endpoint("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(CollectionRef::new("http://h/", "c").endpoint_url, "http://h");
    }
}
