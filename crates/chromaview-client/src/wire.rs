//! JSON shapes returned by the Chroma REST API and their conversion into
//! domain values.

use serde::{Deserialize, Serialize};

use chromaview_core::{Item, Metadata};

/// One entry of the collection listing. Depending on the server version this
/// is either a bare name or a collection record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionEntry {
    Name(String),
    Record(CollectionModel),
    Other(serde_json::Value),
}

impl CollectionEntry {
    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name),
            Self::Record(record) => Some(record.name),
            Self::Other(_) => None,
        }
    }
}

/// Keeps listing order, drops entries without a name and repeated names.
pub fn collection_names(entries: Vec<CollectionEntry>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(entries.len());
    for name in entries.into_iter().filter_map(CollectionEntry::into_name) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionModel {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetRequest {
    pub include: Vec<&'static str>,
}

impl GetRequest {
    pub fn everything() -> Self {
        Self { include: vec!["documents", "metadatas", "embeddings"] }
    }
}

/// Result of `collection.get()`: four arrays aligned by position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetResult {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub metadatas: Option<Vec<Option<Metadata>>>,
    #[serde(default)]
    pub documents: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub embeddings: Option<Vec<Option<Vec<f64>>>>,
}

impl GetResult {
    /// Zips the parallel arrays by index. A missing array, a short array or a
    /// `null` slot all yield `None` for that field.
    pub fn into_items(self) -> Vec<Item> {
        let mut metadatas = self.metadatas.unwrap_or_default().into_iter();
        let mut documents = self.documents.unwrap_or_default().into_iter();
        let mut embeddings = self.embeddings.unwrap_or_default().into_iter();

        let mut items = Vec::with_capacity(self.ids.len());
        for id in self.ids {
            let metadata = metadatas.next().flatten();
            let document = documents.next().flatten();
            let embedding = embeddings.next().flatten();
            if id.is_empty() {
                tracing::warn!("skipping record with empty id");
                continue;
            }
            items.push(Item { id, metadata, document, embedding });
        }
        items
    }
}

/// Error body shape used by both API versions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match (self.message, self.error) {
            (Some(m), _) if !m.is_empty() => Some(m),
            (_, Some(e)) if !e.is_empty() => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaview_core::MetadataValue;

    #[test]
    fn names_from_strings_and_records() {
        let entries: Vec<CollectionEntry> = serde_json::from_str(
            r#"["plain", {"id": "1", "name": "record", "metadata": null}, {"id": "2"}, "plain"]"#,
        )
        .expect("entries");
        assert_eq!(collection_names(entries), vec!["plain".to_string(), "record".to_string()]);
    }

    #[test]
    fn zip_tolerates_short_and_missing_arrays() {
        let result: GetResult = serde_json::from_str(
            r#"{
                "ids": ["a", "b", "c"],
                "metadatas": [{"k": "v"}],
                "documents": ["one", null, "three"],
                "embeddings": null
            }"#,
        )
        .expect("get result");
        let items = result.into_items();

        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0].metadata.as_ref().and_then(|m| m.get("k")),
            Some(&MetadataValue::Str("v".into()))
        );
        assert!(items[1].metadata.is_none());
        assert!(items[2].metadata.is_none());
        assert_eq!(items[1].document, None);
        assert_eq!(items[2].document.as_deref(), Some("three"));
        assert!(items.iter().all(|i| i.embedding.is_none()));
    }

    #[test]
    fn embeddings_keep_double_precision() {
        let result: GetResult =
            serde_json::from_str(r#"{"ids": ["a"], "embeddings": [[1.0000001, 0.1234567]]}"#)
                .expect("get result");
        let items = result.into_items();

        assert_eq!(items[0].embedding, Some(vec![1.0000001, 0.1234567]));
        let json = serde_json::to_value(&items[0]).expect("item json");
        assert_eq!(json["embedding"], serde_json::json!([1.0000001, 0.1234567]));
    }

    #[test]
    fn empty_result_gives_no_items() {
        let result: GetResult = serde_json::from_str(r#"{"ids": []}"#).expect("get result");
        assert!(result.into_items().is_empty());
    }

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error": "NotFoundError", "message": "Collection x does not exist."}"#,
        )
        .expect("body");
        assert_eq!(body.into_message().as_deref(), Some("Collection x does not exist."));
    }
}
