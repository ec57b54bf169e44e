//! Text the data table shows for individual fields.

use chromaview_core::{Item, Metadata};

/// Components shown before an embedding preview is cut off.
pub const EMBEDDING_PREVIEW_LEN: usize = 10;

/// `[c0, c1, ..., c9, ...] (N dimensions)` for long vectors, every component
/// otherwise.
pub fn embedding_preview(embedding: &[f64]) -> String {
    let shown: Vec<String> =
        embedding.iter().take(EMBEDDING_PREVIEW_LEN).map(f64::to_string).collect();
    let more = if embedding.len() > EMBEDDING_PREVIEW_LEN { ", ..." } else { "" };
    format!("[{}{}] ({} dimensions)", shown.join(", "), more, embedding.len())
}

/// Pretty-printed metadata, or `null` when there is none.
pub fn format_metadata(metadata: Option<&Metadata>) -> String {
    match metadata {
        Some(m) => serde_json::to_string_pretty(m).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    }
}

pub fn document_cell(item: &Item) -> &str {
    match item.document.as_deref() {
        Some(d) if !d.is_empty() => d,
        _ => "N/A",
    }
}
