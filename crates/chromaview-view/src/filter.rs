use chromaview_core::Item;

/// Case-insensitive substring match against the id, the document, metadata
/// keys and textual metadata values. Numbers and booleans are never matched.
///
/// `needle` must already be lowercased.
pub fn matches(item: &Item, needle: &str) -> bool {
    if item.id.to_lowercase().contains(needle) {
        return true;
    }
    if item.document.as_deref().is_some_and(|d| d.to_lowercase().contains(needle)) {
        return true;
    }
    item.metadata.as_ref().is_some_and(|metadata| {
        metadata.iter().any(|(key, value)| {
            key.to_lowercase().contains(needle)
                || value.as_str().is_some_and(|v| v.to_lowercase().contains(needle))
        })
    })
}

/// Items passing the search term, in input order. A blank term passes everything.
pub fn filter_items<'a>(items: &'a [Item], search_term: &str) -> Vec<&'a Item> {
    if search_term.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = search_term.to_lowercase();
    items.iter().filter(|item| matches(item, &needle)).collect()
}
