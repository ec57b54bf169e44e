use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use chromaview_core::{Item, Metadata};

use crate::view_state::{SortDirection, SortKey, SortSpec};

/// JSON form of an empty string, used as the sort text of a missing document.
const EMPTY_DOCUMENT_KEY: &str = "\"\"";

/// The string an item is ordered by under `key`.
pub fn sort_text(item: &Item, key: SortKey) -> String {
    match key {
        SortKey::Id => item.id.clone(),
        SortKey::Document => {
            item.document.clone().unwrap_or_else(|| EMPTY_DOCUMENT_KEY.to_string())
        }
        SortKey::Metadata => match &item.metadata {
            Some(metadata) => canonical_json(metadata),
            None => canonical_json(&Metadata::new()),
        },
    }
}

fn canonical_json(metadata: &Metadata) -> String {
    // Keys of a BTreeMap serialize in sorted order.
    serde_json::to_string(metadata).unwrap_or_default()
}

/// Ordering class of a base character: whitespace, then punctuation and
/// symbols, then digits, then letters.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

/// Root-locale collation key built from the NFD form of a string.
///
/// Levels compare in order: base letters case-folded, then the accents on
/// each base letter (unaccented first), then case (lowercase first), then
/// code points so only identical strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(u8, char)>,
    secondary: Vec<Vec<char>>,
    tertiary: Vec<bool>,
    text: String,
}

impl CollationKey {
    pub fn new(s: &str) -> Self {
        let mut primary = Vec::new();
        let mut secondary: Vec<Vec<char>> = Vec::new();
        let mut tertiary = Vec::new();
        for c in s.nfd() {
            if is_combining_mark(c) {
                if let Some(marks) = secondary.last_mut() {
                    marks.push(c);
                    continue;
                }
            }
            primary.extend(c.to_lowercase().map(|l| (char_class(l), l)));
            secondary.push(Vec::new());
            tertiary.push(c.is_uppercase());
        }
        Self { primary, secondary, tertiary, text: s.to_string() }
    }
}

/// Locale-aware comparison of two strings.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Stable sort of the filtered items. Equal sort texts keep their input order
/// in both directions.
pub fn sort_items<'a>(items: Vec<&'a Item>, spec: Option<SortSpec>) -> Vec<&'a Item> {
    let Some(spec) = spec else {
        return items;
    };
    let mut keyed: Vec<(CollationKey, &'a Item)> = items
        .into_iter()
        .map(|item| (CollationKey::new(&sort_text(item, spec.key)), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}
