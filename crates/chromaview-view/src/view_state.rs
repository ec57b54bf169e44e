use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Document,
    Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Search, sort and pagination parameters of one collection view.
///
/// Treated as an immutable value: every interaction produces a new `ViewState`
/// through one of the transition methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_term: String,
    /// `None` keeps the remote order.
    pub sort: Option<SortSpec>,
    pub page_size: NonZeroUsize,
    pub page_number: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_number: NonZeroUsize::MIN,
        }
    }
}

/// A single user interaction with the data view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Search(String),
    ToggleSort(SortKey),
    PageSize(NonZeroUsize),
    GoToPage(usize),
}

impl ViewState {
    /// New search term; back to the first page.
    #[must_use]
    pub fn with_search_term(&self, term: impl Into<String>) -> Self {
        Self { search_term: term.into(), page_number: NonZeroUsize::MIN, ..self.clone() }
    }

    /// New page size; back to the first page.
    #[must_use]
    pub fn with_page_size(&self, page_size: NonZeroUsize) -> Self {
        Self { page_size, page_number: NonZeroUsize::MIN, ..self.clone() }
    }

    /// Clicking the header of the active column flips its direction; any other
    /// column becomes the active one, ascending.
    #[must_use]
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        let sort = match self.sort {
            Some(spec) if spec.key == key => SortSpec { key, direction: spec.direction.flipped() },
            _ => SortSpec { key, direction: SortDirection::Ascending },
        };
        Self { sort: Some(sort), ..self.clone() }
    }

    /// Page 0 is treated as page 1.
    #[must_use]
    pub fn with_page(&self, page: usize) -> Self {
        Self { page_number: NonZeroUsize::new(page).unwrap_or(NonZeroUsize::MIN), ..self.clone() }
    }

    #[must_use]
    pub fn apply(&self, action: ViewAction) -> Self {
        match action {
            ViewAction::Search(term) => self.with_search_term(term),
            ViewAction::ToggleSort(key) => self.toggle_sort(key),
            ViewAction::PageSize(size) => self.with_page_size(size),
            ViewAction::GoToPage(page) => self.with_page(page),
        }
    }

    /// Offset of the first row of the current page.
    pub fn offset(&self) -> usize {
        (self.page_number.get() - 1).saturating_mul(self.page_size.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn defaults() {
        let v = ViewState::default();
        assert_eq!(v.search_term, "");
        assert_eq!(v.sort, None);
        assert_eq!(v.page_size.get(), 10);
        assert_eq!(v.page_number.get(), 1);
        assert!(PAGE_SIZE_OPTIONS.contains(&v.page_size.get()));
    }

    #[test]
    fn search_and_page_size_reset_the_page() {
        let v = ViewState::default().with_page(4);
        assert_eq!(v.with_search_term("cat").page_number.get(), 1);
        assert_eq!(v.with_page_size(nz(25)).page_number.get(), 1);
        assert_eq!(v.toggle_sort(SortKey::Id).page_number.get(), 4, "sorting keeps the page");
    }

    #[test]
    fn toggle_sort_flips_then_switches() {
        let v = ViewState::default().toggle_sort(SortKey::Id);
        let ascending = |key| Some(SortSpec { key, direction: SortDirection::Ascending });
        assert_eq!(v.sort, ascending(SortKey::Id));
        let v = v.toggle_sort(SortKey::Id);
        assert_eq!(v.sort.map(|s| s.direction), Some(SortDirection::Descending));
        let v = v.toggle_sort(SortKey::Metadata);
        assert_eq!(v.sort, ascending(SortKey::Metadata));
    }

    #[test]
    fn page_zero_becomes_one() {
        assert_eq!(ViewState::default().with_page(0).page_number.get(), 1);
        assert_eq!(ViewState::default().apply(ViewAction::GoToPage(3)).offset(), 20);
    }
}
