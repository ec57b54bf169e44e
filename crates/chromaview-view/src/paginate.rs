use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;

use crate::view_state::ViewState;

/// `ceil(total / page_size)`, never less than one.
pub fn total_pages(total: usize, page_size: NonZeroUsize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// The rows of the current page; pages past the end are empty.
pub fn page_slice<'s, T>(rows: &'s [T], view: &ViewState) -> &'s [T] {
    let start = view.offset().min(rows.len());
    let end = start.saturating_add(view.page_size.get()).min(rows.len());
    &rows[start..end]
}

/// One control of the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page controls around `current`: its neighbours, the first and the last page,
/// and an ellipsis wherever more than one page is skipped.
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let lo = current.saturating_sub(1).max(1);
    let hi = (current + 1).min(total);

    let mut links = Vec::new();
    if lo > 1 {
        links.push(PageLink::Page(1));
        match lo {
            3 => links.push(PageLink::Page(2)),
            l if l > 3 => links.push(PageLink::Ellipsis),
            _ => {}
        }
    }
    links.extend((lo..=hi).map(PageLink::Page));
    if hi < total {
        match total - hi {
            2 => links.push(PageLink::Page(total - 1)),
            gap if gap > 2 => links.push(PageLink::Ellipsis),
            _ => {}
        }
        links.push(PageLink::Page(total));
    }
    links
}

/// Bounds of the visible rows, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

impl RangeSummary {
    /// `None` when the current page holds no rows.
    pub fn for_view(view: &ViewState, total: usize) -> Option<Self> {
        let offset = view.offset();
        if offset >= total {
            return None;
        }
        let last = offset.saturating_add(view.page_size.get()).min(total);
        Some(Self { first: offset + 1, last, total })
    }
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {}-{} of {} items", self.first, self.last, self.total)
    }
}
