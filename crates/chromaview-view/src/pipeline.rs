use chromaview_core::Item;

use crate::filter::filter_items;
use crate::paginate::{page_slice, total_pages};
use crate::sort::sort_items;
use crate::view_state::ViewState;

/// What the data view renders for one `ViewState`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<'a> {
    pub page: Vec<&'a Item>,
    pub total_filtered: usize,
    pub total_pages: usize,
}

/// Filter, then sort, then paginate. Pure: `items` is only borrowed and the
/// same inputs always give the same page.
pub fn run_pipeline<'a>(items: &'a [Item], view: &ViewState) -> PageResult<'a> {
    let filtered = filter_items(items, &view.search_term);
    let sorted = sort_items(filtered, view.sort);
    PageResult {
        page: page_slice(&sorted, view).to_vec(),
        total_filtered: sorted.len(),
        total_pages: total_pages(sorted.len(), view.page_size),
    }
}
