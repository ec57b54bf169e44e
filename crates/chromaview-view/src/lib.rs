//! Client-side presentation of a loaded collection.
//!
//! `run_pipeline` filters, sorts and paginates an in-memory item list for a
//! given `ViewState`. `ViewerSession` keeps the surrounding navigation state
//! and discards responses to superseded requests.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod sort;
pub mod view_state;

pub use paginate::{PageLink, RangeSummary};
pub use pipeline::{run_pipeline, PageResult};
pub use session::{Completion, Outcome, Request, Step, Ticket, ViewerSession};
pub use view_state::{SortDirection, SortKey, SortSpec, ViewAction, ViewState, PAGE_SIZE_OPTIONS};
