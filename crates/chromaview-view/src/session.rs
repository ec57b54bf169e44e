//! Navigation state of the viewer: URL entry, collection list, data view.
//!
//! Network calls are issued through `Ticket`s. Each ticket carries the
//! generation at which it was issued and only a completion for the newest
//! generation is applied, so a slow response for an abandoned request can
//! never overwrite what the user asked for last.

use chromaview_core::traits::CollectionSource;
use chromaview_core::types::sanitize_endpoint;
use chromaview_core::{CollectionRef, Error, Item};

use crate::pipeline::{run_pipeline, PageResult};
use crate::view_state::{ViewAction, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Url,
    Collections,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListCollections { endpoint_url: String },
    FetchItems(CollectionRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    request: Request,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Performs the request against `source`.
    pub async fn execute(self, source: &dyn CollectionSource) -> Completion {
        let outcome = match &self.request {
            Request::ListCollections { endpoint_url } => {
                Outcome::Collections(source.list_collections(endpoint_url).await)
            }
            Request::FetchItems(target) => Outcome::Items(
                source.fetch_items(&target.endpoint_url, &target.collection_name).await,
            ),
        };
        Completion { ticket: self, outcome }
    }

    pub fn complete(self, outcome: Outcome) -> Completion {
        Completion { ticket: self, outcome }
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Collections(Result<Vec<String>, Error>),
    Items(Result<Vec<Item>, Error>),
}

#[derive(Debug, Clone)]
pub struct Completion {
    ticket: Ticket,
    outcome: Outcome,
}

#[derive(Debug, Default)]
pub struct ViewerSession {
    step: Step,
    endpoint_url: Option<String>,
    collections: Vec<String>,
    selected: Option<CollectionRef>,
    items: Vec<Item>,
    view: ViewState,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    pub fn selected(&self) -> Option<&CollectionRef> {
        self.selected.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn issue(&mut self, request: Request) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ticket { generation: self.generation, request }
    }

    /// Starts listing the collections of `url`. An empty URL is reported on the
    /// session and no request is issued.
    pub fn begin_list(&mut self, url: &str) -> Option<Ticket> {
        let endpoint_url = sanitize_endpoint(url.trim());
        if endpoint_url.is_empty() {
            self.error = Some("Please enter a ChromaDB URL".to_string());
            return None;
        }
        Some(self.issue(Request::ListCollections { endpoint_url: endpoint_url.to_string() }))
    }

    /// Starts loading one collection of the connected endpoint.
    pub fn begin_fetch(&mut self, collection_name: &str) -> Option<Ticket> {
        let endpoint_url = self.endpoint_url.clone()?;
        if collection_name.is_empty() {
            return None;
        }
        Some(self.issue(Request::FetchItems(CollectionRef::new(endpoint_url, collection_name))))
    }

    /// Applies a finished request. Returns `false` when the ticket was
    /// superseded and the completion was dropped.
    pub fn finish(&mut self, completion: Completion) -> bool {
        let Completion { ticket, outcome } = completion;
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded response"
            );
            return false;
        }
        self.loading = false;
        match (ticket.request, outcome) {
            (Request::ListCollections { endpoint_url }, Outcome::Collections(Ok(names))) => {
                self.endpoint_url = Some(endpoint_url);
                self.collections = names;
                self.selected = None;
                self.items = Vec::new();
                if !self.collections.is_empty() {
                    self.step = Step::Collections;
                }
            }
            (Request::ListCollections { .. }, Outcome::Collections(Err(e))) => {
                self.error = Some(format!(
                    "Failed to fetch collections: {e}. \
                     Please check the URL and ensure ChromaDB is running."
                ));
            }
            (Request::FetchItems(target), Outcome::Items(Ok(items))) => {
                self.selected = Some(target);
                self.items = items;
                self.view = ViewState::default();
                self.step = Step::Data;
            }
            (Request::FetchItems(_), Outcome::Items(Err(e))) => {
                self.error = Some(format!("Failed to fetch collection data: {e}"));
            }
            (_, _) => {
                tracing::warn!("completion does not match its request");
                return false;
            }
        }
        true
    }

    /// One step back. Requests still in flight are abandoned.
    pub fn back(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.error = None;
        match self.step {
            Step::Data => {
                self.step = Step::Collections;
                self.selected = None;
                self.items = Vec::new();
                self.view = ViewState::default();
            }
            Step::Collections => self.step = Step::Url,
            Step::Url => {}
        }
    }

    /// Replaces the view state in response to a user interaction.
    pub fn apply(&mut self, action: ViewAction) {
        self.error = None;
        self.view = self.view.apply(action);
    }

    pub fn current_page(&self) -> PageResult<'_> {
        run_pipeline(&self.items, &self.view)
    }
}
