use async_trait::async_trait;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use chromaview_core::traits::CollectionSource;
use chromaview_core::{Error, Item, Result};
use chromaview_view::{Outcome, Request, Step, ViewAction, ViewerSession};

struct FakeSource {
    collections: Vec<String>,
    data: HashMap<String, Vec<Item>>,
}

impl FakeSource {
    fn new() -> Self {
        let mut data = HashMap::new();
        let animals: Vec<Item> = (0..30).map(|i| Item::new(format!("a-{i:02}"))).collect();
        data.insert("animals".to_string(), animals);
        data.insert("plants".to_string(), vec![Item::new("p-1").with_document("fern")]);
        Self { collections: vec!["animals".to_string(), "plants".to_string()], data }
    }
}

#[async_trait]
impl CollectionSource for FakeSource {
    async fn list_collections(&self, endpoint_url: &str) -> Result<Vec<String>> {
        if endpoint_url == "http://down:8000" {
            return Err(Error::connection("connection refused"));
        }
        Ok(self.collections.clone())
    }

    async fn fetch_items(&self, _endpoint_url: &str, collection_name: &str) -> Result<Vec<Item>> {
        self.data
            .get(collection_name)
            .cloned()
            .ok_or_else(|| {
                Error::connection(format!("Collection {collection_name} does not exist."))
            })
    }
}

async fn connect(session: &mut ViewerSession, source: &FakeSource, url: &str) -> bool {
    let ticket = session.begin_list(url).expect("ticket");
    session.finish(ticket.execute(source).await)
}

#[tokio::test]
async fn walks_url_collections_data_and_back() -> anyhow::Result<()> {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    assert_eq!(session.step(), Step::Url);

    assert!(connect(&mut session, &source, "http://localhost:8000/").await);
    assert_eq!(session.step(), Step::Collections);
    assert_eq!(session.endpoint_url(), Some("http://localhost:8000"));
    assert_eq!(session.collections(), ["animals".to_string(), "plants".to_string()]);

    let ticket = session.begin_fetch("animals").expect("ticket");
    assert!(session.is_loading());
    assert!(session.finish(ticket.execute(&source).await));
    assert_eq!(session.step(), Step::Data);
    assert!(!session.is_loading());
    assert_eq!(session.current_page().total_pages, 3);

    session.back();
    assert_eq!(session.step(), Step::Collections);
    assert!(session.items().is_empty());
    session.back();
    assert_eq!(session.step(), Step::Url);
    Ok(())
}

#[test]
fn empty_url_sets_an_error_without_a_request() {
    let mut session = ViewerSession::new();
    assert!(session.begin_list("  ").is_none());
    assert_eq!(session.error(), Some("Please enter a ChromaDB URL"));
    assert!(!session.is_loading());
}

#[tokio::test]
async fn listing_failure_is_reported_and_cleared_by_next_action() {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    assert!(connect(&mut session, &source, "http://down:8000").await);
    assert_eq!(session.step(), Step::Url);
    assert_eq!(
        session.error(),
        Some(
            "Failed to fetch collections: ChromaDB client error: connection refused. \
             Please check the URL and ensure ChromaDB is running."
        )
    );

    assert!(connect(&mut session, &source, "http://localhost:8000").await);
    assert_eq!(session.error(), None);
}

#[tokio::test]
async fn fetch_failure_keeps_the_collection_step() {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    connect(&mut session, &source, "http://localhost:8000").await;

    let ticket = session.begin_fetch("missing").expect("ticket");
    session.finish(ticket.execute(&source).await);
    assert_eq!(session.step(), Step::Collections);
    assert_eq!(
        session.error(),
        Some(
            "Failed to fetch collection data: \
             ChromaDB client error: Collection missing does not exist."
        )
    );
}

#[tokio::test]
async fn superseded_fetch_is_ignored() {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    connect(&mut session, &source, "http://localhost:8000").await;

    let slow = session.begin_fetch("animals").expect("ticket");
    let fast = session.begin_fetch("plants").expect("ticket");
    assert!(fast.generation() > slow.generation());

    // The newer request resolves first, the older one afterwards.
    assert!(session.finish(fast.execute(&source).await));
    assert!(!session.finish(slow.execute(&source).await));

    assert_eq!(session.selected().map(|c| c.collection_name.as_str()), Some("plants"));
    assert_eq!(session.items().len(), 1);
}

#[tokio::test]
async fn going_back_abandons_in_flight_requests() {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    connect(&mut session, &source, "http://localhost:8000").await;

    let ticket = session.begin_fetch("animals").expect("ticket");
    session.back();
    assert!(!session.finish(ticket.execute(&source).await));
    assert_eq!(session.step(), Step::Url);
}

#[tokio::test]
async fn view_resets_when_another_collection_loads() {
    let source = FakeSource::new();
    let mut session = ViewerSession::new();
    connect(&mut session, &source, "http://localhost:8000").await;
    let ticket = session.begin_fetch("animals").expect("ticket");
    session.finish(ticket.execute(&source).await);

    session.apply(ViewAction::PageSize(NonZeroUsize::new(5).expect("non-zero")));
    session.apply(ViewAction::GoToPage(4));
    assert_eq!(session.current_page().page[0].id, "a-15");
    session.apply(ViewAction::Search("a-2".to_string()));
    assert_eq!(session.view().page_number.get(), 1);
    assert_eq!(session.current_page().total_filtered, 10);

    session.back();
    let ticket = session.begin_fetch("plants").expect("ticket");
    session.finish(ticket.execute(&source).await);
    assert_eq!(session.view(), &chromaview_view::ViewState::default());
}

#[test]
fn mismatched_completion_is_rejected() {
    let mut session = ViewerSession::new();
    let ticket = session.begin_list("http://localhost:8000").expect("ticket");
    assert!(matches!(ticket.request(), Request::ListCollections { .. }));
    assert!(!session.finish(ticket.complete(Outcome::Items(Ok(vec![])))));
    assert_eq!(session.step(), Step::Url);
}
