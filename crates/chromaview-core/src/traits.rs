use async_trait::async_trait;

use crate::error::Result;
use crate::types::Item;

/// A read-only view of a vector database reachable at a caller-supplied endpoint.
///
/// Implementations are stateless between calls: every call names the endpoint it
/// talks to, and failures of any kind surface as `Error::Connection`.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Names of every collection the endpoint exposes, in remote order.
    async fn list_collections(&self, endpoint_url: &str) -> Result<Vec<String>>;

    /// Every item of one collection, loaded in a single call.
    async fn fetch_items(&self, endpoint_url: &str, collection_name: &str) -> Result<Vec<Item>>;
}
