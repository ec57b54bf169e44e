use async_trait::async_trait;
use std::time::Duration;

use chromaview_core::config::ChromaSettings;
use chromaview_core::traits::CollectionSource;
use chromaview_core::{Error, Item, Result};

use crate::client::ChromaClient;
use crate::wire::collection_names;

/// `CollectionSource` backed by Chroma's REST API.
///
/// Holds only settings and the HTTP transport; a `ChromaClient` is built for the
/// endpoint named by each call.
#[derive(Clone)]
pub struct ChromaSource {
    http: reqwest::Client,
    settings: ChromaSettings,
}

impl ChromaSource {
    pub fn new(settings: ChromaSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| Error::connection(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ChromaSettings {
        &self.settings
    }

    fn client(&self, endpoint_url: &str) -> Result<ChromaClient> {
        ChromaClient::new(self.http.clone(), endpoint_url, &self.settings)
    }
}

#[async_trait]
impl CollectionSource for ChromaSource {
    async fn list_collections(&self, endpoint_url: &str) -> Result<Vec<String>> {
        let client = self.client(endpoint_url)?;
        let names = collection_names(client.list_collections().await?);
        tracing::debug!(endpoint = %client.base_url(), count = names.len(), "listed collections");
        Ok(names)
    }

    async fn fetch_items(&self, endpoint_url: &str, collection_name: &str) -> Result<Vec<Item>> {
        if collection_name.is_empty() {
            return Err(Error::validation("ChromaDB URL and collection name are required"));
        }
        let client = self.client(endpoint_url)?;
        let collection = client.get_collection(collection_name).await?;
        let items = client.get_all(&collection).await?.into_items();
        tracing::debug!(
            endpoint = %client.base_url(),
            collection = collection_name,
            count = items.len(),
            "fetched collection"
        );
        Ok(items)
    }
}
