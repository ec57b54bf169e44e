use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use chromaview_core::config::{ApiVersion, ChromaSettings};
use chromaview_core::types::sanitize_endpoint;
use chromaview_core::{Error, Result};

use crate::wire::{CollectionEntry, CollectionModel, ErrorBody, GetRequest, GetResult};

/// A client bound to one Chroma endpoint. Cheap to build; one is created per
/// proxied request.
pub struct ChromaClient {
    http: reqwest::Client,
    base: Url,
    api_version: ApiVersion,
    tenant: String,
    database: String,
}

impl ChromaClient {
    pub fn new(
        http: reqwest::Client,
        endpoint_url: &str,
        settings: &ChromaSettings,
    ) -> Result<Self> {
        let endpoint = sanitize_endpoint(endpoint_url.trim());
        if endpoint.is_empty() {
            return Err(Error::validation("ChromaDB URL is required"));
        }
        let base = Url::parse(endpoint)
            .map_err(|e| Error::connection(format!("invalid endpoint URL '{endpoint}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::connection(format!("invalid endpoint URL '{endpoint}'")));
        }
        Ok(Self {
            http,
            base,
            api_version: settings.api_version,
            tenant: settings.tenant.clone(),
            database: settings.database.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Raw collection listing, one entry per collection.
    pub async fn list_collections(&self) -> Result<Vec<CollectionEntry>> {
        let url = self.collections_url(&[]);
        tracing::debug!(%url, "listing collections");
        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        read_json(resp).await
    }

    pub async fn get_collection(&self, name: &str) -> Result<CollectionModel> {
        let url = self.collections_url(&[name]);
        tracing::debug!(%url, "resolving collection");
        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        read_json(resp).await
    }

    /// Every record of a collection with documents, metadatas and embeddings.
    pub async fn get_all(&self, collection: &CollectionModel) -> Result<GetResult> {
        let key = match collection.id.as_str() {
            "" => collection.name.as_str(),
            id => id,
        };
        let url = self.collections_url(&[key, "get"]);
        tracing::debug!(%url, "fetching collection contents");
        let resp = self
            .http
            .post(url)
            .json(&GetRequest::everything())
            .send()
            .await
            .map_err(transport_error)?;
        read_json(resp).await
    }

    fn collections_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match self.api_version {
                ApiVersion::V1 => {
                    segments.extend(["api", "v1", "collections"]);
                }
                ApiVersion::V2 => {
                    segments.extend(["api", "v2", "tenants", self.tenant.as_str()]);
                    segments.extend(["databases", self.database.as_str(), "collections"]);
                }
            }
            segments.extend(tail);
        }
        url
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::connection(status_message(status, &body)));
    }
    let bytes = resp.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::connection(format!("malformed response from ChromaDB: {e}")))
}

fn status_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() { status.to_string() } else { format!("{status}: {body}") }
        })
}

/// Reduces a transport failure to its innermost cause, e.g. "Connection refused".
fn transport_error(err: reqwest::Error) -> Error {
    let mut cause: &(dyn std::error::Error + 'static) = &err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    Error::connection(cause.to_string())
}
