//! HTTP proxy in front of a caller-chosen Chroma endpoint.
//!
//! `POST /collections` and `POST /collection-data` (also mounted under `/api`)
//! forward to a `CollectionSource` and reshape its answer as JSON. Nothing is
//! cached between requests.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use chromaview_core::traits::CollectionSource;
use chromaview_core::{Error, Item};

/// Server state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn CollectionSource>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionDataRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "collectionName")]
    pub collection_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error type of the handlers; renders as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Source(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::Source(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Source(e @ Error::Validation(_)) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Source(e @ Error::Connection(_)) => {
                tracing::error!(error = %e, "remote request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

async fn list_collections(
    State(state): State<AppState>,
    body: Result<Json<CollectionsRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Json(req) = body?;
    let url = required(req.url).ok_or_else(|| Error::validation("ChromaDB URL is required"))?;
    let names = state.source.list_collections(&url).await?;
    tracing::info!(%url, count = names.len(), "listed collections");
    Ok(Json(names))
}

async fn collection_data(
    State(state): State<AppState>,
    body: Result<Json<CollectionDataRequest>, JsonRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let Json(req) = body?;
    let (Some(url), Some(name)) = (required(req.url), required(req.collection_name)) else {
        return Err(Error::validation("ChromaDB URL and collection name are required").into());
    };
    let items = state.source.fetch_items(&url, &name).await?;
    tracing::info!(%url, collection = %name, count = items.len(), "fetched collection");
    Ok(Json(items))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn proxy_routes() -> Router<AppState> {
    Router::new()
        .route("/collections", post(list_collections))
        .route("/collection-data", post(collection_data))
}

pub fn router(source: Arc<dyn CollectionSource>) -> Router {
    Router::new()
        .merge(proxy_routes())
        .nest("/api", proxy_routes())
        .route("/health", get(health))
        .with_state(AppState { source })
}
