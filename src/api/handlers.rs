//! API Handlers
//!
//! HTTP request handlers for each movie cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::cache::{MemoryStore, RecordStore, RedisStore};
use crate::config::Config;
use crate::error::Result;
use crate::lookup::LookupService;
use crate::models::{ErrorResponse, HealthResponse, MovieQuery, MovieRecord, StatsResponse};
use crate::provider::{MetadataProvider, OmdbProvider};

/// Application state shared across all handlers.
///
/// The lookup service owns its store and provider; handlers only borrow it.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<LookupService>,
}

impl AppState {
    /// Creates a new AppState around an assembled lookup service.
    pub fn new(lookup: LookupService) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses Redis when `redis_url` is set, otherwise an in-memory store.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = match &config.redis_url {
            Some(url) => Arc::new(RedisStore::from_url(url)?),
            None => Arc::new(MemoryStore::new()),
        };
        let provider: Arc<dyn MetadataProvider> = Arc::new(OmdbProvider::new(
            &config.omdb_base_url,
            &config.omdb_api_key,
            config.provider_timeout(),
        )?);

        info!(
            store = store.name(),
            provider = provider.name(),
            single_flight = config.single_flight,
            "lookup service assembled"
        );

        let lookup = LookupService::new(store, provider)
            .with_timeout(config.provider_timeout())
            .with_single_flight(config.single_flight);
        Ok(Self::new(lookup))
    }
}

/// Handler for GET /getMovie?name=..&year=..
///
/// Returns the movie record, or 404 when the provider has no such title.
/// Blank titles are rejected by the lookup service with 400.
pub async fn get_movie_handler(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> Result<Response> {
    let response = match state.lookup.lookup(&query.name, query.year).await? {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!(
                "Movie not found: {} ({})",
                query.name, query.year
            ))),
        )
            .into_response(),
    };

    Ok(response)
}

/// Handler for GET /all
///
/// Returns every cached record.
pub async fn all_movies_handler(State(state): State<AppState>) -> Result<Json<Vec<MovieRecord>>> {
    Ok(Json(state.lookup.list_all_cached().await?))
}

/// Handler for GET /stats
///
/// Returns lookup statistics and the current store size.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let total_entries = state.lookup.store().len().await?;
    Ok(Json(StatsResponse::new(state.lookup.stats(), total_entries)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
