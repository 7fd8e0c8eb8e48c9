//! API Handlers
//!
//! HTTP request handlers for each entry endpoint.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::extract::{JsonBody, PathParam, QueryParams};
use crate::cache::{CacheKey, ResponseCache};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CreateEntryRequest, Entry, EntryFilterParams, EntryView, ListParams, UpdateEntryRequest,
};
use crate::store::{self, EntryStore, StoreResult};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Entry persistence
    pub store: Arc<dyn EntryStore>,
    /// Response cache for the list endpoints
    pub cache: Arc<RwLock<ResponseCache>>,
}

impl AppState {
    /// Creates a new AppState from a store and a cache.
    pub fn new(store: Arc<dyn EntryStore>, cache: ResponseCache) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Opens the configured database file and builds an empty cache.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let store = store::open(&config.database_path)?;
        Ok(Self::new(
            Arc::new(store),
            ResponseCache::new(config.cache_ttl()),
        ))
    }

    /// State backed by a private in-memory database.
    pub fn in_memory(cache_ttl: Duration) -> StoreResult<Self> {
        let store = store::open_in_memory()?;
        Ok(Self::new(Arc::new(store), ResponseCache::new(cache_ttl)))
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|err| ApiError::Validation(format!("invalid uuid `{raw}`: {err}")))
}

// == Store Access ==
/// Runs `op` against the store on the blocking thread pool.
///
/// SQLite calls and the connection mutex must stay off the runtime workers.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&dyn EntryStore) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || op(store.as_ref())).await?;
    Ok(result?)
}

// == Read-Through Cache ==
/// Serves the body cached under `key`, or loads it from the store and caches it.
async fn read_through<F>(state: &AppState, key: CacheKey, load: F) -> Result<Json<Vec<EntryView>>>
where
    F: FnOnce(&dyn EntryStore) -> StoreResult<Vec<Entry>> + Send + 'static,
{
    let cached = state.cache.write().await.get(&key);
    if let Some(body) = cached {
        debug!(%key, "cache hit");
        return Ok(Json(serde_json::from_str(&body)?));
    }

    debug!(%key, "cache miss");
    let views: Vec<EntryView> = with_store(state, load)
        .await?
        .into_iter()
        .map(EntryView::from)
        .collect();
    let body = serde_json::to_string(&views)?;
    state.cache.write().await.put(key, body);

    Ok(Json(views))
}

/// Handler for GET /all
///
/// Lists every entry. Cached for the configured TTL.
pub async fn list_all_handler(State(state): State<AppState>) -> Result<Json<Vec<EntryView>>> {
    read_through(&state, CacheKey::AllEntries, |store| store.list_all()).await
}

/// Handler for POST /new
///
/// Creates an entry with a fresh id and the current time.
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateEntryRequest>,
) -> Result<StatusCode> {
    let entry = Entry::new(req.text);
    let id = entry.uuid;
    with_store(&state, move |store| store.insert(&entry)).await?;

    debug!(uuid = %id, "entry created");
    Ok(StatusCode::CREATED)
}

/// Handler for GET /entry/:uuid
pub async fn get_entry_handler(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
) -> Result<Json<EntryView>> {
    let id = parse_uuid(&raw_id)?;

    with_store(&state, move |store| store.get(id))
        .await?
        .map(|entry| Json(EntryView::from(entry)))
        .ok_or_else(|| ApiError::NotFound("No entry with such uuid found".to_string()))
}

/// Handler for GET /entries/:count?offset=
///
/// Returns up to `count` entries in insertion order, skipping `offset`.
pub async fn list_entries_handler(
    State(state): State<AppState>,
    PathParam(count): PathParam<i64>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<EntryView>>> {
    let limit = u64::try_from(count).map_err(|_| {
        ApiError::Validation(format!("count must be greater than or equal to 0, got {count}"))
    })?;
    let offset = params.offset().map_err(ApiError::Validation)?;

    let entries = with_store(&state, move |store| store.list(limit, offset)).await?;
    Ok(Json(entries.into_iter().map(EntryView::from).collect()))
}

/// Handler for GET /by_filters?start_datetime=&end_datetime=
///
/// `end_datetime` defaults to now. With a start bound, the range must not be
/// inverted. Cached for the configured TTL.
pub async fn by_filters_handler(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<EntryFilterParams>,
) -> Result<Json<Vec<EntryView>>> {
    let range = params.parse().map_err(ApiError::Validation)?;
    let end = range.end.unwrap_or_else(Utc::now);

    if let Some(start) = range.start {
        if end < start {
            return Err(ApiError::Validation(
                "Start date must be less than end date".to_string(),
            ));
        }
    }

    let key = CacheKey::by_filters(range.start, range.end);
    read_through(&state, key, move |store| {
        store.list_created_between(range.start, end)
    })
    .await
}

/// Handler for PUT /update/:uuid
///
/// Replaces the text of an entry. An unknown id changes nothing and still
/// answers 200.
pub async fn update_handler(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
    JsonBody(req): JsonBody<UpdateEntryRequest>,
) -> Result<StatusCode> {
    let id = parse_uuid(&raw_id)?;
    let text = req.entry.text;

    let changed = with_store(&state, move |store| store.update_text(id, &text)).await?;
    if changed == 0 {
        debug!(uuid = %id, "update matched no entry");
    }

    Ok(StatusCode::OK)
}

/// Handler for DELETE /:uuid
///
/// Idempotent: answers 204 whether or not the entry existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
) -> Result<StatusCode> {
    let id = parse_uuid(&raw_id)?;

    let removed = with_store(&state, move |store| store.delete(id)).await?;
    debug!(uuid = %id, removed, "entry delete");

    Ok(StatusCode::NO_CONTENT)
}
