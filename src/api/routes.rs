//! API Routes
//!
//! Configures the Axum router with all entry endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    by_filters_handler, create_handler, delete_handler, get_entry_handler, list_all_handler,
    list_entries_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /all` - List every entry (cached)
/// - `POST /new` - Create an entry
/// - `GET /entry/:uuid` - Fetch one entry
/// - `GET /entries/:count?offset=` - Page through entries
/// - `GET /by_filters?start_datetime=&end_datetime=` - Filter by creation time (cached)
/// - `PUT /update/:uuid` - Replace an entry's text
/// - `DELETE /:uuid` - Delete an entry
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/all", get(list_all_handler))
        .route("/new", post(create_handler))
        .route("/entry/:uuid", get(get_entry_handler))
        .route("/entries/:count", get(list_entries_handler))
        .route("/by_filters", get(by_filters_handler))
        .route("/update/:uuid", put(update_handler))
        .route("/:uuid", delete(delete_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
