//! API Module
//!
//! HTTP handlers and routing for the entry REST API.

pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
