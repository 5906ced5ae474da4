//! Roster API - HTTP surface
//!
//! Employee CRUD under `/api/employees` and the export download under
//! `/api/export`. Mutations return as soon as the store commits; the export
//! is rebuilt by a background [`worker`].

pub mod error;
pub mod routes;
pub mod state;
pub mod worker;

use axum::routing::get;
use axum::{middleware, Router};

pub use error::ApiError;
pub use state::AppState;
pub use worker::{spawn_sync_worker, SyncHandle};

/// Build the HTTP router over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(routes::employees::list).post(routes::employees::create),
        )
        .route(
            "/api/employees/:id",
            get(routes::employees::get_one)
                .put(routes::employees::update)
                .delete(routes::employees::remove),
        )
        .route("/api/export", get(routes::export::download))
        .route("/api/export/status", get(routes::export::status))
        .layer(middleware::from_fn(routes::request_span))
        .with_state(state)
}
