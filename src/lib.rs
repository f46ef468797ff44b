pub mod auth;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod roles;
pub mod routes;
pub mod routing;
pub mod state;
pub mod view;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Assemble the axum application. All dispatch goes through the route table,
/// so axum only contributes the server plumbing and global middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(routing::dispatch::dispatch)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
