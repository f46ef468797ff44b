use sqlx::PgPool;
use std::sync::Arc;

use crate::routing::RouteTable;

/// Shared application state: the connection pool and the immutable route
/// table. Both are cheap to clone and safe for concurrent use; no other
/// cross-request mutable state exists.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub routes: Arc<RouteTable>,
}
