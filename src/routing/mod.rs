//! The routing core: an immutable, explicitly-constructed route table built
//! once at startup, plus the dispatcher that drives every request through it.

pub mod dispatch;
pub mod pattern;
pub mod table;

pub use pattern::{PathParams, PathPattern, PatternError};
pub use table::{ResourceHandlers, RouteError, RouteKind, RouteTable, RouteTableBuilder};

use axum::body::Bytes;
use axum::response::{IntoResponse, Redirect, Response};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub type HandlerFuture = BoxFuture<'static, Result<Response, ApiError>>;

/// Boxed route handler as stored in the table.
pub type RouteHandler = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// Wrap an async fn for registration in the route table.
pub fn handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, ApiError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Everything a handler gets to see about the request it was matched for.
#[derive(Clone)]
pub struct RequestContext {
    pub state: AppState,
    pub params: PathParams,
    pub user: Option<AuthUser>,
    /// Raw request body; empty for GET requests.
    pub body: Bytes,
}

impl RequestContext {
    /// Deserialize the request body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::invalid_json(format!("malformed request body: {}", e)))
    }

    /// The authenticated user, or Unauthorized. Handlers on guarded routes can
    /// rely on this succeeding; the gate ran before they were invoked.
    pub fn require_user(&self) -> Result<&AuthUser, ApiError> {
        self.user
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }

    /// Redirect to a named route, substituting path parameters.
    pub fn redirect_to(&self, name: &str, params: &[(&str, &str)]) -> Result<Response, ApiError> {
        let url = self.state.routes.url_for(name, params)?;
        Ok(Redirect::to(&url).into_response())
    }
}
