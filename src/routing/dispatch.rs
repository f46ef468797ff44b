use axum::body::{to_bytes, Bytes};
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use super::table::{RouteKind, RouteTable};
use super::RequestContext;
use crate::error::ApiError;
use crate::middleware::auth::current_user;
use crate::state::AppState;
use crate::view;

/// Request bodies larger than this are rejected before the handler runs.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Single entry point for every request: route table lookup, auth gate,
/// handler invocation, error rendering.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let routes = state.routes.clone();
    let Some(found) = routes.resolve(&method, &path) else {
        debug!(%method, %path, "no matching route");
        return not_found_response(&path);
    };

    let name = found.entry.name().to_string();
    let kind = found.entry.kind();
    let requires_auth = found.entry.requires_auth();
    let route_handler = found.entry.handler();
    let params = found.params;

    debug!(%method, %path, route = %name, "dispatching");

    // Auth gate: single synchronous check, short-circuits before the handler.
    let user = current_user(request.headers());
    if requires_auth && user.is_none() {
        return unauthenticated_response(kind, &routes);
    }

    let body = if method == Method::GET || method == Method::HEAD {
        Bytes::new()
    } else {
        match to_bytes(request.into_body(), BODY_LIMIT).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return ApiError::bad_request(format!("unreadable request body: {}", e))
                    .into_response()
            }
        }
    };

    let ctx = RequestContext {
        state,
        params,
        user,
        body,
    };

    match route_handler(ctx).await {
        Ok(response) => response,
        Err(err) => render_error(err, kind, &routes),
    }
}

fn login_url(routes: &RouteTable) -> String {
    routes
        .url_for("login", &[])
        .unwrap_or_else(|_| "/login".to_string())
}

fn unauthenticated_response(kind: RouteKind, routes: &RouteTable) -> Response {
    match kind {
        RouteKind::Api => ApiError::unauthorized("authentication required").into_response(),
        RouteKind::Page => Redirect::to(&login_url(routes)).into_response(),
    }
}

fn not_found_response(path: &str) -> Response {
    if path.starts_with("/api/") {
        ApiError::not_found(format!("no route for {}", path)).into_response()
    } else {
        view::not_found("page not found")
    }
}

fn render_error(err: ApiError, kind: RouteKind, routes: &RouteTable) -> Response {
    if kind == RouteKind::Page {
        if matches!(err, ApiError::Unauthorized(_)) {
            return Redirect::to(&login_url(routes)).into_response();
        }
        if let ApiError::NotFound(message) = &err {
            return view::not_found(message);
        }
    }
    err.into_response()
}
