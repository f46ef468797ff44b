//! Server-side page dispatch. Pages are emitted as Inertia-style payloads
//! (component name plus props); the SPA shell decides how to draw them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{json, Value};

/// Render a page payload for the named frontend component.
pub fn render(component: &str, props: Value) -> Response {
    Json(json!({
        "component": component,
        "props": props,
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

/// Generic not-found page.
pub fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "component": "Error/NotFound",
            "props": { "message": message },
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
        .into_response()
}
