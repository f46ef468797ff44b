use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

use crate::database::repository;
use crate::error::ApiError;
use crate::routing::RequestContext;
use crate::view;

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    pub email: String,
}

/// GET /profile
pub async fn edit(ctx: RequestContext) -> Result<Response, ApiError> {
    let user = ctx.require_user()?;
    Ok(view::render("Profile/Edit", json!({ "auth": user })))
}

/// PATCH /profile
pub async fn update(ctx: RequestContext) -> Result<Response, ApiError> {
    let user_id = ctx.require_user()?.id;
    let payload: ProfilePayload = ctx.json()?;

    let mut field_errors = HashMap::new();
    if payload.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "Name is required".to_string());
    }
    if !payload.email.contains('@') {
        field_errors.insert(
            "email".to_string(),
            "A valid email address is required".to_string(),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "The profile could not be updated",
            Some(field_errors),
        ));
    }

    repository::update_user(
        &ctx.state.pool,
        user_id,
        payload.name.trim(),
        payload.email.trim(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("account not found"))?;

    ctx.redirect_to("profile.edit", &[])
}

/// DELETE /profile - remove the account and land on the public welcome page.
pub async fn destroy(ctx: RequestContext) -> Result<Response, ApiError> {
    let user_id = ctx.require_user()?.id;
    if !repository::delete_user(&ctx.state.pool, user_id).await? {
        return Err(ApiError::not_found("account not found"));
    }
    info!(user = user_id, "account deleted");
    ctx.redirect_to("welcome", &[])
}
