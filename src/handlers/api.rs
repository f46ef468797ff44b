//! JSON endpoints under the /api prefix. Structured data only, no rendered
//! views; responses use the standard success envelope.

use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::info;

use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::routing::RequestContext;

/// GET /api/restaurants
pub async fn restaurants(ctx: RequestContext) -> Result<Response, ApiError> {
    let rows = repository::list_restaurants(&ctx.state.pool).await?;
    Ok(ApiResponse::success(rows).into_response())
}

/// GET /api/menus
pub async fn menus(ctx: RequestContext) -> Result<Response, ApiError> {
    let rows = repository::list_menus(&ctx.state.pool).await?;
    Ok(ApiResponse::success(rows).into_response())
}

/// GET /api/restaurants-with-menus
pub async fn restaurants_with_menus(ctx: RequestContext) -> Result<Response, ApiError> {
    let rows = repository::restaurants_with_menus(&ctx.state.pool).await?;
    Ok(ApiResponse::success(rows).into_response())
}

/// GET /api/restaurant/menus - menus scoped to the caller's own restaurant.
pub async fn restaurant_menus(ctx: RequestContext) -> Result<Response, ApiError> {
    let user = ctx
        .user
        .as_ref()
        .ok_or_else(|| ApiError::forbidden("sign in to view your restaurant menus"))?;
    let restaurant = repository::restaurant_for_user(&ctx.state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("no restaurant for the current account"))?;
    let rows = repository::menus_for_restaurant(&ctx.state.pool, restaurant.id).await?;
    Ok(ApiResponse::success(rows).into_response())
}

/// DELETE /api/restaurantmenus/{id}
pub async fn delete_menu(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = ctx.params.id("id")?;
    if !repository::delete_menu(&ctx.state.pool, id).await? {
        return Err(ApiError::not_found(format!("menu {} not found", id)));
    }
    info!(menu = id, "menu deleted via api");
    Ok(ApiResponse::success(json!({ "deleted": id })).into_response())
}
