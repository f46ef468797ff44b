use axum::response::Response;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

use crate::database::models::Menu;
use crate::database::repository::{self, NewMenu};
use crate::error::ApiError;
use crate::routing::RequestContext;
use crate::view;

#[derive(Debug, Deserialize)]
pub struct MenuPayload {
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
}

fn validate(payload: &MenuPayload) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    if payload.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "Name is required".to_string());
    }
    if payload.price < Decimal::ZERO {
        field_errors.insert("price".to_string(), "Price cannot be negative".to_string());
    }
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "The menu could not be saved",
            Some(field_errors),
        ))
    }
}

/// GET /menus and /menu - customer-facing menu listing.
pub async fn index(ctx: RequestContext) -> Result<Response, ApiError> {
    let menus = repository::list_menus(&ctx.state.pool).await?;
    Ok(view::render("Customer/Menu", json!({ "menus": menus })))
}

/// GET /menus/create - creation form.
pub async fn create(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/MenuForm", json!({})))
}

/// Load a menu by its path parameter and verify the signed-in user owns the
/// restaurant it belongs to.
async fn owned_menu(ctx: &RequestContext) -> Result<Menu, ApiError> {
    let user = ctx.require_user()?;
    let id = ctx.params.id("menu")?;

    let menu = repository::menu_by_id(&ctx.state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("menu not found"))?;
    let restaurant = repository::restaurant_by_id(&ctx.state.pool, menu.restaurant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("restaurant not found"))?;
    if restaurant.user_id != user.id {
        return Err(ApiError::forbidden("you do not manage this restaurant"));
    }

    Ok(menu)
}

/// POST /menus - create a menu entry for a restaurant the signed-in user owns.
///
/// The target restaurant comes from the payload, or falls back to the owner's
/// restaurant when omitted.
pub async fn store(ctx: RequestContext) -> Result<Response, ApiError> {
    let user_id = ctx.require_user()?.id;
    let payload: MenuPayload = ctx.json()?;
    validate(&payload)?;

    let restaurant = match payload.restaurant_id {
        Some(id) => repository::restaurant_by_id(&ctx.state.pool, id)
            .await?
            .ok_or_else(|| ApiError::not_found("restaurant not found"))?,
        None => repository::restaurant_for_user(&ctx.state.pool, user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("no restaurant for the current account"))?,
    };
    if restaurant.user_id != user_id {
        return Err(ApiError::forbidden("you do not manage this restaurant"));
    }

    let menu = repository::insert_menu(
        &ctx.state.pool,
        &NewMenu {
            restaurant_id: restaurant.id,
            name: payload.name.trim(),
            description: payload.description.as_deref(),
            price: payload.price,
        },
    )
    .await?;

    info!(menu = menu.id, restaurant = restaurant.id, "menu created");
    ctx.redirect_to("menus.index", &[])
}

/// GET /menus/{menu}
pub async fn show(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = ctx.params.id("menu")?;
    let menu = repository::menu_by_id(&ctx.state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("menu not found"))?;
    Ok(view::render("Customer/Menuitem", json!({ "menu": menu })))
}

/// GET /menus/{menu}/edit
pub async fn edit(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = ctx.params.id("menu")?;
    let menu = repository::menu_by_id(&ctx.state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("menu not found"))?;
    Ok(view::render("Restaurant/MenuForm", json!({ "menu": menu })))
}

/// PUT|PATCH /menus/{menu} - update, owner only.
pub async fn update(ctx: RequestContext) -> Result<Response, ApiError> {
    let menu = owned_menu(&ctx).await?;
    let payload: MenuPayload = ctx.json()?;
    validate(&payload)?;

    repository::update_menu(
        &ctx.state.pool,
        menu.id,
        payload.name.trim(),
        payload.description.as_deref(),
        payload.price,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("menu not found"))?;

    ctx.redirect_to("menus.index", &[])
}

/// DELETE /menus/{menu} - delete, owner only.
pub async fn destroy(ctx: RequestContext) -> Result<Response, ApiError> {
    let menu = owned_menu(&ctx).await?;
    if !repository::delete_menu(&ctx.state.pool, menu.id).await? {
        return Err(ApiError::not_found("menu not found"));
    }
    info!(menu = menu.id, "menu deleted");
    ctx.redirect_to("menus.index", &[])
}

/// GET /restaurants/{slug}/menu - customer menu page for one restaurant.
pub async fn customer_menu(ctx: RequestContext) -> Result<Response, ApiError> {
    let slug = ctx.params.require("slug")?;
    let restaurant = repository::restaurant_by_slug(&ctx.state.pool, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("restaurant not found"))?;
    let menus = repository::menus_for_restaurant(&ctx.state.pool, restaurant.id).await?;
    Ok(view::render(
        "Customer/Restaurantmenu",
        json!({ "restaurant": restaurant, "menus": menus }),
    ))
}
