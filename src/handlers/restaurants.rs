use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

use crate::database::models::slugify;
use crate::database::repository::{self, NewRestaurant};
use crate::error::ApiError;
use crate::routing::RequestContext;
use crate::view;

#[derive(Debug, Deserialize)]
pub struct RestaurantPayload {
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn validate(payload: &RestaurantPayload) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    if payload.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "Name is required".to_string());
    }
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "The restaurant could not be saved",
            Some(field_errors),
        ))
    }
}

/// GET /restaurantlist - public directory.
pub async fn index(ctx: RequestContext) -> Result<Response, ApiError> {
    let restaurants = repository::list_restaurants(&ctx.state.pool).await?;
    Ok(view::render(
        "Customer/Restaurantlist",
        json!({ "restaurants": restaurants }),
    ))
}

/// GET /restaurant/add - creation form.
pub async fn create(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Addrestaurant", json!({})))
}

/// POST /restaurants - create a restaurant for the signed-in owner.
pub async fn store(ctx: RequestContext) -> Result<Response, ApiError> {
    let user_id = ctx.require_user()?.id;
    let payload: RestaurantPayload = ctx.json()?;
    validate(&payload)?;

    let slug = slugify(&payload.name);
    let restaurant = repository::insert_restaurant(
        &ctx.state.pool,
        &NewRestaurant {
            user_id,
            name: payload.name.trim(),
            slug: &slug,
            cuisine: payload.cuisine.as_deref(),
            address: payload.address.as_deref(),
            phone: payload.phone.as_deref(),
        },
    )
    .await?;

    info!(restaurant = %restaurant.slug, "restaurant created");
    ctx.redirect_to("restaurant.dashboard", &[])
}

/// GET /restaurants/{restaurant}/edit - edit form, owner only.
pub async fn edit(ctx: RequestContext) -> Result<Response, ApiError> {
    let user = ctx.require_user()?;
    let id = ctx.params.id("restaurant")?;

    let restaurant = repository::restaurant_by_id(&ctx.state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("restaurant not found"))?;
    if restaurant.user_id != user.id {
        return Err(ApiError::forbidden("you do not manage this restaurant"));
    }

    Ok(view::render(
        "Restaurant/Editrestaurant",
        json!({ "restaurant": restaurant }),
    ))
}

/// PUT /restaurants/{restaurant} - update, owner only.
pub async fn update(ctx: RequestContext) -> Result<Response, ApiError> {
    let user = ctx.require_user()?;
    let id = ctx.params.id("restaurant")?;

    let existing = repository::restaurant_by_id(&ctx.state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("restaurant not found"))?;
    if existing.user_id != user.id {
        return Err(ApiError::forbidden("you do not manage this restaurant"));
    }

    let payload: RestaurantPayload = ctx.json()?;
    validate(&payload)?;

    repository::update_restaurant(
        &ctx.state.pool,
        id,
        payload.name.trim(),
        payload.cuisine.as_deref(),
        payload.address.as_deref(),
        payload.phone.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("restaurant not found"))?;

    ctx.redirect_to("restaurant.dashboard", &[])
}

/// GET /restaurants/{slug} - public detail page.
pub async fn show(ctx: RequestContext) -> Result<Response, ApiError> {
    let slug = ctx.params.require("slug")?;
    let restaurant = repository::restaurant_by_slug(&ctx.state.pool, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("restaurant not found"))?;
    Ok(view::render(
        "Customer/Restaurant",
        json!({ "restaurant": restaurant }),
    ))
}

/// GET /browse and /restaurantmenulist - restaurants joined with menus.
pub async fn restaurant_menu_list(ctx: RequestContext) -> Result<Response, ApiError> {
    let listings = repository::restaurants_with_menus(&ctx.state.pool).await?;
    Ok(view::render(
        "Customer/Browse",
        json!({ "restaurants": listings }),
    ))
}
