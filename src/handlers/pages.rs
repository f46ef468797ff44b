//! Inline page handlers: routes that render a component directly instead of
//! going through a controller module.

use axum::response::Response;
use serde_json::json;

use crate::dashboard::resolve_dashboard;
use crate::database::repository;
use crate::error::ApiError;
use crate::routing::RequestContext;
use crate::view;

/// GET / - public landing page.
pub async fn welcome(ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render(
        "Welcome",
        json!({
            "canLogin": ctx.state.routes.has("login"),
            "canRegister": ctx.state.routes.has("register"),
        }),
    ))
}

/// GET /login - sign-in form. Session issuance itself belongs to the auth
/// subsystem; this route only exists as the gate's redirect target.
pub async fn login(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Auth/Login", json!({})))
}

/// GET /dashboard - role-based redirect to the right home page.
pub async fn dashboard(ctx: RequestContext) -> Result<Response, ApiError> {
    let user = ctx.require_user()?;
    ctx.redirect_to(resolve_dashboard(user.role), &[])
}

/// GET /restaurant - owner home page.
pub async fn restaurant_home(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant", json!({})))
}

/// GET /customer/dashboard
pub async fn customer_dashboard(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Customer", json!({})))
}

/// GET /restaurant/dashboard and /rhome
pub async fn restaurant_dashboard(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Rhome", json!({})))
}

pub async fn about(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Comp/About", json!({})))
}

pub async fn contact(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Comp/Contactus", json!({})))
}

/// GET /cart - cart page with the signed-in user, if any.
pub async fn cart(ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Customer/Cart", json!({ "auth": ctx.user })))
}

pub async fn customers(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Customers", json!({})))
}

pub async fn staff(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Staff", json!({})))
}

pub async fn restaurant_menus_page(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Restaurantmenus", json!({})))
}

pub async fn report(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/Report", json!({})))
}

pub async fn menu_form(_ctx: RequestContext) -> Result<Response, ApiError> {
    Ok(view::render("Restaurant/MenuForm", json!({})))
}

/// GET /setting - owner settings page with the owner's restaurant preloaded.
pub async fn setting(ctx: RequestContext) -> Result<Response, ApiError> {
    let restaurant = match &ctx.user {
        Some(user) => repository::restaurant_for_user(&ctx.state.pool, user.id).await?,
        None => None,
    };
    Ok(view::render(
        "Restaurant/Setting",
        json!({ "restaurant": restaurant, "auth": ctx.user }),
    ))
}
