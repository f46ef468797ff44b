//! Runtime SQL queries for the restaurant and menu tables.
//!
//! Handlers own payload validation; everything here takes already-validated
//! values and returns `sqlx::Error`, which the error layer maps to HTTP.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;

use super::models::{Menu, Restaurant, RestaurantWithMenus, User};

const RESTAURANT_COLUMNS: &str =
    "id, user_id, name, slug, cuisine, address, phone, created_at, updated_at";
const MENU_COLUMNS: &str = "id, restaurant_id, name, description, price, created_at, updated_at";

pub struct NewRestaurant<'a> {
    pub user_id: i64,
    pub name: &'a str,
    pub slug: &'a str,
    pub cuisine: Option<&'a str>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
}

pub struct NewMenu<'a> {
    pub restaurant_id: i64,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: Decimal,
}

pub async fn list_restaurants(pool: &PgPool) -> Result<Vec<Restaurant>, sqlx::Error> {
    let sql = format!("SELECT {} FROM restaurants ORDER BY name", RESTAURANT_COLUMNS);
    sqlx::query_as::<_, Restaurant>(&sql).fetch_all(pool).await
}

pub async fn restaurant_by_id(pool: &PgPool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    let sql = format!("SELECT {} FROM restaurants WHERE id = $1", RESTAURANT_COLUMNS);
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn restaurant_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let sql = format!("SELECT {} FROM restaurants WHERE slug = $1", RESTAURANT_COLUMNS);
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// First restaurant owned by the user. Owners hold one restaurant; if more
/// exist the oldest wins.
pub async fn restaurant_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM restaurants WHERE user_id = $1 ORDER BY id LIMIT 1",
        RESTAURANT_COLUMNS
    );
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_restaurant(
    pool: &PgPool,
    new: &NewRestaurant<'_>,
) -> Result<Restaurant, sqlx::Error> {
    let sql = format!(
        "INSERT INTO restaurants (user_id, name, slug, cuisine, address, phone, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, now(), now()) RETURNING {}",
        RESTAURANT_COLUMNS
    );
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(new.user_id)
        .bind(new.name)
        .bind(new.slug)
        .bind(new.cuisine)
        .bind(new.address)
        .bind(new.phone)
        .fetch_one(pool)
        .await
}

pub async fn update_restaurant(
    pool: &PgPool,
    id: i64,
    name: &str,
    cuisine: Option<&str>,
    address: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let sql = format!(
        "UPDATE restaurants SET name = $2, cuisine = $3, address = $4, phone = $5, updated_at = now() \
         WHERE id = $1 RETURNING {}",
        RESTAURANT_COLUMNS
    );
    sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .bind(name)
        .bind(cuisine)
        .bind(address)
        .bind(phone)
        .fetch_optional(pool)
        .await
}

pub async fn list_menus(pool: &PgPool) -> Result<Vec<Menu>, sqlx::Error> {
    let sql = format!("SELECT {} FROM menus ORDER BY name", MENU_COLUMNS);
    sqlx::query_as::<_, Menu>(&sql).fetch_all(pool).await
}

pub async fn menus_for_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
) -> Result<Vec<Menu>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM menus WHERE restaurant_id = $1 ORDER BY name",
        MENU_COLUMNS
    );
    sqlx::query_as::<_, Menu>(&sql)
        .bind(restaurant_id)
        .fetch_all(pool)
        .await
}

pub async fn menu_by_id(pool: &PgPool, id: i64) -> Result<Option<Menu>, sqlx::Error> {
    let sql = format!("SELECT {} FROM menus WHERE id = $1", MENU_COLUMNS);
    sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_menu(pool: &PgPool, new: &NewMenu<'_>) -> Result<Menu, sqlx::Error> {
    let sql = format!(
        "INSERT INTO menus (restaurant_id, name, description, price, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, now(), now()) RETURNING {}",
        MENU_COLUMNS
    );
    sqlx::query_as::<_, Menu>(&sql)
        .bind(new.restaurant_id)
        .bind(new.name)
        .bind(new.description)
        .bind(new.price)
        .fetch_one(pool)
        .await
}

pub async fn update_menu(
    pool: &PgPool,
    id: i64,
    name: &str,
    description: Option<&str>,
    price: Decimal,
) -> Result<Option<Menu>, sqlx::Error> {
    let sql = format!(
        "UPDATE menus SET name = $2, description = $3, price = $4, updated_at = now() \
         WHERE id = $1 RETURNING {}",
        MENU_COLUMNS
    );
    sqlx::query_as::<_, Menu>(&sql)
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .fetch_optional(pool)
        .await
}

/// Returns false when no row had the given id.
pub async fn delete_menu(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menus WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Restaurants joined with their menus, grouped in application code so the
/// listing keeps restaurant ordering.
pub async fn restaurants_with_menus(
    pool: &PgPool,
) -> Result<Vec<RestaurantWithMenus>, sqlx::Error> {
    let restaurants = list_restaurants(pool).await?;
    let menus = list_menus(pool).await?;

    let mut by_restaurant: HashMap<i64, Vec<Menu>> = HashMap::new();
    for menu in menus {
        by_restaurant.entry(menu.restaurant_id).or_default().push(menu);
    }

    Ok(restaurants
        .into_iter()
        .map(|restaurant| {
            let menus = by_restaurant.remove(&restaurant.id).unwrap_or_default();
            RestaurantWithMenus { restaurant, menus }
        })
        .collect())
}

pub async fn user_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update_user(
    pool: &PgPool,
    id: i64,
    name: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET name = $2, email = $3, updated_at = now() \
         WHERE id = $1 RETURNING id, name, email, role",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Returns false when no account had the given id.
pub async fn delete_user(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
