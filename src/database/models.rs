use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role attached to a user account.
///
/// Modeled as an enum rather than a free string: "restaurant" marks an owner
/// account, and any other stored value is treated as a plain customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "restaurant")]
    RestaurantOwner,
}

impl UserRole {
    /// Normalize a stored role value. Unknown or empty values fall back to
    /// `Customer`.
    pub fn parse(value: &str) -> Self {
        match value {
            "restaurant" => UserRole::RestaurantOwner,
            _ => UserRole::Customer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::RestaurantOwner => "restaurant",
            UserRole::Customer => "customer",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Restaurant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub slug: String,
    pub cuisine: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A restaurant joined with its menus, for the browse pages and the combined
/// API listing.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantWithMenus {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub menus: Vec<Menu>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn role(&self) -> UserRole {
        UserRole::parse(&self.role)
    }
}

/// Authorization role row. `guard_name` is NULL for rows created without a
/// guard scope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub guard_name: Option<String>,
}

/// URL-safe slug derived from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_two_way_only() {
        assert_eq!(UserRole::parse("restaurant"), UserRole::RestaurantOwner);
        assert_eq!(UserRole::parse("customer"), UserRole::Customer);
        assert_eq!(UserRole::parse(""), UserRole::Customer);
        assert_eq!(UserRole::parse("admin"), UserRole::Customer);
        assert_eq!(UserRole::parse("RESTAURANT"), UserRole::Customer);
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Mama's Pizza & Pasta"), "mama-s-pizza-pasta");
        assert_eq!(slugify("  Thai  Garden  "), "thai-garden");
        assert_eq!(slugify("Café 21"), "caf-21");
    }
}
