use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Serialize;

use crate::auth::Claims;
use crate::config;
use crate::database::models::UserRole;

/// Authenticated user context extracted from a session token.
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: UserRole::parse(&claims.role),
        }
    }
}

/// Resolve the current user from the request headers, if any.
///
/// Accepts a `Bearer` token or the session cookie. An absent or invalid token
/// yields `None`; the dispatcher decides whether that matters for the matched
/// route.
pub fn current_user(headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_token(headers)?;
    match validate_jwt(&token) {
        Ok(claims) => Some(AuthUser::from(claims)),
        Err(msg) => {
            tracing::debug!("rejected session token: {}", msg);
            None
        }
    }
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.trim().is_empty() {
                return Some(token.to_string());
            }
        }
    }
    session_cookie(headers)
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_name = &config::config().security.session_cookie;
    let raw = headers.get("cookie").and_then(|v| v.to_str().ok())?;
    for pair in raw.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == cookie_name && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Validate a token and extract its claims.
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("invalid token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: String) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn no_headers_means_no_user() {
        assert!(current_user(&HeaderMap::new()).is_none());
    }

    #[test]
    fn garbage_bearer_token_is_rejected() {
        let headers = headers_with("authorization", "Bearer not-a-jwt".to_string());
        assert!(current_user(&headers).is_none());
    }

    #[test]
    fn valid_bearer_token_round_trips() {
        let claims = Claims::new(
            7,
            "Nadia".to_string(),
            "nadia@example.com".to_string(),
            UserRole::RestaurantOwner,
        );
        let token = generate_jwt(claims).unwrap();
        let headers = headers_with("authorization", format!("Bearer {}", token));

        let user = current_user(&headers).expect("token should authenticate");
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::RestaurantOwner);
    }

    #[test]
    fn session_cookie_is_accepted() {
        let claims = Claims::new(
            3,
            "Sam".to_string(),
            "sam@example.com".to_string(),
            UserRole::Customer,
        );
        let token = generate_jwt(claims).unwrap();
        let cookie_name = &config::config().security.session_cookie;
        let headers = headers_with("cookie", format!("theme=dark; {}={}", cookie_name, token));

        let user = current_user(&headers).expect("cookie should authenticate");
        assert_eq!(user.id, 3);
        assert_eq!(user.role, UserRole::Customer);
    }
}
