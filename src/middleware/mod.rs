pub mod auth;
pub mod response;

pub use auth::{current_user, AuthUser};
pub use response::ApiResponse;
