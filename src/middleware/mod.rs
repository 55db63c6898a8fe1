pub mod auth;
pub mod response;

pub use auth::{require_role, AuthGate, AuthUser};
pub use response::{no_content, ApiResponse, ApiResult};
