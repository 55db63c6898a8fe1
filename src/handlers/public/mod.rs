//! Routes reachable without a token.

pub mod health;
pub mod users;

pub use health::{health_get, ping_get};
pub use users::{login_post, user_post};
