pub mod news_service;
pub mod school_service;
pub mod subscription_service;
pub mod user_service;

pub use news_service::NewsService;
pub use school_service::SchoolService;
pub use subscription_service::SubscriptionService;
pub use user_service::UserService;

use crate::database::DatabaseError;
use crate::error::{ApiError, Op};

/// Wraps a persistence failure as `Internal` under `op`.
pub(crate) fn storage_error(op: Op) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| ApiError::internal(op, err)
}

/// Like [`storage_error`], but a uniqueness violation becomes the same
/// `Invalid` error the caller's duplicate check would have raised.
pub(crate) fn storage_error_or_duplicate(
    op: Op,
    duplicate_message: &'static str,
) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| {
        if err.is_unique_violation() {
            ApiError::invalid(op, duplicate_message)
        } else {
            ApiError::internal(op, err)
        }
    }
}
