//! Request and response shapes for the HTTP surface.
//!
//! Requests validate themselves before any service runs; a failure is always
//! [`ErrorKind::Invalid`](crate::error::ErrorKind::Invalid) with a per-field
//! message.

pub mod news;
pub mod school;
pub mod subscription;
pub mod user;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ApiError, Op};

pub const CHECK_CURSOR: &str = "check the cursor.";
pub const CHECK_SCHOOL_ID: &str = "check the school ID.";
pub const CHECK_USER_ID: &str = "check the user ID.";
pub const CHECK_ID: &str = "check the ID.";
pub const CHECK_TITLE: &str = "check the title.";

/// Column widths from the schema, counted in characters.
pub const USER_NAME_MAX_LEN: usize = 64;
pub const SCHOOL_NAME_MAX_LEN: usize = 128;
pub const REGION_MAX_LEN: usize = 128;
pub const TITLE_MAX_LEN: usize = 255;

/// Fields every resource DTO starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDto {
    pub id: i64,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// An absent value is fine; a present one must be a positive id.
pub(crate) fn ensure_positive(op: Op, value: Option<i64>, message: &'static str) -> Result<(), ApiError> {
    match value {
        Some(v) if v <= 0 => Err(ApiError::invalid(op, message)),
        _ => Ok(()),
    }
}

pub(crate) fn ensure_id(op: Op, value: i64, message: &'static str) -> Result<(), ApiError> {
    ensure_positive(op, Some(value), message)
}

pub(crate) fn ensure_not_empty(op: Op, value: &str, message: &'static str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::invalid(op, message));
    }
    Ok(())
}

/// Non-empty and no longer than `max` characters.
pub(crate) fn ensure_text(op: Op, value: &str, max: usize, message: &'static str) -> Result<(), ApiError> {
    ensure_not_empty(op, value, message)?;
    if value.chars().count() > max {
        return Err(ApiError::invalid(op, message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn absent_is_not_zero() {
        assert!(ensure_positive("t", None, CHECK_CURSOR).is_ok());
        assert!(ensure_positive("t", Some(1), CHECK_CURSOR).is_ok());

        for bad in [0, -1, i64::MIN] {
            let err = ensure_positive("t", Some(bad), CHECK_CURSOR).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Invalid);
            assert_eq!(err.message(), CHECK_CURSOR);
        }
    }

    #[test]
    fn empty_string_is_invalid() {
        assert!(ensure_not_empty("t", "", CHECK_TITLE).is_err());
        assert!(ensure_not_empty("t", " ", CHECK_TITLE).is_ok());
    }

    #[test]
    fn text_length_is_counted_in_characters() {
        assert!(ensure_text("t", "abc", 3, CHECK_TITLE).is_ok());
        assert!(ensure_text("t", "äöü", 3, CHECK_TITLE).is_ok());

        let err = ensure_text("t", "abcd", 3, CHECK_TITLE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.message(), CHECK_TITLE);
        assert!(ensure_text("t", "", 3, CHECK_TITLE).is_err());
    }
}
