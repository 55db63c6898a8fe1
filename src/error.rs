// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Operation tag naming where an error was raised, e.g. `"news/service/update"`.
/// Only ever logged, never sent to clients.
pub type Op = &'static str;

/// Message used for every failure the client cannot act on.
pub const INTERNAL_MESSAGE: &str = "a server error occurred.";

/// Error classification. Decides the HTTP status, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or a broken business rule.
    Invalid,
    /// Authenticated, but the caller does not own the target record.
    Permission,
    NotExist,
    Exist,
    /// Missing, invalid or under-privileged credentials.
    Auth,
    Internal,
}

/// API error with a diagnostic op tag and a client-facing message.
///
/// Permission failures deliberately map to 400 rather than 403, and role gate
/// failures to 401; clients depend on both.
#[derive(Debug, thiserror::Error)]
#[error("{op}: {message}")]
pub struct ApiError {
    op: Op,
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    pub fn new(op: Op, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            op,
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid(op: Op, message: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::Invalid, message)
    }

    pub fn permission(op: Op, message: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::Permission, message)
    }

    pub fn not_exist(op: Op, message: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::NotExist, message)
    }

    pub fn exist(op: Op, message: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::Exist, message)
    }

    pub fn auth(op: Op, message: impl Into<String>) -> Self {
        Self::new(op, ErrorKind::Auth, message)
    }

    /// Wraps an unexpected failure. The cause is kept for logging only.
    pub fn internal(op: Op, source: impl Into<BoxError>) -> Self {
        Self {
            op,
            kind: ErrorKind::Internal,
            message: INTERNAL_MESSAGE.to_string(),
            source: Some(source.into()),
        }
    }

    /// Replaces the client-facing message, keeping kind and cause.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Invalid | ErrorKind::Permission => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::NotExist => StatusCode::NOT_FOUND,
            ErrorKind::Exist => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.status_code().as_u16(),
            "message": self.message,
        })
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self.kind {
            ErrorKind::Internal => {
                tracing::error!(op = self.op, error = ?self.source, "{}", self.message);
            }
            _ => {
                tracing::debug!(op = self.op, kind = ?self.kind, "{}", self.message);
            }
        }

        (self.status_code(), Json(self.to_json())).into_response()
    }
}
