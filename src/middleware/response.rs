use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;

/// Success envelope `{code, message, data}`, where `message` is the status
/// reason phrase.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                return ApiError::internal("middleware/response", e).into_response();
            }
        };

        let envelope = json!({
            "code": self.status_code.as_u16(),
            "message": self.status_code.canonical_reason().unwrap_or_default(),
            "data": data,
        });

        (self.status_code, Json(envelope)).into_response()
    }
}

/// Mutations answer 204 with an empty body.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
