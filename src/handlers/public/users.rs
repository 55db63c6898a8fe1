use axum::{extract::State, http::StatusCode};

use crate::api::user::{CreateUserRequest, LoginUserRequest, LoginUserResponse};
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::extract::ValidJson;
use crate::middleware::{no_content, ApiResponse, ApiResult};

/// POST /users - sign up
pub async fn user_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state.users.create_user(req).await?;
    Ok(no_content())
}

/// POST /users/login - exchange credentials for an access token
pub async fn login_post(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginUserRequest>,
) -> ApiResult<LoginUserResponse> {
    req.validate()?;
    let token = state.users.login(req).await?;
    Ok(ApiResponse::success(token))
}
