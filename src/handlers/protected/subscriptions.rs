use axum::{extract::State, http::StatusCode, Extension};

use crate::api::subscription::{
    validate_school_id, CreateSubscriptionRequest, CursorQuery, ListSubscriptionSchoolNewsResponse,
    ListSubscriptionSchoolsResponse,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::extract::{ValidJson, ValidPath, ValidQuery};
use crate::middleware::{no_content, ApiResponse, ApiResult, AuthUser};

/// POST /subscriptions
pub async fn subscriptions_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(req): ValidJson<CreateSubscriptionRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state.subscriptions.create_subscription(user.user_id, req).await?;
    Ok(no_content())
}

/// GET /subscriptions?cursor=
pub async fn subscriptions_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidQuery(query): ValidQuery<CursorQuery>,
) -> ApiResult<ListSubscriptionSchoolsResponse> {
    query.validate()?;
    let schools = state
        .subscriptions
        .list_subscription_schools(user.user_id, query)
        .await?;
    Ok(ApiResponse::success(schools))
}

/// GET /subscriptions/news/:school_id?cursor=
pub async fn subscription_news_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidPath(school_id): ValidPath<i64>,
    ValidQuery(query): ValidQuery<CursorQuery>,
) -> ApiResult<ListSubscriptionSchoolNewsResponse> {
    validate_school_id(school_id)?;
    query.validate()?;
    let news = state
        .subscriptions
        .list_subscription_school_news(user.user_id, school_id, query)
        .await?;
    Ok(ApiResponse::success(news))
}

/// DELETE /subscriptions/:school_id
pub async fn subscriptions_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidPath(school_id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    validate_school_id(school_id)?;
    state.subscriptions.delete_subscription(user.user_id, school_id).await?;
    Ok(no_content())
}
