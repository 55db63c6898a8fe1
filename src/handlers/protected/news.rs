use axum::{extract::State, http::StatusCode, Extension};

use crate::api::news::{
    validate_news_id, CreateNewsRequest, ListNewsQuery, ListNewsResponse, UpdateNewsRequest,
};
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::extract::{ValidJson, ValidPath, ValidQuery};
use crate::middleware::{no_content, ApiResponse, ApiResult, AuthUser};

/// POST /news
pub async fn news_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(req): ValidJson<CreateNewsRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state.news.create_news(user.user_id, req).await?;
    Ok(no_content())
}

/// GET /news?schoolID=&cursor=
pub async fn news_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidQuery(query): ValidQuery<ListNewsQuery>,
) -> ApiResult<ListNewsResponse> {
    query.validate()?;
    Ok(ApiResponse::success(state.news.list_news(user.user_id, query).await?))
}

/// PUT /news
pub async fn news_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(req): ValidJson<UpdateNewsRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state.news.update_news(user.user_id, req).await?;
    Ok(no_content())
}

/// DELETE /news/:news_id
pub async fn news_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidPath(news_id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    validate_news_id(news_id)?;
    state.news.delete_news(user.user_id, news_id).await?;
    Ok(no_content())
}
