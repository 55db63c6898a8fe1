use axum::{extract::State, http::StatusCode, Extension};

use crate::api::school::{CreateSchoolRequest, ListSchoolsQuery, ListSchoolsResponse};
use crate::app::AppState;
use crate::error::ApiError;
use crate::handlers::extract::{ValidJson, ValidQuery};
use crate::middleware::{no_content, ApiResponse, ApiResult, AuthUser};

/// POST /schools (admin)
pub async fn schools_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(req): ValidJson<CreateSchoolRequest>,
) -> Result<StatusCode, ApiError> {
    req.validate()?;
    state.schools.create_school(user.user_id, req).await?;
    Ok(no_content())
}

/// GET /schools?cursor=&userID= (admin, student)
pub async fn schools_get(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<ListSchoolsQuery>,
) -> ApiResult<ListSchoolsResponse> {
    query.validate()?;
    Ok(ApiResponse::success(state.schools.list_schools(query).await?))
}
