use serde::{Deserialize, Serialize};

use super::{
    ensure_id, ensure_positive, ensure_text, BaseDto, CHECK_CURSOR, CHECK_ID, CHECK_SCHOOL_ID,
    CHECK_TITLE, TITLE_MAX_LEN,
};
use crate::database::models::News;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNewsRequest {
    #[serde(rename = "schoolID", default)]
    pub school_id: i64,
    #[serde(default)]
    pub title: String,
}

impl CreateNewsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/CreateNewsRequest.validate";
        ensure_id(OP, self.school_id, CHECK_SCHOOL_ID)?;
        ensure_text(OP, &self.title, TITLE_MAX_LEN, CHECK_TITLE)
    }
}

/// Query for `GET /news`. Results are always limited to the caller's own news.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNewsQuery {
    #[serde(rename = "schoolID")]
    pub school_id: Option<i64>,
    pub cursor: Option<i64>,
}

impl ListNewsQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/ListNewsQuery.validate";
        ensure_positive(OP, self.school_id, CHECK_SCHOOL_ID)?;
        ensure_positive(OP, self.cursor, CHECK_CURSOR)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNewsRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

impl UpdateNewsRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/UpdateNewsRequest.validate";
        ensure_id(OP, self.id, CHECK_ID)?;
        ensure_text(OP, &self.title, TITLE_MAX_LEN, CHECK_TITLE)
    }
}

pub fn validate_news_id(news_id: i64) -> Result<(), ApiError> {
    ensure_id("api/DeleteNewsRequest.validate", news_id, CHECK_ID)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsDto {
    #[serde(flatten)]
    pub base: BaseDto,
    #[serde(rename = "schoolID")]
    pub school_id: i64,
    pub title: String,
}

impl From<News> for NewsDto {
    fn from(news: News) -> Self {
        Self {
            base: BaseDto {
                id: news.id,
                create_date: news.create_date,
                update_date: news.update_date,
            },
            school_id: news.school_id,
            title: news.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListNewsResponse {
    pub news: Vec<NewsDto>,
    pub cursor: Option<i64>,
}
