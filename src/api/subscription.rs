use serde::{Deserialize, Serialize};

use super::{ensure_id, ensure_positive, BaseDto, CHECK_CURSOR, CHECK_SCHOOL_ID};
use crate::database::models::{News, SubscriptionSchool};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(rename = "schoolID", default)]
    pub school_id: i64,
}

impl CreateSubscriptionRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        ensure_id("api/CreateSubscriptionRequest.validate", self.school_id, CHECK_SCHOOL_ID)
    }
}

/// `cursor` query shared by the two subscription list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CursorQuery {
    pub cursor: Option<i64>,
}

impl CursorQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        ensure_positive("api/CursorQuery.validate", self.cursor, CHECK_CURSOR)
    }
}

/// Path id for `/subscriptions/{schoolID}` and `/subscriptions/news/{schoolID}`.
pub fn validate_school_id(school_id: i64) -> Result<(), ApiError> {
    ensure_id("api/SchoolPath.validate", school_id, CHECK_SCHOOL_ID)
}

/// `id` is the subscription id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionSchoolDto {
    #[serde(flatten)]
    pub base: BaseDto,
    #[serde(rename = "schoolID")]
    pub school_id: i64,
    pub name: String,
    pub region: String,
}

impl From<SubscriptionSchool> for SubscriptionSchoolDto {
    fn from(row: SubscriptionSchool) -> Self {
        Self {
            base: BaseDto {
                id: row.id,
                create_date: row.create_date,
                update_date: row.update_date,
            },
            school_id: row.school_id,
            name: row.name,
            region: row.region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionSchoolNewsDto {
    #[serde(flatten)]
    pub base: BaseDto,
    #[serde(rename = "schoolID")]
    pub school_id: i64,
    pub title: String,
}

impl From<News> for SubscriptionSchoolNewsDto {
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
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionSchoolsResponse {
    pub subscription_schools: Vec<SubscriptionSchoolDto>,
    pub cursor: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubscriptionSchoolNewsResponse {
    pub subscription_school_news: Vec<SubscriptionSchoolNewsDto>,
    pub cursor: Option<i64>,
}
