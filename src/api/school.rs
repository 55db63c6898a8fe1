use serde::{Deserialize, Serialize};

use super::{
    ensure_positive, ensure_text, BaseDto, CHECK_CURSOR, CHECK_USER_ID, REGION_MAX_LEN,
    SCHOOL_NAME_MAX_LEN,
};
use crate::database::models::School;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchoolRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
}

impl CreateSchoolRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/CreateSchoolRequest.validate";
        ensure_text(OP, &self.name, SCHOOL_NAME_MAX_LEN, "check the school name.")?;
        ensure_text(OP, &self.region, REGION_MAX_LEN, "check the region.")
    }
}

/// Query for `GET /schools`. `userID` narrows the list to one admin's schools.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSchoolsQuery {
    pub cursor: Option<i64>,
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
}

impl ListSchoolsQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        const OP: &str = "api/ListSchoolsQuery.validate";
        ensure_positive(OP, self.cursor, CHECK_CURSOR)?;
        ensure_positive(OP, self.user_id, CHECK_USER_ID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolDto {
    #[serde(flatten)]
    pub base: BaseDto,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub name: String,
    pub region: String,
}

impl From<School> for SchoolDto {
    fn from(school: School) -> Self {
        Self {
            base: BaseDto {
                id: school.id,
                create_date: school.create_date,
                update_date: school.update_date,
            },
            user_id: school.user_id,
            name: school.name,
            region: school.region,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSchoolsResponse {
    pub schools: Vec<SchoolDto>,
    pub cursor: Option<i64>,
}
