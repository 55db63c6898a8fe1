use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{ListSchoolsParams, NewSchool, School};
use crate::database::repository::SchoolRepository;

const CREATE_SCHOOL: &str =
    r#"INSERT INTO schools (user_id, name, region) VALUES ($1, $2, $3) RETURNING id"#;

const LIST_SCHOOLS: &str = r#"
    SELECT id, user_id, name, region, create_date, update_date
    FROM schools
    WHERE ($1::BIGINT IS NULL OR user_id = $1)
      AND ($2::BIGINT IS NULL OR id < $2)
    ORDER BY id DESC
    LIMIT $3
"#;

const FIND_SCHOOL_BY_NAME_AND_REGION: &str = r#"
    SELECT id, user_id, name, region, create_date, update_date
    FROM schools
    WHERE name = $1 AND region = $2
"#;

const FIND_SCHOOL_BY_ID: &str = r#"
    SELECT id, user_id, name, region, create_date, update_date
    FROM schools
    WHERE id = $1
"#;

pub struct PgSchoolRepository {
    pool: PgPool,
}

impl PgSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchoolRepository for PgSchoolRepository {
    async fn create_school(&self, school: NewSchool) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(CREATE_SCHOOL)
            .bind(school.user_id)
            .bind(&school.name)
            .bind(&school.region)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_schools(&self, params: ListSchoolsParams) -> Result<Vec<School>, DatabaseError> {
        let schools = sqlx::query_as::<_, School>(LIST_SCHOOLS)
            .bind(params.user_id)
            .bind(params.page.cursor)
            .bind(params.page.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(schools)
    }

    async fn find_school_by_name_and_region(
        &self,
        name: &str,
        region: &str,
    ) -> Result<Option<School>, DatabaseError> {
        let school = sqlx::query_as::<_, School>(FIND_SCHOOL_BY_NAME_AND_REGION)
            .bind(name)
            .bind(region)
            .fetch_optional(&self.pool)
            .await?;
        Ok(school)
    }

    async fn find_school_by_id(&self, school_id: i64) -> Result<Option<School>, DatabaseError> {
        let school = sqlx::query_as::<_, School>(FIND_SCHOOL_BY_ID)
            .bind(school_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(school)
    }
}
