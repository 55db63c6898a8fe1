use std::sync::Arc;

use super::{storage_error, storage_error_or_duplicate};
use crate::api::school::{CreateSchoolRequest, ListSchoolsQuery, ListSchoolsResponse};
use crate::database::models::{ListSchoolsParams, NewSchool};
use crate::database::SchoolRepository;
use crate::error::ApiError;
use crate::pagination::{Page, PageRequest};

const NAME_AND_REGION_IN_USE: &str = "the name and region are already in use.";

pub struct SchoolService {
    schools: Arc<dyn SchoolRepository>,
    page_size: i64,
}

impl SchoolService {
    pub fn new(schools: Arc<dyn SchoolRepository>, page_size: i64) -> Self {
        Self { schools, page_size }
    }

    /// Registers a school owned by `user_id`. (name, region) is unique across
    /// all owners.
    pub async fn create_school(&self, user_id: i64, req: CreateSchoolRequest) -> Result<(), ApiError> {
        const OP: &str = "school/service/create";

        let existing = self
            .schools
            .find_school_by_name_and_region(&req.name, &req.region)
            .await
            .map_err(storage_error(OP))?;
        if existing.is_some() {
            return Err(ApiError::invalid(OP, NAME_AND_REGION_IN_USE));
        }

        let id = self
            .schools
            .create_school(NewSchool {
                user_id,
                name: req.name,
                region: req.region,
            })
            .await
            .map_err(storage_error_or_duplicate(OP, NAME_AND_REGION_IN_USE))?;

        tracing::info!(school_id = id, user_id, "School created");
        Ok(())
    }

    pub async fn list_schools(&self, query: ListSchoolsQuery) -> Result<ListSchoolsResponse, ApiError> {
        const OP: &str = "school/service/list";

        let schools = self
            .schools
            .list_schools(ListSchoolsParams {
                user_id: query.user_id,
                page: PageRequest::new(query.cursor, self.page_size),
            })
            .await
            .map_err(|e| ApiError::internal(OP, e).with_message("could not load schools."))?;

        let page = Page::from_items(schools, |s| s.id).map(Into::into);
        Ok(ListSchoolsResponse {
            schools: page.items,
            cursor: page.cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::School;
    use crate::database::repository::MockSchoolRepository;
    use crate::database::DatabaseError;
    use crate::error::ErrorKind;
    use chrono::Utc;

    fn school(id: i64, user_id: i64) -> School {
        let now = Utc::now();
        School {
            id,
            user_id,
            name: format!("school-{id}"),
            region: "Seoul".into(),
            create_date: now,
            update_date: now,
        }
    }

    fn create(name: &str, region: &str) -> CreateSchoolRequest {
        CreateSchoolRequest { name: name.into(), region: region.into() }
    }

    #[tokio::test]
    async fn creates_school_for_caller() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_find_school_by_name_and_region().returning(|_, _| Ok(None));
        repo.expect_create_school()
            .withf(|s| s.user_id == 9 && s.name == "X" && s.region == "Y")
            .times(1)
            .returning(|_| Ok(1));

        SchoolService::new(Arc::new(repo), 20)
            .create_school(9, create("X", "Y"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn duplicate_name_and_region_is_invalid_for_any_owner() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_find_school_by_name_and_region()
            .withf(|name, region| name == "X" && region == "Y")
            .returning(|_, _| Ok(Some(school(1, 1))));
        repo.expect_create_school().never();
        let service = SchoolService::new(Arc::new(repo), 20);

        for caller in [1, 2] {
            let err = service.create_school(caller, create("X", "Y")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Invalid);
            assert_eq!(err.message(), NAME_AND_REGION_IN_USE);
        }
    }

    #[tokio::test]
    async fn lost_race_on_insert_reads_as_duplicate() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_find_school_by_name_and_region().returning(|_, _| Ok(None));
        repo.expect_create_school()
            .returning(|_| Err(DatabaseError::UniqueViolation("schools_name_region_key".into())));

        let err = SchoolService::new(Arc::new(repo), 20)
            .create_school(1, create("X", "Y"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(err.message(), NAME_AND_REGION_IN_USE);
    }

    #[tokio::test]
    async fn list_passes_filters_and_returns_last_id_as_cursor() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_list_schools()
            .withf(|p| p.user_id == Some(3) && p.page == PageRequest::new(Some(10), 2))
            .returning(|_| Ok(vec![school(9, 3), school(7, 3)]));

        let res = SchoolService::new(Arc::new(repo), 2)
            .list_schools(ListSchoolsQuery { cursor: Some(10), user_id: Some(3) })
            .await
            .unwrap();

        assert_eq!(res.schools.len(), 2);
        assert_eq!(res.cursor, Some(7));
    }

    #[tokio::test]
    async fn empty_list_has_no_cursor() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_list_schools().returning(|_| Ok(Vec::new()));

        let res = SchoolService::new(Arc::new(repo), 20)
            .list_schools(ListSchoolsQuery::default())
            .await
            .unwrap();
        assert!(res.schools.is_empty());
        assert_eq!(res.cursor, None);
    }

    #[tokio::test]
    async fn list_failure_is_internal() {
        let mut repo = MockSchoolRepository::new();
        repo.expect_list_schools()
            .returning(|_| Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)));

        let err = SchoolService::new(Arc::new(repo), 20)
            .list_schools(ListSchoolsQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
