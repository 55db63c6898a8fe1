use std::sync::Arc;

use super::storage_error;
use crate::api::news::{CreateNewsRequest, ListNewsQuery, ListNewsResponse, UpdateNewsRequest};
use crate::database::models::{ListNewsParams, NewNews, News};
use crate::database::{NewsRepository, SchoolRepository};
use crate::error::{ApiError, Op};
use crate::pagination::{Page, PageRequest};

const SCHOOL_NOT_FOUND: &str = "the school does not exist.";
const NEWS_NOT_FOUND: &str = "news not found.";

/// News publishing. Only the owner of a school may post, edit or remove its
/// news; the owner is re-read from storage on every mutation.
pub struct NewsService {
    schools: Arc<dyn SchoolRepository>,
    news: Arc<dyn NewsRepository>,
    page_size: i64,
}

impl NewsService {
    pub fn new(schools: Arc<dyn SchoolRepository>, news: Arc<dyn NewsRepository>, page_size: i64) -> Self {
        Self {
            schools,
            news,
            page_size,
        }
    }

    pub async fn create_news(&self, user_id: i64, req: CreateNewsRequest) -> Result<(), ApiError> {
        const OP: &str = "news/service/create";

        let school = self
            .schools
            .find_school_by_id(req.school_id)
            .await
            .map_err(storage_error(OP))?
            .ok_or_else(|| ApiError::invalid(OP, SCHOOL_NOT_FOUND))?;
        if school.user_id != user_id {
            return Err(ApiError::permission(OP, "no permission for this school."));
        }

        let id = self
            .news
            .create_news(NewNews {
                school_id: school.id,
                user_id: school.user_id,
                title: req.title,
            })
            .await
            .map_err(storage_error(OP))?;

        tracing::info!(news_id = id, school_id = school.id, "News created");
        Ok(())
    }

    /// Lists the caller's own news, newest first.
    pub async fn list_news(&self, user_id: i64, query: ListNewsQuery) -> Result<ListNewsResponse, ApiError> {
        const OP: &str = "news/service/list";

        let news = self
            .news
            .list_news(ListNewsParams {
                user_id: Some(user_id),
                school_id: query.school_id,
                page: PageRequest::new(query.cursor, self.page_size),
            })
            .await
            .map_err(|e| ApiError::internal(OP, e).with_message("could not load news."))?;

        let page = Page::from_items(news, |n| n.id).map(Into::into);
        Ok(ListNewsResponse {
            news: page.items,
            cursor: page.cursor,
        })
    }

    pub async fn update_news(&self, user_id: i64, req: UpdateNewsRequest) -> Result<(), ApiError> {
        const OP: &str = "news/service/update";

        let news = self.owned_news(OP, user_id, req.id, "no permission to edit this news.").await?;
        self.news
            .update_news_title(news.id, req.title)
            .await
            .map_err(|e| ApiError::internal(OP, e).with_message("could not update the news."))
    }

    /// Soft delete.
    pub async fn delete_news(&self, user_id: i64, news_id: i64) -> Result<(), ApiError> {
        const OP: &str = "news/service/delete";

        let news = self.owned_news(OP, user_id, news_id, "no permission to delete this news.").await?;
        self.news
            .delete_news(news.id)
            .await
            .map_err(|e| ApiError::internal(OP, e).with_message("could not delete the news."))?;

        tracing::info!(news_id, user_id, "News deleted");
        Ok(())
    }

    async fn owned_news(
        &self,
        op: Op,
        user_id: i64,
        news_id: i64,
        denied: &'static str,
    ) -> Result<News, ApiError> {
        let news = self
            .news
            .find_news_by_id(news_id)
            .await
            .map_err(storage_error(op))?
            .ok_or_else(|| ApiError::not_exist(op, NEWS_NOT_FOUND))?;

        if news.user_id != user_id {
            return Err(ApiError::permission(op, denied));
        }
        Ok(news)
    }
}
