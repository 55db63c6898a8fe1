use std::sync::Arc;

use super::{storage_error, storage_error_or_duplicate};
use crate::api::subscription::{
    CreateSubscriptionRequest, CursorQuery, ListSubscriptionSchoolNewsResponse,
    ListSubscriptionSchoolsResponse,
};
use crate::database::models::{
    ListNewsParams, ListSubscriptionSchoolsParams, NewSubscription, Subscription,
};
use crate::database::{NewsRepository, SchoolRepository, SubscriptionRepository};
use crate::error::{ApiError, Op};
use crate::pagination::{Page, PageRequest};

const SCHOOL_NOT_FOUND: &str = "the school does not exist.";
const ALREADY_SUBSCRIBED: &str = "already subscribed.";
const NOT_SUBSCRIBED: &str = "not subscribed.";

#[derive(Debug, Clone, Copy)]
pub struct SubscriptionPageSizes {
    pub schools: i64,
    pub news: i64,
}

/// A student's subscriptions and the news feed of each subscribed school.
pub struct SubscriptionService {
    schools: Arc<dyn SchoolRepository>,
    news: Arc<dyn NewsRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    page_sizes: SubscriptionPageSizes,
}

impl SubscriptionService {
    pub fn new(
        schools: Arc<dyn SchoolRepository>,
        news: Arc<dyn NewsRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        page_sizes: SubscriptionPageSizes,
    ) -> Self {
        Self {
            schools,
            news,
            subscriptions,
            page_sizes,
        }
    }

    pub async fn create_subscription(
        &self,
        user_id: i64,
        req: CreateSubscriptionRequest,
    ) -> Result<(), ApiError> {
        const OP: &str = "subscription/service/create";

        let school = self
            .schools
            .find_school_by_id(req.school_id)
            .await
            .map_err(storage_error(OP))?;
        if school.is_none() {
            return Err(ApiError::invalid(OP, SCHOOL_NOT_FOUND));
        }

        let existing = self
            .subscriptions
            .find_subscription(user_id, req.school_id)
            .await
            .map_err(storage_error(OP))?;
        if existing.is_some() {
            return Err(ApiError::invalid(OP, ALREADY_SUBSCRIBED));
        }

        self.subscriptions
            .create_subscription(NewSubscription {
                user_id,
                school_id: req.school_id,
            })
            .await
            .map_err(storage_error_or_duplicate(OP, ALREADY_SUBSCRIBED))?;

        tracing::info!(user_id, school_id = req.school_id, "Subscribed");
        Ok(())
    }

    pub async fn list_subscription_schools(
        &self,
        user_id: i64,
        query: CursorQuery,
    ) -> Result<ListSubscriptionSchoolsResponse, ApiError> {
        const OP: &str = "subscription/service/list-schools";

        let rows = self
            .subscriptions
            .list_subscription_schools(ListSubscriptionSchoolsParams {
                user_id,
                page: PageRequest::new(query.cursor, self.page_sizes.schools),
            })
            .await
            .map_err(|e| {
                ApiError::internal(OP, e).with_message("could not load subscribed schools.")
            })?;

        let page = Page::from_items(rows, |row| row.id).map(Into::into);
        Ok(ListSubscriptionSchoolsResponse {
            subscription_schools: page.items,
            cursor: page.cursor,
        })
    }

    /// News feed of one subscribed school. Existing schools the caller has
    /// not subscribed to are refused all the same.
    pub async fn list_subscription_school_news(
        &self,
        user_id: i64,
        school_id: i64,
        query: CursorQuery,
    ) -> Result<ListSubscriptionSchoolNewsResponse, ApiError> {
        const OP: &str = "subscription/service/list-school-news";

        self.subscription_of(OP, user_id, school_id).await?;

        let news = self
            .news
            .list_news(ListNewsParams {
                user_id: None,
                school_id: Some(school_id),
                page: PageRequest::new(query.cursor, self.page_sizes.news),
            })
            .await
            .map_err(|e| ApiError::internal(OP, e).with_message("could not load news."))?;

        let page = Page::from_items(news, |n| n.id).map(Into::into);
        Ok(ListSubscriptionSchoolNewsResponse {
            subscription_school_news: page.items,
            cursor: page.cursor,
        })
    }

    /// Unsubscribes. The row is removed, not marked.
    pub async fn delete_subscription(&self, user_id: i64, school_id: i64) -> Result<(), ApiError> {
        const OP: &str = "subscription/service/delete";

        let subscription = self.subscription_of(OP, user_id, school_id).await?;
        if subscription.user_id != user_id {
            return Err(ApiError::permission(OP, "no permission to remove this subscription."));
        }

        self.subscriptions
            .delete_subscription(subscription.id)
            .await
            .map_err(|e| {
                ApiError::internal(OP, e).with_message("could not remove the subscription.")
            })?;

        tracing::info!(user_id, school_id, "Unsubscribed");
        Ok(())
    }

    async fn subscription_of(&self, op: Op, user_id: i64, school_id: i64) -> Result<Subscription, ApiError> {
        self.subscriptions
            .find_subscription(user_id, school_id)
            .await
            .map_err(storage_error(op))?
            .ok_or_else(|| ApiError::invalid(op, NOT_SUBSCRIBED))
    }
}
