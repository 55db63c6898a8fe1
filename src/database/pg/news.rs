use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{ListNewsParams, NewNews, News};
use crate::database::repository::NewsRepository;

const CREATE_NEWS: &str =
    r#"INSERT INTO news (school_id, user_id, title) VALUES ($1, $2, $3) RETURNING id"#;

const LIST_NEWS: &str = r#"
    SELECT id, school_id, user_id, title, create_date, update_date, delete_date
    FROM news
    WHERE delete_date IS NULL
      AND ($1::BIGINT IS NULL OR user_id = $1)
      AND ($2::BIGINT IS NULL OR school_id = $2)
      AND ($3::BIGINT IS NULL OR id < $3)
    ORDER BY id DESC
    LIMIT $4
"#;

const FIND_NEWS_BY_ID: &str = r#"
    SELECT id, school_id, user_id, title, create_date, update_date, delete_date
    FROM news
    WHERE id = $1 AND delete_date IS NULL
"#;

const UPDATE_NEWS_TITLE: &str =
    r#"UPDATE news SET title = $1, update_date = now() WHERE id = $2 AND delete_date IS NULL"#;

const DELETE_NEWS: &str =
    r#"UPDATE news SET delete_date = now(), update_date = now() WHERE id = $1 AND delete_date IS NULL"#;

pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn create_news(&self, news: NewNews) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(CREATE_NEWS)
            .bind(news.school_id)
            .bind(news.user_id)
            .bind(&news.title)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_news(&self, params: ListNewsParams) -> Result<Vec<News>, DatabaseError> {
        let news = sqlx::query_as::<_, News>(LIST_NEWS)
            .bind(params.user_id)
            .bind(params.school_id)
            .bind(params.page.cursor)
            .bind(params.page.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(news)
    }

    async fn find_news_by_id(&self, news_id: i64) -> Result<Option<News>, DatabaseError> {
        let news = sqlx::query_as::<_, News>(FIND_NEWS_BY_ID)
            .bind(news_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(news)
    }

    async fn update_news_title(&self, news_id: i64, title: String) -> Result<(), DatabaseError> {
        sqlx::query(UPDATE_NEWS_TITLE)
            .bind(title)
            .bind(news_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_news(&self, news_id: i64) -> Result<(), DatabaseError> {
        sqlx::query(DELETE_NEWS).bind(news_id).execute(&self.pool).await?;
        Ok(())
    }
}
