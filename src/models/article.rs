use crate::entities::{articles, comments};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleRequest {
    #[schema(example = "Campus fair opens next week")]
    pub title: String,
    #[schema(example = "2025-09-01")]
    pub published_on: NaiveDate,
    pub body: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ArticleQuery {
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub published_on: NaiveDate,
    pub body: String,
}

impl From<articles::Model> for ArticleResponse {
    fn from(a: articles::Model) -> Self {
        Self {
            id: a.id,
            title: a.title,
            published_on: a.published_on,
            body: a.body,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleDetailResponse {
    pub id: i64,
    pub title: String,
    pub published_on: NaiveDate,
    pub body: String,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub article_id: i64,
    #[schema(example = "Rina")]
    pub author_name: String,
    pub body: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentQuery {
    pub article_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub article_id: i64,
    pub author_name: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

impl From<comments::Model> for CommentResponse {
    fn from(c: comments::Model) -> Self {
        Self {
            id: c.id,
            article_id: c.article_id,
            author_name: c.author_name,
            body: c.body,
            posted_at: c.posted_at,
        }
    }
}
