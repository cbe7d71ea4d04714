use crate::entities::{articles, comments};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct NewsService {
    pool: DatabaseConnection,
}

impl NewsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_articles(
        &self,
        query: &ArticleQuery,
    ) -> AppResult<PaginatedResponse<ArticleResponse>> {
        let params = PaginationParams {
            page: query.page,
            per_page: query.per_page,
        };

        let mut select = articles::Entity::find();
        if let Some(title) = &query.title {
            select = select.filter(articles::Column::Title.contains(title));
        }

        let paginator = select
            .order_by_desc(articles::Column::PublishedOn)
            .paginate(&self.pool, params.get_per_page());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.get_page() - 1).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(ArticleResponse::from).collect(),
            params.get_page(),
            params.get_per_page(),
            total,
        ))
    }

    pub async fn create_article(&self, req: ArticleRequest) -> AppResult<ArticleResponse> {
        let article = articles::ActiveModel {
            title: Set(req.title),
            published_on: Set(req.published_on),
            body: Set(req.body),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(ArticleResponse::from(article))
    }

    pub async fn get_article(&self, id: i64) -> AppResult<ArticleDetailResponse> {
        let article = self.find_article(id).await?;

        let comments = comments::Entity::find()
            .filter(comments::Column::ArticleId.eq(id))
            .order_by_desc(comments::Column::PostedAt)
            .all(&self.pool)
            .await?;

        Ok(ArticleDetailResponse {
            id: article.id,
            title: article.title,
            published_on: article.published_on,
            body: article.body,
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }

    pub async fn update_article(&self, id: i64, req: ArticleRequest) -> AppResult<ArticleResponse> {
        let article = self.find_article(id).await?;
        let mut model = article.into_active_model();
        model.title = Set(req.title);
        model.published_on = Set(req.published_on);
        model.body = Set(req.body);
        Ok(ArticleResponse::from(model.update(&self.pool).await?))
    }

    pub async fn delete_article(&self, id: i64) -> AppResult<()> {
        let res = articles::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Article {id} not found")));
        }
        Ok(())
    }

    pub async fn list_comments(&self, query: &CommentQuery) -> AppResult<Vec<CommentResponse>> {
        let mut select = comments::Entity::find();
        if let Some(article_id) = query.article_id {
            select = select.filter(comments::Column::ArticleId.eq(article_id));
        }

        let rows = select
            .order_by_desc(comments::Column::PostedAt)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CommentResponse::from).collect())
    }

    pub async fn create_comment(&self, req: CommentRequest) -> AppResult<CommentResponse> {
        self.find_article(req.article_id).await?;

        if req.body.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Comment body must not be empty".to_string(),
            ));
        }

        let comment = comments::ActiveModel {
            article_id: Set(req.article_id),
            author_name: Set(req.author_name),
            body: Set(req.body),
            posted_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(CommentResponse::from(comment))
    }

    pub async fn get_comment(&self, id: i64) -> AppResult<CommentResponse> {
        Ok(CommentResponse::from(self.find_comment(id).await?))
    }

    pub async fn update_comment(&self, id: i64, req: CommentRequest) -> AppResult<CommentResponse> {
        let comment = self.find_comment(id).await?;
        self.find_article(req.article_id).await?;

        if req.body.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Comment body must not be empty".to_string(),
            ));
        }

        let mut model = comment.into_active_model();
        model.article_id = Set(req.article_id);
        model.author_name = Set(req.author_name);
        model.body = Set(req.body);
        Ok(CommentResponse::from(model.update(&self.pool).await?))
    }

    pub async fn delete_comment(&self, id: i64) -> AppResult<()> {
        let res = comments::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Comment {id} not found")));
        }
        Ok(())
    }

    async fn find_comment(&self, id: i64) -> AppResult<comments::Model> {
        comments::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {id} not found")))
    }

    async fn find_article(&self, id: i64) -> AppResult<articles::Model> {
        articles::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Article {id} not found")))
    }
}
