use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::NewsService;

#[utoipa::path(
    get,
    path = "/articles",
    tag = "news",
    params(
        ("title" = Option<String>, Query, description = "Substring filter on title"),
        ("page" = Option<u64>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<u64>, Query, description = "Page size, capped at 100")
    ),
    responses((status = 200, description = "Articles, newest first"))
)]
pub async fn list_articles(
    news_service: web::Data<NewsService>,
    query: web::Query<ArticleQuery>,
) -> Result<HttpResponse> {
    match news_service.list_articles(&query).await {
        Ok(articles) => Ok(HttpResponse::Ok().json(ApiResponse::success(articles))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/articles",
    tag = "news",
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Empty title or body")
    )
)]
pub async fn create_article(
    news_service: web::Data<NewsService>,
    request: web::Json<ArticleRequest>,
) -> Result<HttpResponse> {
    match news_service.create_article(request.into_inner()).await {
        Ok(article) => Ok(HttpResponse::Ok().json(ApiResponse::success(article))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article with its comments", body = ArticleDetailResponse),
        (status = 404, description = "Article not found")
    )
)]
pub async fn get_article(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match news_service.get_article(path.into_inner()).await {
        Ok(article) => Ok(HttpResponse::Ok().json(ApiResponse::success(article))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/articles/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Article id")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleResponse),
        (status = 404, description = "Article not found")
    )
)]
pub async fn update_article(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
    request: web::Json<ArticleRequest>,
) -> Result<HttpResponse> {
    match news_service
        .update_article(path.into_inner(), request.into_inner())
        .await
    {
        Ok(article) => Ok(HttpResponse::Ok().json(ApiResponse::success(article))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/articles/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article and its comments deleted"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn delete_article(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match news_service.delete_article(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Article deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/comments",
    tag = "news",
    params(("article_id" = Option<i64>, Query, description = "Filter by article")),
    responses((status = 200, description = "Comments, newest first", body = [CommentResponse]))
)]
pub async fn list_comments(
    news_service: web::Data<NewsService>,
    query: web::Query<CommentQuery>,
) -> Result<HttpResponse> {
    match news_service.list_comments(&query).await {
        Ok(comments) => Ok(HttpResponse::Ok().json(ApiResponse::success(comments))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/comments",
    tag = "news",
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment posted", body = CommentResponse),
        (status = 400, description = "Empty comment body"),
        (status = 404, description = "Article not found")
    )
)]
pub async fn create_comment(
    news_service: web::Data<NewsService>,
    request: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    match news_service.create_comment(request.into_inner()).await {
        Ok(comment) => Ok(HttpResponse::Ok().json(ApiResponse::success(comment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment detail", body = CommentResponse),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match news_service.get_comment(path.into_inner()).await {
        Ok(comment) => Ok(HttpResponse::Ok().json(ApiResponse::success(comment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Empty comment body"),
        (status = 404, description = "Comment or article not found")
    )
)]
pub async fn update_comment(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
    request: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    match news_service
        .update_comment(path.into_inner(), request.into_inner())
        .await
    {
        Ok(comment) => Ok(HttpResponse::Ok().json(ApiResponse::success(comment))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "news",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(
    news_service: web::Data<NewsService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match news_service.delete_comment(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Comment deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn news_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/articles")
            .route("", web::get().to(list_articles))
            .route("", web::post().to(create_article))
            .route("/{id}", web::get().to(get_article))
            .route("/{id}", web::put().to(update_article))
            .route("/{id}", web::delete().to(delete_article)),
    )
    .service(
        web::scope("/comments")
            .route("", web::get().to(list_comments))
            .route("", web::post().to(create_comment))
            .route("/{id}", web::get().to(get_comment))
            .route("/{id}", web::put().to(update_comment))
            .route("/{id}", web::delete().to(delete_comment)),
    );
}
