mod common;

use campus_backend::error::AppError;
use campus_backend::models::*;
use campus_backend::services::NewsService;
use chrono::NaiveDate;

fn article_request(title: &str, day: u32) -> ArticleRequest {
    ArticleRequest {
        title: title.to_string(),
        published_on: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
        body: "Body text".to_string(),
    }
}

#[tokio::test]
async fn articles_list_newest_first_with_title_filter() {
    let pool = common::setup().await;
    let service = NewsService::new(pool);

    service
        .create_article(article_request("Campus fair opens", 1))
        .await
        .unwrap();
    service
        .create_article(article_request("Library hours change", 5))
        .await
        .unwrap();
    service
        .create_article(article_request("Campus fair closes", 9))
        .await
        .unwrap();

    let all = service
        .list_articles(&ArticleQuery::default())
        .await
        .unwrap();
    assert_eq!(all.items.len(), 3);
    assert_eq!(all.items[0].title, "Campus fair closes");
    assert_eq!(all.pagination.total, 3);

    let filtered = service
        .list_articles(&ArticleQuery {
            title: Some("fair".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.items.len(), 2);
}

#[tokio::test]
async fn comments_belong_to_an_existing_article() {
    let pool = common::setup().await;
    let service = NewsService::new(pool);

    let article = service
        .create_article(article_request("Campus fair opens", 1))
        .await
        .unwrap();

    let err = service
        .create_comment(CommentRequest {
            article_id: 9999,
            author_name: "Rina".to_string(),
            body: "First!".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service
        .create_comment(CommentRequest {
            article_id: article.id,
            author_name: "Rina".to_string(),
            body: "   ".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    service
        .create_comment(CommentRequest {
            article_id: article.id,
            author_name: "Rina".to_string(),
            body: "Looking forward to it".to_string(),
        })
        .await
        .unwrap();

    let detail = service.get_article(article.id).await.unwrap();
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].author_name, "Rina");
}

#[tokio::test]
async fn deleting_an_article_removes_its_comments() {
    let pool = common::setup().await;
    let service = NewsService::new(pool);

    let article = service
        .create_article(article_request("Campus fair opens", 1))
        .await
        .unwrap();
    service
        .create_comment(CommentRequest {
            article_id: article.id,
            author_name: "Rina".to_string(),
            body: "Nice".to_string(),
        })
        .await
        .unwrap();

    service.delete_article(article.id).await.unwrap();

    let orphans = service
        .list_comments(&CommentQuery {
            article_id: Some(article.id),
        })
        .await
        .unwrap();
    assert!(orphans.is_empty());
}

#[tokio::test]
async fn a_comment_can_be_edited_but_not_blanked() {
    let pool = common::setup().await;
    let service = NewsService::new(pool);

    let article = service
        .create_article(article_request("Campus fair opens", 1))
        .await
        .unwrap();
    let comment = service
        .create_comment(CommentRequest {
            article_id: article.id,
            author_name: "Rina".to_string(),
            body: "See you there".to_string(),
        })
        .await
        .unwrap();

    let fetched = service.get_comment(comment.id).await.unwrap();
    assert_eq!(fetched.body, "See you there");

    let updated = service
        .update_comment(
            comment.id,
            CommentRequest {
                article_id: article.id,
                author_name: "Rina".to_string(),
                body: "See you there at noon".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, comment.id);
    assert_eq!(updated.body, "See you there at noon");

    let err = service
        .update_comment(
            comment.id,
            CommentRequest {
                article_id: article.id,
                author_name: "Rina".to_string(),
                body: "   ".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .update_comment(
            comment.id,
            CommentRequest {
                article_id: 9999,
                author_name: "Rina".to_string(),
                body: "Moved".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.get_comment(9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
