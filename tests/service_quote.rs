mod common;

use quote_service::application::services::QuoteService;
use quote_service::domain::content_validator::ContentValidator;
use quote_service::error::AppError;

#[tokio::test]
async fn test_submit_then_serve() {
    let repo = common::create_test_repository().await;
    let service = QuoteService::new(repo, ContentValidator::new());

    let quote = service
        .submit_quote("Stay curious.", "Ada Lovelace")
        .await
        .unwrap();
    assert_eq!(quote.id, 1);
    assert_eq!(quote.views, 0);

    let served = service.serve_random_quote().await.unwrap().unwrap();
    assert_eq!(served.id, quote.id);
    assert_eq!(served.views, 1);

    let activity = service.activity();
    assert_eq!(activity.quotes_added, 1);
    assert_eq!(activity.random_quote_requests, 1);
}

#[tokio::test]
async fn test_rejected_submission_writes_nothing() {
    let repo = common::create_test_repository().await;
    let service = QuoteService::new(repo, ContentValidator::new());

    let result = service.submit_quote("you are an idiot", "nobody").await;

    match result {
        Err(AppError::ContentRejected { reason }) => {
            assert_eq!(reason, "quote text contains disallowed language");
        }
        other => panic!("expected ContentRejected, got {other:?}"),
    }

    assert_eq!(service.statistics().await.unwrap().total_quotes, 0);
    assert_eq!(service.activity().submissions_rejected, 1);
}

#[tokio::test]
async fn test_legitimate_words_are_accepted() {
    let repo = common::create_test_repository().await;
    let service = QuoteService::new(repo, ContentValidator::new());

    service
        .submit_quote("A classic assessment of the Scunthorpe assistant.", "Anon")
        .await
        .unwrap();

    assert_eq!(service.statistics().await.unwrap().total_quotes, 1);
}

#[tokio::test]
async fn test_extra_blocked_terms() {
    let repo = common::create_test_repository().await;
    let validator = ContentValidator::with_extra_terms(["grumble"]).unwrap();
    let service = QuoteService::new(repo, validator);

    let result = service.submit_quote("Stop the GRUMBLE now", "Anon").await;
    assert!(matches!(result, Err(AppError::ContentRejected { .. })));

    let result = service.submit_quote("Fine words", "Grumble McGee").await;
    match result {
        Err(AppError::ContentRejected { reason }) => {
            assert_eq!(reason, "author name contains disallowed language");
        }
        other => panic!("expected ContentRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_remove_quote() {
    let repo = common::create_test_repository().await;
    let service = QuoteService::new(repo, ContentValidator::new());

    let quote = service.submit_quote("Short lived", "Anon").await.unwrap();

    assert!(service.remove_quote(quote.id).await.unwrap());
    assert!(!service.remove_quote(quote.id).await.unwrap());
    assert!(service.list_quotes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_health_check_follows_store_lifecycle() {
    let repo = common::create_test_repository().await;
    let service = QuoteService::new(repo, ContentValidator::new());

    service.health_check().await.unwrap();

    service.shutdown().await;

    assert!(matches!(
        service.health_check().await,
        Err(AppError::StorageClosed { .. })
    ));
    assert!(matches!(
        service.submit_quote("Too late", "Anon").await,
        Err(AppError::StorageClosed { .. })
    ));
}
