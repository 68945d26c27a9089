mod common;

use axum::http::header;
use metrics_exporter_prometheus::PrometheusBuilder;
use quote_service::application::services::QuoteService;
use quote_service::domain::content_validator::ContentValidator;

#[tokio::test]
async fn test_metrics_without_recorder_is_empty() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        "text/plain; version=0.0.4"
    );
    assert!(response.text().is_empty());
}

#[tokio::test]
async fn test_metrics_renders_recorded_counters() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        metrics::counter!("quotes_served_total").increment(3);
        metrics::counter!("quote_submissions_rejected_total", "field" => "author").increment(1);
    });

    let repo = common::create_test_repository().await;
    let mut state = common::create_test_state(repo, None);
    state.metrics = Some(handle);
    let server = common::create_test_server(state);

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("quotes_served_total 3"));
    assert!(body.contains("quote_submissions_rejected_total{field=\"author\"} 1"));
}

#[test]
fn test_quote_service_emits_activity_counters() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let repo = common::create_test_repository().await;
            let service = QuoteService::new(repo, ContentValidator::new());

            service
                .submit_quote("Stay curious.", "Ada Lovelace")
                .await
                .unwrap();
            service.submit_quote("Clean text", "Total Moron").await.unwrap_err();
            service.submit_quote("you are an idiot", "nobody").await.unwrap_err();
            service.submit_quote("what a jackass", "nobody").await.unwrap_err();

            for _ in 0..3 {
                service.serve_random_quote().await.unwrap().unwrap();
            }

            service.shutdown().await;
        });
    });

    let body = handle.render();
    assert!(body.contains("quotes_added_total 1"));
    assert!(body.contains("quotes_served_total 3"));
    assert!(body.contains("quote_submissions_rejected_total{field=\"text\"} 2"));
    assert!(body.contains("quote_submissions_rejected_total{field=\"author\"} 1"));
}

#[test]
fn test_empty_store_serves_no_counted_quote() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    metrics::with_local_recorder(&recorder, || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let repo = common::create_test_repository().await;
            let service = QuoteService::new(repo, ContentValidator::new());

            assert!(service.serve_random_quote().await.unwrap().is_none());
            assert_eq!(service.activity().random_quote_requests, 1);
            service.shutdown().await;
        });
    });

    assert!(!handle.render().contains("quotes_served_total"));
}
