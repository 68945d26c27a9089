mod common;

use axum::http::{HeaderValue, StatusCode, header};
use quote_service::application::services::auth_service::hash_token;
use serde_json::{Value, json};

#[tokio::test]
async fn test_random_quote_empty_store() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/quote").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn test_random_quote_increments_views() {
    let repo = common::create_test_repository().await;
    let id = common::insert_quote(&repo, "Stay curious.", "Ada Lovelace", 4).await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/quote").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["text"], "Stay curious.");
    assert_eq!(json["data"]["author"], "Ada Lovelace");
    assert_eq!(json["data"]["views"], 5);
    assert!(json["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_list_quotes() {
    let repo = common::create_test_repository().await;
    common::insert_quote(&repo, "Older", "A", 0).await;
    common::insert_quote(&repo, "Newer", "B", 0).await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/quotes").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let quotes = json["data"].as_array().unwrap();
    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0]["text"], "Newer");
    assert_eq!(quotes[1]["text"], "Older");
}

#[tokio::test]
async fn test_submit_quote_created() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server
        .post("/quote")
        .json(&json!({ "text": "  Stay curious. ", "author": "Ada Lovelace" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["text"], "Stay curious.");
    assert_eq!(json["data"]["views"], 0);
}

#[tokio::test]
async fn test_submit_quote_rejected_content() {
    let repo = common::create_test_repository().await;
    let state = common::create_test_state(repo, None);
    let server = common::create_test_server(state.clone());

    let response = server
        .post("/quote")
        .json(&json!({ "text": "you are an idiot", "author": "nobody" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "content_rejected");
    assert_eq!(json["message"], "quote text contains disallowed language");

    assert_eq!(
        state.quote_service.statistics().await.unwrap().total_quotes,
        0
    );
}

#[tokio::test]
async fn test_submit_quote_validation_errors() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let missing_author = server
        .post("/quote")
        .json(&json!({ "text": "No author here" }))
        .await;
    missing_author.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing_author.json::<Value>()["error"], "validation_error");

    let blank_text = server
        .post("/quote")
        .json(&json!({ "text": "   ", "author": "Anon" }))
        .await;
    blank_text.assert_status(StatusCode::BAD_REQUEST);

    let too_long = server
        .post("/quote")
        .json(&json!({ "text": "x".repeat(1001), "author": "Anon" }))
        .await;
    too_long.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(too_long.json::<Value>()["error"], "validation_error");
}

#[tokio::test]
async fn test_submit_quote_malformed_json() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server
        .post("/quote")
        .content_type("application/json")
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_delete_quote_open_gate() {
    let repo = common::create_test_repository().await;
    let id = common::insert_quote(&repo, "Doomed", "A", 0).await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.delete(&format!("/quote/{id}")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    let again = server.delete(&format!("/quote/{id}")).await;
    again.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(again.json::<Value>()["success"], false);
}

#[tokio::test]
async fn test_delete_quote_invalid_id() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.delete("/quote/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_quote_requires_admin_token() {
    let repo = common::create_test_repository().await;
    let id = common::insert_quote(&repo, "Guarded", "A", 0).await;
    let state = common::create_test_state(repo, Some(hash_token("s3cret")));
    let server = common::create_test_server(state);

    let anonymous = server.delete(&format!("/quote/{id}")).await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        anonymous.header(header::WWW_AUTHENTICATE),
        "Bearer"
    );
    assert_eq!(anonymous.json::<Value>()["error"], "unauthorized");

    let wrong = server
        .delete(&format!("/quote/{id}"))
        .authorization_bearer("guess")
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);

    let admin = server
        .delete(&format!("/quote/{id}"))
        .authorization_bearer("s3cret")
        .await;
    admin.assert_status_ok();
}

#[tokio::test]
async fn test_admin_gate_does_not_guard_reads_or_submissions() {
    let repo = common::create_test_repository().await;
    let state = common::create_test_state(repo, Some(hash_token("s3cret")));
    let server = common::create_test_server(state);

    server
        .post("/quote")
        .json(&json!({ "text": "Open to all", "author": "Anon" }))
        .await
        .assert_status(StatusCode::CREATED);

    server.get("/quote").await.assert_status_ok();
    server.get("/quotes").await.assert_status_ok();
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Not Found");
    assert_eq!(json["message"], "Route GET /nope not found");
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server.get("/").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(
        json["endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["path"] == "/quote/{id}" && e["method"] == "DELETE")
    );
}

#[tokio::test]
async fn test_cors_headers() {
    let repo = common::create_test_repository().await;
    let server = common::create_test_server(common::create_test_state(repo, None));

    let response = server
        .get("/quotes")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "*"
    );
}
