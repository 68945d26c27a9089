#![allow(dead_code)]

use axum_test::TestServer;
use quote_service::application::services::{AuthService, QuoteService};
use quote_service::domain::content_validator::ContentValidator;
use quote_service::domain::entities::NewQuote;
use quote_service::domain::repositories::QuoteRepository;
use quote_service::infrastructure::persistence::{SqliteQuoteRepository, StoreConfig};
use quote_service::routes;
use quote_service::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn create_test_repository() -> Arc<SqliteQuoteRepository> {
    Arc::new(
        SqliteQuoteRepository::initialize(&StoreConfig::in_memory())
            .await
            .unwrap(),
    )
}

/// Stores a quote without validation and sets its view count.
pub async fn insert_quote(repo: &SqliteQuoteRepository, text: &str, author: &str, views: i64) -> i64 {
    let quote = repo.add_quote(NewQuote::new(text, author)).await.unwrap();

    sqlx::query("UPDATE quotes SET views = ? WHERE id = ?")
        .bind(views)
        .bind(quote.id)
        .execute(repo.pool())
        .await
        .unwrap();

    quote.id
}

pub fn create_test_state(
    repo: Arc<SqliteQuoteRepository>,
    admin_token_hash: Option<String>,
) -> AppState {
    let quote_service = Arc::new(QuoteService::new(repo, ContentValidator::new()));
    let auth_service = Arc::new(AuthService::new(admin_token_hash));

    AppState::new(quote_service, auth_service, None)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(routes::router(state, false)).unwrap()
}

/// A fresh database file path under the system temp directory.
///
/// The parent directory does not exist yet.
pub fn temp_db_path() -> PathBuf {
    use rand::Rng;
    let suffix: u64 = rand::rng().random();

    std::env::temp_dir()
        .join(format!("quote-service-test-{suffix:016x}"))
        .join("quotes.db")
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

pub fn remove_temp_db(path: &std::path::Path) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
