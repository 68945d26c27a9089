//! SQLite implementation of the quote repository.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use serde_json::json;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::{NewQuote, Quote, QuoteStats};
use crate::domain::repositories::QuoteRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::seed::SEED_QUOTES;
use crate::utils::db_error::{read_error, write_error};

/// Connection and bootstrap settings for [`SqliteQuoteRepository::initialize`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite URL, e.g. `sqlite://data/quotes.db` or `sqlite::memory:`.
    pub database_url: String,
    pub max_connections: u32,
    /// How long a caller waits for a pooled connection.
    pub acquire_timeout: Duration,
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout: Duration,
    /// Insert the seed quotes when the table is empty.
    pub seed_on_empty: bool,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            seed_on_empty: true,
        }
    }

    /// A private in-memory database without seed data.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:").with_seed(false)
    }

    pub fn with_seed(mut self, seed_on_empty: bool) -> Self {
        self.seed_on_empty = seed_on_empty;
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

#[derive(Debug, FromRow)]
struct QuoteRow {
    id: i64,
    text: String,
    author: String,
    views: i64,
    created_at: DateTime<Utc>,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote::new(row.id, row.text, row.author, row.views, row.created_at)
    }
}

/// SQLite repository for quotes.
///
/// Owns the connection pool for the whole process. Writes that change state run
/// on their own tokio task, so a caller that goes away mid-request cannot leave
/// a statement half applied.
pub struct SqliteQuoteRepository {
    pool: SqlitePool,
}

impl SqliteQuoteRepository {
    /// Opens the database, applies the schema and seeds an empty store.
    ///
    /// Safe to call against an already initialized database: migrations are
    /// tracked and seeding only happens when the table has no rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if the database cannot be
    /// opened, the schema cannot be created or seeding fails.
    pub async fn initialize(config: &StoreConfig) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::storage_unavailable(format!("invalid database URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        if config.is_in_memory() {
            // The in-memory database lives as long as its single connection.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            ensure_parent_dir(options.get_filename())?;
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::storage_unavailable(format!("cannot open database: {e}")))?;
        tracing::info!(database = %config.database_url, "Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::storage_unavailable(format!("schema migration failed: {e}")))?;

        let repository = Self { pool };

        if config.seed_on_empty {
            let seeded = repository
                .seed_if_empty()
                .await
                .map_err(|e| AppError::storage_unavailable(format!("seeding failed: {e}")))?;
            if seeded > 0 {
                tracing::info!(count = seeded, "Seeded database with initial quotes");
            }
        }

        Ok(repository)
    }

    /// Underlying pool, for diagnostics and test fixtures.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts [`SEED_QUOTES`] if the table is empty.
    ///
    /// Count and inserts share one transaction. Timestamps are one second
    /// apart and ascending, so listing order is deterministic.
    async fn seed_if_empty(&self) -> Result<usize, AppError> {
        const OP: &str = "seed";

        let mut tx = self.pool.begin().await.map_err(write_error(OP))?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quotes")
            .fetch_one(&mut *tx)
            .await
            .map_err(read_error(OP))?;

        if count > 0 {
            return Ok(0);
        }

        let base = Utc::now();
        let total = SEED_QUOTES.len() as i64;

        for (offset, (text, author)) in SEED_QUOTES.iter().enumerate() {
            let created_at = base - ChronoDuration::seconds(total - offset as i64);

            sqlx::query("INSERT INTO quotes (text, author, views, created_at) VALUES (?, ?, 0, ?)")
                .bind(*text)
                .bind(*author)
                .bind(format_timestamp(created_at))
                .execute(&mut *tx)
                .await
                .map_err(write_error(OP))?;
        }

        tx.commit().await.map_err(write_error(OP))?;

        Ok(SEED_QUOTES.len())
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), AppError> {
        if self.pool.is_closed() {
            return Err(AppError::StorageClosed { operation });
        }
        Ok(())
    }
}

#[async_trait]
impl QuoteRepository for SqliteQuoteRepository {
    async fn add_quote(&self, new_quote: NewQuote) -> Result<Quote, AppError> {
        const OP: &str = "add_quote";
        self.ensure_open(OP)?;

        let pool = self.pool.clone();
        let created_at = format_timestamp(Utc::now());

        run_to_completion(OP, async move {
            let row = sqlx::query_as::<_, QuoteRow>(
                r#"
                INSERT INTO quotes (text, author, views, created_at)
                VALUES (?, ?, 0, ?)
                RETURNING id, text, author, views, created_at
                "#,
            )
            .bind(new_quote.text)
            .bind(new_quote.author)
            .bind(created_at)
            .fetch_one(&pool)
            .await
            .map_err(write_error(OP))?;

            Ok(row.into())
        })
        .await
    }

    async fn random_quote(&self) -> Result<Option<Quote>, AppError> {
        const OP: &str = "random_quote";
        self.ensure_open(OP)?;

        let pool = self.pool.clone();

        run_to_completion(OP, async move {
            // Selection and increment in one statement; the scalar subquery is
            // evaluated once, under the same write lock as the update.
            let row = sqlx::query_as::<_, QuoteRow>(
                r#"
                UPDATE quotes
                SET views = views + 1
                WHERE id = (SELECT id FROM quotes ORDER BY RANDOM() LIMIT 1)
                RETURNING id, text, author, views, created_at
                "#,
            )
            .fetch_optional(&pool)
            .await
            .map_err(write_error(OP))?;

            Ok(row.map(Quote::from))
        })
        .await
    }

    async fn list_quotes(&self) -> Result<Vec<Quote>, AppError> {
        const OP: &str = "list_quotes";
        self.ensure_open(OP)?;

        let rows = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, text, author, views, created_at
            FROM quotes
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error(OP))?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn delete_quote(&self, id: i64) -> Result<bool, AppError> {
        const OP: &str = "delete_quote";
        self.ensure_open(OP)?;

        let pool = self.pool.clone();

        run_to_completion(OP, async move {
            let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
                .bind(id)
                .execute(&pool)
                .await
                .map_err(write_error(OP))?;

            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn stats(&self) -> Result<QuoteStats, AppError> {
        const OP: &str = "stats";
        self.ensure_open(OP)?;

        let (total_quotes, total_views): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(views), 0) FROM quotes")
                .fetch_one(&self.pool)
                .await
                .map_err(read_error(OP))?;

        Ok(QuoteStats {
            total_quotes,
            total_views,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        const OP: &str = "ping";
        self.ensure_open(OP)?;

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(read_error(OP))?;

        Ok(())
    }

    async fn shutdown(&self) {
        if self.pool.is_closed() {
            return;
        }

        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}

/// Runs a mutation on its own task and waits for it.
///
/// Dropping the returned future does not cancel the spawned task, so the
/// statement always finishes.
async fn run_to_completion<T, F>(operation: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(fut).await.map_err(|e| {
        AppError::internal(
            "Storage task failed",
            json!({ "operation": operation, "reason": e.to_string() }),
        )
    })?
}

/// Fixed-width UTC timestamp, so text order matches time order.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    std::fs::create_dir_all(parent).map_err(|e| {
        AppError::storage_unavailable(format!(
            "cannot create data directory {}: {e}",
            parent.display()
        ))
    })?;
    tracing::info!(path = %parent.display(), "Created data directory");

    Ok(())
}
