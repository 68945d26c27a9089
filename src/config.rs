//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database location
//!
//! ```bash
//! # Full URL (wins when set)
//! export DATABASE_URL="sqlite://data/quotes.db"
//!
//! # Or just the file path
//! export DB_PATH="data/quotes.db"
//! ```
//!
//! If `DATABASE_URL` is not set, it is constructed from `DB_PATH`
//! (default: `data/quotes.db`).
//!
//! ## Bind address
//!
//! `LISTEN` (`host:port`) wins over `HOST` and `PORT`
//! (defaults: `0.0.0.0` and `3000`).
//!
//! ## Optional Variables
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `ADMIN_TOKEN_HASH` - SHA-256 hex of the admin token; unset leaves deletion open
//! - `SEED_QUOTES` - Seed an empty database with sample quotes (default: `true`)
//! - `BLOCKED_TERMS` - Extra comma-separated terms for the content validator
//! - `SHUTDOWN_TIMEOUT` - Seconds in-flight requests get after a stop signal (default: 10)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::persistence::StoreConfig;

const DEFAULT_DB_PATH: &str = "data/quotes.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// SHA-256 hex digest of the admin bearer token.
    /// `None` disables the admin gate.
    pub admin_token_hash: Option<String>,
    pub seed_quotes: bool,
    /// Terms added to the built-in lexicon of the content validator.
    pub blocked_terms: Vec<String>,
    /// Seconds in-flight requests may run after a shutdown signal.
    pub shutdown_timeout: u64,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// How long SQLite waits on a locked database, in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or a boolean flag cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url = Self::load_database_url();
        let listen_addr = Self::load_listen_addr().context("Failed to load bind address")?;

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let admin_token_hash = env::var("ADMIN_TOKEN_HASH")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let seed_quotes = match env::var("SEED_QUOTES") {
            Ok(v) => parse_bool(&v).context("SEED_QUOTES must be true or false")?,
            Err(_) => true,
        };

        let blocked_terms = env::var("BLOCKED_TERMS")
            .map(|v| parse_term_list(&v))
            .unwrap_or_default();

        let shutdown_timeout = env_or("SHUTDOWN_TIMEOUT", 10);
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 5);
        let db_connect_timeout = env_or("DB_CONNECT_TIMEOUT", 30);
        let db_busy_timeout = env_or("DB_BUSY_TIMEOUT", 5);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            admin_token_hash,
            seed_quotes,
            blocked_terms,
            shutdown_timeout,
            db_max_connections,
            db_connect_timeout,
            db_busy_timeout,
        })
    }

    /// Loads database URL with fallback to the database file path.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `DB_PATH`
    fn load_database_url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        let path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        format!("sqlite://{path}")
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. Constructed from `HOST` and `PORT`
    fn load_listen_addr() -> Result<String> {
        if let Ok(listen) = env::var("LISTEN") {
            return Ok(listen);
        }

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(p) => p
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got '{p}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(format!("{host}:{port}"))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - `admin_token_hash` is not a SHA-256 hex digest
    /// - a pool size or timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if let Some(ref hash) = self.admin_token_hash
            && (hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()))
        {
            anyhow::bail!("ADMIN_TOKEN_HASH must be a 64-character hex SHA-256 digest");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }
        if self.db_busy_timeout == 0 {
            anyhow::bail!("DB_BUSY_TIMEOUT must be greater than 0");
        }
        if self.shutdown_timeout == 0 {
            anyhow::bail!("SHUTDOWN_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether deleting quotes requires an admin token.
    pub fn is_admin_gate_enabled(&self) -> bool {
        self.admin_token_hash.is_some()
    }

    /// Settings for opening the quote store.
    pub fn store_config(&self) -> StoreConfig {
        let mut store = StoreConfig::new(self.database_url.clone())
            .with_seed(self.seed_quotes)
            .with_max_connections(self.db_max_connections);
        store.acquire_timeout = Duration::from_secs(self.db_connect_timeout);
        store.busy_timeout = Duration::from_secs(self.db_busy_timeout);
        store
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!(
            "  Admin gate: {}",
            if self.is_admin_gate_enabled() {
                "enabled"
            } else {
                "disabled"
            }
        );
        tracing::info!("  Seed quotes: {}", self.seed_quotes);
        tracing::info!("  Extra blocked terms: {}", self.blocked_terms.len());
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean '{other}'"),
    }
}

fn parse_term_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
