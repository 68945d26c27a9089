//! CLI administration tool for the quote service.
//!
//! Manages quotes, shows statistics and generates admin tokens without
//! going through the HTTP API. Uses the same configuration and store as the
//! server, and the same submission checks.
//!
//! # Usage
//!
//! ```bash
//! # List quotes
//! cargo run --bin quotes-admin -- quote list
//!
//! # Add a quote
//! cargo run --bin quotes-admin -- quote add --text "Stay curious." --author "Ada Lovelace"
//!
//! # Delete a quote
//! cargo run --bin quotes-admin -- quote delete 7
//!
//! # View statistics
//! cargo run --bin quotes-admin -- stats
//!
//! # Check database connection
//! cargo run --bin quotes-admin -- db check
//!
//! # Generate an admin token and its ADMIN_TOKEN_HASH
//! cargo run --bin quotes-admin -- token create
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or `DB_PATH`, `BLOCKED_TERMS`, ...

use quote_service::application::services::QuoteService;
use quote_service::application::services::auth_service::hash_token;
use quote_service::config;
use quote_service::domain::content_validator::ContentValidator;
use quote_service::error::AppError;
use quote_service::infrastructure::persistence::SqliteQuoteRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing the quote service.
#[derive(Parser)]
#[command(name = "quotes-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage quotes
    Quote {
        #[command(subcommand)]
        action: QuoteAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Admin token helpers
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
enum QuoteAction {
    /// List all quotes, newest first
    List,

    /// Add a quote (same checks as POST /quote)
    Add {
        #[arg(short, long)]
        text: String,

        #[arg(short, long)]
        author: String,
    },

    /// Delete a quote by id
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Generate an admin token and print the hash to configure
    Create {
        /// Use this token instead of generating one
        #[arg(short, long)]
        token: Option<String>,
    },
}

type Service = QuoteService<SqliteQuoteRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Token generation needs no database.
    let command = match cli.command {
        Commands::Token { action } => return handle_token_action(action),
        command => command,
    };

    let config = config::load_from_env()?;

    let validator = ContentValidator::with_extra_terms(&config.blocked_terms)
        .context("Failed to build content validator")?;
    let repository = Arc::new(
        SqliteQuoteRepository::initialize(&config.store_config())
            .await
            .context("Failed to open database")?,
    );
    let service = QuoteService::new(repository.clone(), validator);

    let result = match command {
        Commands::Quote { action } => handle_quote_action(action, &service).await,
        Commands::Stats => handle_stats(&service).await,
        Commands::Db { action } => handle_db_action(action, &service, &repository).await,
        Commands::Token { .. } => Ok(()),
    };

    service.shutdown().await;
    result
}

async fn handle_quote_action(action: QuoteAction, service: &Service) -> Result<()> {
    match action {
        QuoteAction::List => list_quotes(service).await,
        QuoteAction::Add { text, author } => add_quote(service, &text, &author).await,
        QuoteAction::Delete { id, yes } => delete_quote(service, id, yes).await,
    }
}

/// Prints all quotes as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Quotes
///
///   ID   Views  Author                Text
///   ──────────────────────────────────────────────────────────────────────
///   5    12     Oscar Wilde           Be yourself; everyone else is alre…
/// ```
async fn list_quotes(service: &Service) -> Result<()> {
    println!("{}", "📋 Quotes".bright_blue().bold());
    println!();

    let quotes = service
        .list_quotes()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list quotes: {}", e))?;

    if quotes.is_empty() {
        println!("{}", "  No quotes found".yellow());
        println!();
        println!(
            "  Add one with: {} quote add --text ... --author ...",
            "quotes-admin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<6} {:<21} {}",
        "ID".bright_white().bold(),
        "Views".bright_white().bold(),
        "Author".bright_white().bold(),
        "Text".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for quote in &quotes {
        println!(
            "  {:<4} {:<6} {:<21} {}",
            quote.id.to_string().bright_black(),
            quote.views.to_string().green(),
            truncate(&quote.author, 20).cyan(),
            truncate(&quote.text, 40)
        );
    }

    println!();
    println!(
        "  Total: {}",
        quotes.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn add_quote(service: &Service, text: &str, author: &str) -> Result<()> {
    println!("{}", "✍️  Add Quote".bright_blue().bold());
    println!();

    match service.submit_quote(text, author).await {
        Ok(quote) => {
            println!("{}", "✅ Quote added".green().bold());
            println!("  ID:     {}", quote.id.to_string().bright_white());
            println!("  Author: {}", quote.author.cyan());
            println!();
            Ok(())
        }
        Err(AppError::ContentRejected { reason }) => {
            let validator = service.validator();
            println!("{} {}", "❌ Rejected:".red().bold(), reason);
            println!("  Text:   {}", validator.sanitize(text.trim()).bright_black());
            println!("  Author: {}", validator.sanitize(author.trim()).bright_black());
            println!();
            anyhow::bail!("quote was rejected")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to add quote: {}", e)),
    }
}

/// Deletes a quote after showing it, with confirmation (default: No).
async fn delete_quote(service: &Service, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Quote".bright_blue().bold());
    println!();

    let quotes = service
        .list_quotes()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let quote = quotes
        .into_iter()
        .find(|q| q.id == id)
        .context("Quote not found")?;

    println!("  \"{}\"", truncate(&quote.text, 70).bright_white());
    println!("    - {}", quote.author.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this quote?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = service
        .remove_quote(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete quote: {}", e))?;

    if removed {
        println!("{}", "✅ Quote deleted".green().bold());
    } else {
        println!("{}", "⚠️  Quote was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays quote and view totals.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service
        .statistics()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Quotes: {}",
        stats.total_quotes.to_string().bright_green().bold()
    );
    println!(
        "  Views:  {}",
        stats.total_views.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    service: &Service,
    repository: &SqliteQuoteRepository,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(repository.pool())
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(repository.pool())
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!();
        }
    }

    Ok(())
}

fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Create { token } => create_token(token),
    }
}

/// Prints an admin token and the digest to put in `ADMIN_TOKEN_HASH`.
///
/// Only the digest is meant to be stored in the server environment; the raw
/// token is shown once.
fn create_token(token: Option<String>) -> Result<()> {
    println!("{}", "🔑 Create Admin Token".bright_blue().bold());
    println!();

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    if token_value.trim().is_empty() {
        anyhow::bail!("token must not be empty");
    }

    println!();
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!("  Hash:  {}", hash_token(&token_value).bright_white());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! Only the hash goes into the server config."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Server configuration:".bright_white());
    println!("  ADMIN_TOKEN_HASH={}", hash_token(&token_value));
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:3000/quote/1",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Generates a random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
