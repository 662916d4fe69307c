//! CLI administration tool for ledger-blog.
//!
//! Issues admin session cookies, generates secrets and inspects the entry
//! store without going through the web editor.
//!
//! # Usage
//!
//! ```bash
//! # Generate a SESSION_SECRET value
//! cargo run --bin admin -- secret generate
//!
//! # Issue a session cookie for an administrator
//! cargo run --bin admin -- session issue --email me@example.com
//!
//! # List entries, including hidden ones
//! cargo run --bin admin -- entries list
//!
//! # Delete an entry by slug
//! cargo run --bin admin -- entries delete hello-world
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (entries, stats and db commands)
//! - `SESSION_SECRET`: HMAC key shared with the server (session command)

use ledger_blog::application::services::{AuthService, SESSION_COOKIE};
use ledger_blog::config::BlogSettings;
use ledger_blog::domain::repositories::EntryRepository;
use ledger_blog::infrastructure::persistence::PgEntryRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ledger-blog.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin session cookies
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Secrets for server configuration
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Inspect and remove entries
    Entries {
        #[command(subcommand)]
        action: EntriesAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Issue a signed session cookie
    Issue {
        /// Email to sign in as (must be listed in ADMIN_EMAILS on the server)
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum SecretAction {
    /// Print a random SESSION_SECRET
    Generate,
}

#[derive(Subcommand)]
enum EntriesAction {
    /// List all entries, newest first
    List,

    /// Delete an entry
    Delete {
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[derive(sqlx::FromRow)]
struct EntrySummary {
    id: i64,
    slug: String,
    title: String,
    published: DateTime<Utc>,
    hidden: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Session { action } => handle_session_action(action)?,
        Commands::Secret { action } => handle_secret_action(action),
        Commands::Entries { action } => handle_entries_action(action, &connect().await?).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Signs a session cookie with the server's `SESSION_SECRET`.
///
/// Whether the email is an administrator is decided by the server's
/// `ADMIN_EMAILS` when the cookie is presented.
fn handle_session_action(action: SessionAction) -> Result<()> {
    let SessionAction::Issue { email } = action;

    let secret = std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let auth = AuthService::new(secret, &BlogSettings::default());
    let value = auth
        .issue_session(&email)
        .map_err(|e| anyhow::anyhow!("Failed to issue session: {}", e))?;

    println!("{}", "Session cookie".bright_blue().bold());
    println!();
    println!("  {}={}", SESSION_COOKIE.bright_cyan(), value.bright_yellow());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -b \"{}={}\" http://localhost:3000/compose",
        SESSION_COOKIE,
        value.bright_yellow()
    );
    println!();

    Ok(())
}

fn handle_secret_action(action: SecretAction) {
    match action {
        SecretAction::Generate => println!("{}", generate_secret()),
    }
}

async fn handle_entries_action(action: EntriesAction, pool: &PgPool) -> Result<()> {
    match action {
        EntriesAction::List => list_entries(pool).await,
        EntriesAction::Delete { slug, yes } => delete_entry(pool, &slug, yes).await,
    }
}

/// Lists every entry with a visibility marker.
///
/// # Output Format
///
/// ```text
///   ID    Slug                           Published         Status
///   ---------------------------------------------------------------------------
///   12    hello-world                    2024-01-15 10:30  VISIBLE
/// ```
async fn list_entries(pool: &PgPool) -> Result<()> {
    println!("{}", "Entries".bright_blue().bold());
    println!();

    let entries: Vec<EntrySummary> = sqlx::query_as(
        "SELECT id, slug, title, published, hidden FROM entries ORDER BY published DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    if entries.is_empty() {
        println!("{}", "  No entries yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<17} {:<8}",
        "ID".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Published".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for entry in &entries {
        let status = if entry.hidden {
            "HIDDEN".yellow()
        } else {
            "VISIBLE".green()
        };

        println!(
            "  {:<5} {:<30} {:<17} {}",
            entry.id.to_string().bright_black(),
            entry.slug.cyan(),
            entry
                .published
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
        println!("        {}", entry.title);
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes an entry by slug after confirmation (default: No).
///
/// A cached home page may keep showing the entry until its TTL expires.
async fn delete_entry(pool: &PgPool, slug: &str, skip_confirm: bool) -> Result<()> {
    let repo = PgEntryRepository::new(Arc::new(pool.clone()));

    let entry = repo
        .find_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Entry not found")?;

    println!("  Entry: {}", entry.title.cyan());
    println!("  ID:    {}", entry.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this entry?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(entry.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete entry: {}", e))?;

    println!("{}", "Entry deleted".green().bold());
    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries")
        .fetch_one(pool)
        .await?;

    let hidden: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entries WHERE hidden")
        .fetch_one(pool)
        .await?;

    let tags: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT tag) FROM entries, unnest(tags) AS tag")
            .fetch_one(pool)
            .await?;

    println!("  Entries: {}", total.to_string().bright_green().bold());
    println!("  Hidden:  {}", hidden.to_string().bright_green().bold());
    println!("  Tags:    {}", tags.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Random alphanumeric secret, 64 characters.
fn generate_secret() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const SECRET_LEN: usize = 64;

    let mut rng = rand::rng();

    (0..SECRET_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
