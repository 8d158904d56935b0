//! CLI administration tool for storefront-api.
//!
//! Provides commands for issuing API tokens, viewing traffic reports,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for an admin user
//! cargo run --bin admin -- token create --name "Ops" --user-id u-1 --user-name Ann \
//!     --permissions audit_logs.read,reports.read
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Ops"
//!
//! # Traffic overview for the last 24 hours and 7 days
//! cargo run --bin admin -- reports
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's value

use storefront_api::application::services::{ReportService, hash_token};
use storefront_api::domain::entities::RankedCount;
use storefront_api::domain::repositories::{NewApiToken, TokenRepository};
use storefront_api::infrastructure::persistence::{PgAuditRepository, PgTokenRepository};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use rand::RngCore;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing storefront-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show the traffic overview report
    Reports,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Checkout App", "Ops Dashboard")
        #[arg(short, long)]
        name: Option<String>,

        /// User the token acts as
        #[arg(long)]
        user_id: Option<String>,

        /// Display name recorded in the audit trail
        #[arg(long)]
        user_name: Option<String>,

        /// Comma-separated permissions (e.g. "audit_logs.read,reports.read", or "*")
        #[arg(short, long, value_delimiter = ',')]
        permissions: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Reports => handle_reports(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            name,
            user_id,
            user_name,
            permissions,
            yes,
        } => {
            let signing_secret = std::env::var("TOKEN_SIGNING_SECRET")
                .context("TOKEN_SIGNING_SECRET must be set")?;
            let draft = TokenDraft {
                name: prompt_or(name, "Token name", "Ops Dashboard")?,
                user_id: prompt_or(user_id, "User ID", "")?,
                user_name: prompt_or(user_name, "User name", "")?,
                permissions: normalize_permissions(permissions),
            };
            create_token(repo, &signing_secret, draft, yes).await?;
        }
        TokenAction::List => list_tokens(repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(repo, name_or_id).await?,
    }

    Ok(())
}

struct TokenDraft {
    name: String,
    user_id: String,
    user_name: String,
    permissions: Vec<String>,
}

fn prompt_or(value: Option<String>, prompt: &str, initial: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .with_initial_text(initial)
            .interact_text()?),
    }
}

fn normalize_permissions(permissions: Vec<String>) -> Vec<String> {
    let mut permissions: Vec<String> = permissions
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    permissions.sort();
    permissions.dedup();
    permissions
}

/// Issues a token: generate, show once, confirm, then store its HMAC hash.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    signing_secret: &str,
    draft: TokenDraft,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_value = generate_token();
    let permissions_label = if draft.permissions.is_empty() {
        "(none: checkout only)".to_string()
    } else {
        draft.permissions.join(", ")
    };

    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:        {}", draft.name.cyan());
    println!("  User:        {} ({})", draft.user_name.cyan(), draft.user_id);
    println!("  Permissions: {}", permissions_label.cyan());
    println!("  Token:       {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let created = repo
        .create_token(NewApiToken {
            name: draft.name,
            token_hash: hash_token(signing_secret, &token_value),
            user_id: draft.user_id,
            user_name: draft.user_name,
            permissions: draft.permissions,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ Token created successfully!".green().bold(),
        created.id
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/admin/reports/overview",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<16} {:<32} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "User".bright_white().bold(),
        "Permissions".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<4} {:<24} {:<16} {:<32} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.user_id,
            token.permissions.join(","),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token looked up by numeric ID or exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .list_tokens()
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .into_iter()
            .find(|t| t.id == id),
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Prints the same overview the admin reports endpoint returns.
async fn handle_reports(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Traffic Overview".bright_blue().bold());
    println!();

    let service = ReportService::new(Arc::new(PgAuditRepository::new(Arc::new(pool.clone()))));
    let reports = service
        .overview(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build report: {}", e))?;

    for report in &reports {
        println!(
            "  {} {}",
            "Window".bright_white().bold(),
            report.window.label().bright_cyan().bold()
        );
        println!(
            "    Requests: {}   Errors: {}",
            report.counts.total.to_string().bright_green().bold(),
            report.counts.errors.to_string().red().bold()
        );
        print_ranked("Top paths", &report.top_paths);
        print_ranked("Top users", &report.top_users);
        println!();
    }

    Ok(())
}

fn print_ranked(title: &str, items: &[RankedCount]) {
    println!("    {}:", title.bright_white());
    if items.is_empty() {
        println!("      {}", "-".bright_black());
    }
    for item in items {
        println!("      {:>6}  {}", item.count.to_string().bright_black(), item.key);
    }
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let audit_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Audit logs: {}", audit_rows.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// 32 random bytes, base64url without padding (43 characters).
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
