//! CLI administration tool for shortly.
//!
//! Shortens and resolves links directly against the PostgreSQL store and
//! performs database maintenance without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Look up a code
//! cargo run --bin admin -- resolve aZ3_kQ9xPb
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `DB_*` pool settings and `SHORTEN_MAX_ATTEMPTS` as for the server

use shortly::application::services::ShortenerService;
use shortly::config;
use shortly::domain::repositories::MappingRepository;
use shortly::error::ShortenError;
use shortly::infrastructure::persistence::{PgMappingRepository, pg_pool};
use shortly::utils::code_generator::{CodeGenerator, OsCodeGenerator};
use shortly::utils::url_validator::validate_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// CLI tool for managing shortly.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create (or fetch) the short code for a URL
    Shorten {
        /// URL to shorten (http or https)
        url: String,

        /// Override the create retry budget
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
        max_attempts: Option<u16>,
    },

    /// Print the original URL for a short code
    Resolve {
        /// Short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    let pool = pg_pool::connect(&config).await?;

    let result = match cli.command {
        Commands::Shorten { url, max_attempts } => {
            let max_attempts = match max_attempts {
                Some(n) => NonZeroUsize::new(usize::from(n))
                    .context("--max-attempts must be at least 1")?,
                None => config.max_attempts()?,
            };
            handle_shorten(&pool, &url, max_attempts).await
        }
        Commands::Resolve { code } => handle_resolve(&pool, &code).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

fn shortener(pool: &PgPool) -> ShortenerService<PgMappingRepository> {
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));
    ShortenerService::new(repository, OsCodeGenerator)
}

/// Shortens `url` and prints the resulting code with the URL as stored.
async fn handle_shorten(pool: &PgPool, url: &str, max_attempts: NonZeroUsize) -> Result<()> {
    let service = shortener(pool).with_max_attempts(max_attempts);

    match shorten_link(&service, url).await {
        Ok((code, stored_url)) => {
            println!("{}", "✅ Short link ready".green().bold());
            println!();
            println!("  Code: {}", code.bright_green().bold());
            println!("  URL:  {}", stored_url.bright_white());
            println!();
            Ok(())
        }
        Err(ShortenError::InvalidUrl(reason)) => {
            println!("{} {}", "❌ Invalid URL:".red().bold(), reason);
            anyhow::bail!("URL rejected")
        }
        Err(e) => Err(anyhow::Error::from(e).context("Failed to shorten URL")),
    }
}

/// Creates the mapping and returns `(code, normalized_url)`.
///
/// The normalized form is what the store holds and what the redirect serves,
/// which may differ from the argument in scheme case, host case or port.
async fn shorten_link<R, G>(
    service: &ShortenerService<R, G>,
    url: &str,
) -> Result<(String, String), ShortenError>
where
    R: MappingRepository + ?Sized,
    G: CodeGenerator,
{
    let normalized = validate_url(url)?;
    let code = service.create(&normalized).await?;
    Ok((code, normalized))
}

/// Resolves `code` and prints the original URL.
async fn handle_resolve(pool: &PgPool, code: &str) -> Result<()> {
    match shortener(pool).resolve(code).await {
        Ok(url) => {
            println!("{}", url.bright_white());
            Ok(())
        }
        Err(ShortenError::NotFound) => {
            println!("{} {}", "❌ No link for code".red().bold(), code.yellow());
            anyhow::bail!("Code not found")
        }
        Err(e) => Err(anyhow::Error::from(e).context("Failed to resolve code")),
    }
}

/// Handles database diagnostic commands.
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

            let repository = PgMappingRepository::new(Arc::new(pool.clone()));
            let mappings = repository
                .count()
                .await
                .context("Failed to count mappings (run `admin db migrate` first?)")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                mappings.to_string().bright_green().bold()
            );
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🔧 Applying migrations...".bright_blue());

            pg_pool::migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortly::infrastructure::persistence::InMemoryMappingRepository;

    #[tokio::test]
    async fn test_shorten_link_reports_stored_url() {
        let service = ShortenerService::new(
            Arc::new(InMemoryMappingRepository::new()),
            OsCodeGenerator,
        );

        let (code, stored) = shorten_link(&service, "  HTTPS://Example.COM:443/Docs?q=1 ")
            .await
            .unwrap();

        assert_eq!(stored, "https://example.com/Docs?q=1");
        assert_eq!(service.resolve(&code).await.unwrap(), stored);
    }

    #[tokio::test]
    async fn test_shorten_link_rejects_invalid_url() {
        let service = ShortenerService::new(
            Arc::new(InMemoryMappingRepository::new()),
            OsCodeGenerator,
        );

        assert!(matches!(
            shorten_link(&service, "ftp://example.com/").await,
            Err(ShortenError::InvalidUrl(_))
        ));
    }
}
