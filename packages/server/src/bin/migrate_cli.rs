//! CLI for applying and inspecting schema migrations
//!
//! Outputs one JSON object per line so scripts can parse the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use records_core::config::Config;
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::collections::HashSet;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI for the records database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// List migrations and whether each has been applied
    Status,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    applied: bool,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Run => run(&pool).await,
        Commands::Status => status(&pool).await,
    };

    if let Err(e) = &result {
        output(&Response {
            success: false,
            message: Some(format!("{:#}", e)),
            migrations: None,
        })?;
    }
    result
}

async fn run(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    output(&Response {
        success: true,
        message: Some("Migrations applied".to_string()),
        migrations: None,
    })
}

async fn status(pool: &PgPool) -> Result<()> {
    let applied = applied_versions(pool).await?;

    let migrations = MIGRATOR
        .iter()
        .map(|m| MigrationInfo {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect();

    output(&Response {
        success: true,
        message: None,
        migrations: Some(migrations),
    })
}

/// Versions recorded as successfully applied. A fresh database has no
/// bookkeeping table yet, which means nothing is applied.
async fn applied_versions(pool: &PgPool) -> Result<HashSet<i64>> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await
    .context("Failed to inspect migration table")?;

    if !table_exists {
        return Ok(HashSet::new());
    }

    let versions: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success = true")
            .fetch_all(pool)
            .await
            .context("Failed to read applied migrations")?;

    Ok(versions.into_iter().collect())
}
