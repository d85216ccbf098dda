//! Database migration commands.
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `PostgreSQL` connection string for the catalog
//! - `CART_DATABASE_URL` - `PostgreSQL` connection string for the cart
//!
//! Migration files live next to the service they belong to:
//! `crates/catalog/migrations/` and `crates/cart/migrations/`. They are
//! embedded into this binary at compile time via `sqlx::migrate!`.

use sqlx::PgPool;
use thiserror::Error;

/// Errors from migration commands.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the environment variable is missing, the
/// connection fails, or a migration fails.
pub async fn catalog() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CATALOG_DATABASE_URL")
        .map_err(|_| MigrationError::MissingEnvVar("CATALOG_DATABASE_URL"))?;

    tracing::info!("Connecting to catalog database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../catalog/migrations").run(&pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}

/// Run cart database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the environment variable is missing, the
/// connection fails, or a migration fails.
pub async fn cart() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CART_DATABASE_URL")
        .map_err(|_| MigrationError::MissingEnvVar("CART_DATABASE_URL"))?;

    tracing::info!("Connecting to cart database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running cart migrations...");
    sqlx::migrate!("../cart/migrations").run(&pool).await?;

    tracing::info!("Cart migrations complete!");
    Ok(())
}
