//! Sahara CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! sahara-cli migrate catalog
//!
//! # Run cart database migrations
//! sahara-cli migrate cart
//!
//! # Run all database migrations
//! sahara-cli migrate all
//!
//! # Seed the catalog with demo items
//! sahara-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog with demo items

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sahara-cli")]
#[command(author, version, about = "Sahara CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Seed the catalog database with demo items
    Seed,
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run catalog database migrations
    Catalog,
    /// Run cart database migrations
    Cart,
    /// Run all database migrations
    All,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Catalog => commands::migrate::catalog().await?,
            MigrateTarget::Cart => commands::migrate::cart().await?,
            MigrateTarget::All => {
                commands::migrate::catalog().await?;
                commands::migrate::cart().await?;
            }
        },
        Commands::Seed => commands::seed::catalog_items().await?,
    }
    Ok(())
}
