//! Tally CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply dashboard database migrations
//! tally migrate
//!
//! # Insert invoices from a YAML file
//! tally seed crates/cli/seed/invoices.yaml
//! ```
//!
//! Both commands read `DASHBOARD_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Tally CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert invoices listed in a YAML file
    Seed {
        /// Path to the YAML file
        file: PathBuf,
    },
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => {
            let inserted = commands::seed::invoices(&file).await?;
            tracing::info!(inserted, "Seeding complete");
        }
    }
    Ok(())
}
