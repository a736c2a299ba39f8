//! Emporium CLI - Database migrations and reporting tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! emporium-cli migrate
//!
//! # Print the benchmark report of shop 1
//! emporium-cli benchmark --shop-id 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `benchmark` - Print a shop's benchmark report as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use uuid::Uuid;

use emporium_core::ShopId;

mod commands;

#[derive(Parser)]
#[command(name = "emporium-cli")]
#[command(author, version, about = "Emporium CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print a shop's benchmark report
    Benchmark {
        /// Shop to report on
        #[arg(short, long)]
        shop_id: ShopId,

        /// Language for translated names (defaults to the shop default)
        #[arg(short, long)]
        language: Option<Uuid>,
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
        Commands::Benchmark { shop_id, language } => {
            commands::benchmark::run(shop_id, language).await?;
        }
    }
    Ok(())
}
