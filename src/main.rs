use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::info;

use seatmap_scraper::config::Config;
use seatmap_scraper::extractor::InventoryExtractor;
use seatmap_scraper::logging;
use seatmap_scraper::runner::run_batch;
use seatmap_scraper::sink::JsonFileSink;
use seatmap_scraper::targets::{filter_targets, load_targets};

#[derive(Parser)]
#[command(name = "seatmap-scraper")]
#[command(about = "Scrapes embedded seat-inventory JSON from theater seating-plan pages")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch seat inventories for every target in the table
    Scrape {
        /// Path to the targets CSV (columns: theater, url)
        #[arg(long, default_value = "theater_data.csv")]
        targets: String,
        /// Comma-separated theater names to scrape (default: all)
        #[arg(long)]
        only: Option<String>,
        /// Output directory, overriding config.toml
        #[arg(long)]
        output_dir: Option<String>,
        /// Inter-request delay in milliseconds, overriding config.toml
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the target table without fetching anything
    ListTargets {
        /// Path to the targets CSV (columns: theater, url)
        #[arg(long, default_value = "theater_data.csv")]
        targets: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let config = Config::load()?;

    match cli.command {
        Commands::Scrape {
            targets,
            only,
            output_dir,
            delay_ms,
        } => {
            let mut table = load_targets(&targets)?;
            if let Some(only) = only {
                table = filter_targets(table, &only);
            }

            let delay = Duration::from_millis(delay_ms.unwrap_or(config.scraper.delay_ms));
            let output_dir = output_dir.unwrap_or(config.scraper.output_dir);
            let timeout = Duration::from_secs(config.scraper.timeout_seconds);

            info!(
                "Scraping {} targets into {} (delay {:?})",
                table.len(),
                output_dir,
                delay
            );

            let extractor = InventoryExtractor::new(timeout)?;
            let sink = JsonFileSink::new(&output_dir)?;
            let summary = run_batch(&extractor, &sink, &table, delay).await;

            println!(
                "✅ Scraping completed - {}/{} inventories written ({} failed)",
                summary.written, summary.attempted, summary.failed
            );
        }
        Commands::ListTargets { targets } => {
            let table = load_targets(&targets)?;
            for target in &table {
                println!("{}\t{}", target.theater, target.url);
            }
        }
    }

    Ok(())
}
