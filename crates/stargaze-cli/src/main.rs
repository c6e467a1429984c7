use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stargaze_apod::{gallery, ApodClient, Retriever};

mod render;

#[derive(Debug, Parser)]
#[command(name = "stargaze")]
#[command(about = "Astronomy picture-of-the-day gallery fetcher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch records for a date range; renders one card per record found.
    Range {
        #[arg(long)]
        start: NaiveDate,
        /// Defaults to `start` (single-day form).
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Fetch a fixed 9-day window; renders a placeholder for missing days.
    Window {
        #[arg(long)]
        start: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stargaze_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();
    tracing::debug!(?config, "loaded configuration");

    let retriever = Retriever::new(ApodClient::from_config(&config)?);

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Range { start, end } => {
            let end = end.unwrap_or(start);
            let result = retriever.retrieve(start, end).await?;
            render::render_slots(&gallery::exact_cards(&result), result.source)
        }
        Commands::Window { start } => {
            let end = start
                .checked_add_days(chrono::Days::new(gallery::WINDOW_DAYS - 1))
                .ok_or_else(|| anyhow::anyhow!("window extends past the supported calendar"))?;
            let result = retriever.retrieve(start, end).await?;
            render::render_slots(&gallery::fixed_window(&result, start), result.source)
        }
    };

    print!("{output}");
    Ok(())
}
