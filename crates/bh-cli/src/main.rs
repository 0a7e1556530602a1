mod export;
mod harvest;
mod pipeline;
mod thresholds;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::pipeline::RunArgs;
use crate::thresholds::Thresholds;

#[derive(Debug, Parser)]
#[command(name = "builder-harvester")]
#[command(about = "Harvest, score, and deduplicate operator-angel leads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest GitHub repository owners and save the raw profiles as JSON
    #[command(name = "harvest-gh", alias = "harvest_gh")]
    HarvestGh {
        /// Comma-separated repository topics to search
        #[arg(
            long,
            value_delimiter = ',',
            default_values = ["battery-management", "iot-projects"]
        )]
        topics: Vec<String>,
        /// Minimum repository stars
        #[arg(long, default_value_t = 100)]
        stars: u32,
        /// Skip the per-owner user lookup
        #[arg(long)]
        no_enrich: bool,
    },
    /// Run the full pipeline and export qualified leads as CSV
    Run {
        /// Qualification thresholds, e.g. `operator:0.6,angel:0.7`
        #[arg(long, default_value = "operator:0.6,angel:0.7")]
        threshold: Thresholds,
        /// Comma-separated repository topics to search
        #[arg(
            long,
            value_delimiter = ',',
            default_values = ["battery-management", "iot-projects", "robotics", "embedded-systems"]
        )]
        topics: Vec<String>,
        /// Minimum repository stars
        #[arg(long, default_value_t = 100)]
        stars: u32,
        /// Replay a saved harvest file instead of calling GitHub
        #[arg(long, value_name = "FILE")]
        raw: Option<PathBuf>,
        /// Skip the per-owner user lookup
        #[arg(long)]
        no_enrich: bool,
        /// CSV output path (defaults to `<out_dir>/notion_import_<date>.csv`)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

/// Blank entries (`--topics a,,b`) are dropped.
fn clean_topics(topics: Vec<String>) -> Vec<String> {
    topics
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect()
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bh_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::HarvestGh {
            topics,
            stars,
            no_enrich,
        } => harvest::run_harvest_gh(&config, clean_topics(topics), stars, !no_enrich).await,
        Commands::Run {
            threshold,
            topics,
            stars,
            raw,
            no_enrich,
            out,
        } => {
            let args = RunArgs {
                thresholds: threshold,
                topics: clean_topics(topics),
                min_stars: stars,
                raw,
                enrich: !no_enrich,
                out,
            };
            pipeline::run_command(&config, &args).await
        }
    }
}
