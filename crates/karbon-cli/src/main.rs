mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "karbon")]
#[command(about = "Scrape retail product listings into a JSON export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every configured site (or the ones named) and write the export.
    Scrape {
        /// Site table; overrides `KARBON_SITES_PATH`.
        #[arg(long)]
        sites: Option<PathBuf>,
        /// Export file; overrides `KARBON_OUTPUT_PATH`.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Only scrape this site (repeatable).
        #[arg(long = "site", value_name = "NAME")]
        site_filter: Vec<String>,
    },
    /// Validate the site table and list its tasks.
    Sites {
        #[arg(long)]
        sites: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = karbon_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Scrape {
            sites,
            output,
            site_filter,
        } => {
            let sites_path = sites.unwrap_or_else(|| config.sites_path.clone());
            let output_path = output.unwrap_or_else(|| config.output_path.clone());
            scrape::run_scrape(&config, &sites_path, &output_path, &site_filter).await
        }
        Commands::Sites { sites } => {
            let sites_path = sites.unwrap_or_else(|| config.sites_path.clone());
            scrape::list_sites(&sites_path)
        }
    }
}
