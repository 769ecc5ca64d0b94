use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use github_user_stats::report::DEFAULT_TEMPLATE;
use github_user_stats::{Config, logging, pipeline};

#[derive(Parser)]
#[command(name = "github-user-stats")]
#[command(about = "github user stats", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch user stats from GitHub and dump them as JSON lines
    Dump {
        /// User logins to collect stats for
        #[arg(long, required = true, num_args = 1..)]
        logins: Vec<String>,

        /// File to dump stats to
        #[arg(long)]
        output: PathBuf,

        /// GitHub REST API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,
    },
    /// Load stats from a JSON lines file and render them as HTML
    Html {
        /// File to load stats from
        #[arg(long)]
        stats: PathBuf,

        /// File to dump html to
        #[arg(long)]
        output: PathBuf,

        /// Template to render
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        template: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be applied before the subscriber reads RUST_LOG.
    let dotenv = dotenvy::dotenv();
    logging::init()?;
    match dotenv {
        Err(e) if !e.not_found() => warn!("Ignoring unreadable .env file: {e}"),
        _ => {}
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            logins,
            output,
            api_url,
        } => {
            let mut config = Config::from_env();
            if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
                config = config.with_api_url(url);
            }
            pipeline::run_dump(config, &logins, &output).await
        }
        Commands::Html {
            stats,
            output,
            template,
        } => pipeline::run_html(&stats, &template, &output),
    }
}
