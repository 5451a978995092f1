//! ReviewLens: review intelligence pipeline: dataset build and topic queries.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reviewlens_core::ReviewLensConfig;
use reviewlens_query::QueryOutcome;
use reviewlens_server::{build_router, commands, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Turn raw product reviews into a labeled dataset and per-sentiment topics.
#[derive(Parser, Debug)]
#[command(name = "reviewlens")]
#[command(author, version, about)]
struct Cli {
    /// Data directory (raw shards, snapshot, models). Overrides REVIEWLENS_DATA_DIR.
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the cleaned, labeled dataset from raw shards
    Build,
    /// Start the HTTP API
    Serve {
        /// Listen port. Overrides PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print positive and negative topics for one product keyword
    Query {
        keyword: String,
    },
    /// Print descriptive statistics of the persisted dataset
    Stats,
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("REVIEWLENS_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    info!("Data directory: {}", data_dir.display());

    let mut config = ReviewLensConfig::from_env(&data_dir)?;

    match cli.command {
        Command::Build => {
            let report = tokio::task::spawn_blocking(move || commands::build_dataset(&config)).await??;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Stats => {
            let stats = commands::dataset_stats(&config)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Query { keyword } => {
            let state = AppState::from_config(config)?;
            let outcome = tokio::task::spawn_blocking(move || state.query.query(&keyword)).await??;
            match outcome {
                QueryOutcome::NoMatches { keyword } => {
                    println!("No reviews found for products matching '{}'.", keyword);
                }
                QueryOutcome::Topics(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let port = config.port;

            // Embedder load failures abort here, before binding
            let state = Arc::new(AppState::from_config(config)?);
            if !state.config.data_paths.dataset_file.exists() {
                info!(
                    "No dataset at {} yet; run `reviewlens build` before querying",
                    state.config.data_paths.dataset_file.display()
                );
            }

            let app = build_router(state);
            let addr = format!("0.0.0.0:{}", port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("ReviewLens server listening on {}", addr);

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
