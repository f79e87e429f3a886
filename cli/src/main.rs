mod session;
mod surface;

use std::io;

use clap::{Parser, Subcommand};
use client::app::AnnotationApp;
use client::config::{ClientConfig, ConfigError, Timeouts};
use client::http::HttpBackend;
use client::sync::SyncError;
use tracing_subscriber::EnvFilter;

use crate::surface::{TextPanel, TextSurface};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("backend: {0}")]
    Backend(#[from] SyncError),
    #[error("I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mapcells", about = "Terminal host for the map cell annotator")]
struct Cli {
    #[arg(long, env = "MAPCELLS_BASE_URL", default_value = client::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "MAPCELLS_REQUEST_TIMEOUT_SECS", default_value_t = client::config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "MAPCELLS_CONNECT_TIMEOUT_SECS", default_value_t = client::config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate interactively; commands are read from stdin.
    Session,
    /// Print the stored points as JSON.
    Points,
    /// Check that the backend is up.
    Ping,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig {
        timeouts: Timeouts { request_secs: cli.request_timeout_secs, connect_secs: cli.connect_timeout_secs },
        ..ClientConfig::with_base_url(&cli.base_url)?
    };
    let backend = HttpBackend::new(config)?;
    tracing::debug!(base_url = %backend.config().base_url, "backend configured");

    match cli.command {
        Command::Session => run_session(backend).await,
        Command::Points => run_points(&backend).await,
        Command::Ping => run_ping(&backend).await,
    }
}

async fn run_session(backend: HttpBackend) -> Result<(), CliError> {
    let initial = backend.load_points().await?;
    let mut app = AnnotationApp::new(TextSurface::default(), TextPanel::default(), backend);
    let report = app.load(&initial).await;
    println!("loaded {} points; {}", initial.len(), session::describe(report));
    println!("{}", app.panel().status());

    session::run(&mut app, io::stdin().lock()).await?;
    Ok(())
}

async fn run_points(backend: &HttpBackend) -> Result<(), CliError> {
    let points = backend.load_points().await?;
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

async fn run_ping(backend: &HttpBackend) -> Result<(), CliError> {
    backend.health().await?;
    println!("ok");
    Ok(())
}
