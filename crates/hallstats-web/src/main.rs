//! Seminar hall booking dashboard server and report CLI

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::{Parser, Subcommand, ValueEnum};
use hallstats_core::{
    Config, LogFormat, context_error, context_error::Result, init_logging,
};
use hallstats_web::{AppState, Dashboard, build_app_with_state, render::TextReport};
use std::{net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Command line interface for the booking dashboard
#[derive(Parser)]
#[command(
    name = "hallstats",
    version = env!("CARGO_PKG_VERSION"),
    about = "Seminar hall booking analytics dashboard"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand, `serve` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard over HTTP
    Serve,

    /// Fetch once and print the dashboard summary
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
}

/// Output format of the `report` command
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    // An explicit config file must load; the implicit one falls back to defaults
    let (mut config, load_error) = match Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) if cli.config.is_none() => (Config::default(), Some(e)),
        Err(e) => return Err(context_error!("Failed to load configuration: {}", e)),
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = LogFormat::Json;
    }

    init_logging(&config.logging)?;

    if let Some(e) = load_error {
        warn!("Failed to load config ({}), using defaults", e);
    }

    let state = AppState::new(config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(state).await,
        Commands::Report { format } => report(&state, format).await,
    }
}

async fn serve(state: AppState) -> Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        state.config.webserver.host, state.config.webserver.port
    )
    .parse()
    .map_err(|e| context_error!("Invalid server address: {}", e))?;

    info!(
        "Starting hallstats v{} on {}, bookings from {}",
        env!("CARGO_PKG_VERSION"),
        addr,
        state.config.source.bookings_url()
    );

    let app = build_app_with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| context_error!("Failed to bind to {}: {}", addr, e))?;

    info!("Dashboard: http://{}/", addr);
    info!("Health:    http://{}/health", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| context_error!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}

async fn report(state: &AppState, format: ReportFormat) -> Result<()> {
    let view = Dashboard::load(state.source.as_ref(), state.config.aggregation)
        .await
        .view();

    match format {
        ReportFormat::Table => print!("{}", TextReport(&view)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
