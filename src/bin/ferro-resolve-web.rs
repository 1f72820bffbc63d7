// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-resolve web service
//!
//! HTTP front-end for query resolution: search, direct navigation, and help
//! search.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ferro_resolve::config::ResolverConfig;
use ferro_resolve::service::create_app;

#[derive(Parser)]
#[command(name = "ferro-resolve-web")]
#[command(about = "Query resolution web service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web service
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override host address
        #[arg(long)]
        host: Option<String>,

        /// Override port
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of Markdown help topics
        #[arg(long)]
        help_dir: Option<PathBuf>,

        /// Log level (trace, debug, info, warn, error)
        #[arg(long, default_value = "info")]
        log_level: String,
    },

    /// Check configuration
    Check {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            help_dir,
            log_level,
        } => serve_command(config.as_deref(), host, port, help_dir, &log_level).await,
        Commands::Check { config } => check_command(config.as_deref()),
    }
}

async fn serve_command(
    config_path: Option<&Path>,
    host_override: Option<String>,
    port_override: Option<u16>,
    help_dir: Option<PathBuf>,
    log_level: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(log_level)?;

    info!("Starting ferro-resolve web service");

    let mut config = load_config(config_path)?;
    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if help_dir.is_some() {
        config.server.help_dir = help_dir;
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let (app, _state) = create_app(config)?;

    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check_command(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid");
            println!("  endpoint: {}", config.remote.endpoint);
            println!("  default dataset: {}", config.resolver.default_dataset);
            Ok(())
        }
        Err(e) => {
            println!("Configuration validation failed: {}", e);
            Err(e.into())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ResolverConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Ok(ResolverConfig::load_from_path(path)?)
        }
        None => Ok(ResolverConfig::load().unwrap_or_else(|| {
            info!("No configuration file found, using defaults");
            ResolverConfig::default()
        })),
    }
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    info!("Tracing initialized with level: {}", level);

    Ok(())
}
