//! getjson server binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client GET           ┌──────────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ http ──▶ dispatch ──▶ routing (RouteTable)     │
//!                          │                │                                  │
//!                          │                ▼                                  │
//!                          │          handler group ──▶ convert ──▶ document   │
//!     JSON text            │                                          │        │
//!     ◀────────────────────┼──────────────── http ◀───────────────────┘        │
//!                          │                                                   │
//!                          │   config · observability · lifecycle              │
//!                          └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use getjson::config::{load_config, validate_config, AppConfig, ConfigError};
use getjson::lifecycle::{wait_for_signal, Shutdown};
use getjson::observability::{logging, metrics};
use getjson::{demo_dispatcher, HttpServer};

#[derive(Parser)]
#[command(name = "getjson")]
#[command(about = "Serve handler groups as JSON over GET", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Dispatch one request path locally and print the result
    Dispatch {
        /// Request path, query string included
        path: String,
    },
    /// Print the route table
    Routes,
}

fn load(path: Option<&PathBuf>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load(cli.config.as_ref())?;

    logging::init(&config.observability);

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
                validate_config(&config).map_err(ConfigError::Validation)?;
            }
            serve(config).await?;
        }
        Commands::Dispatch { path } => {
            let dispatcher = demo_dispatcher(&config)?;
            match dispatcher.dispatch(&path) {
                Ok(document) => println!("{}", document),
                Err(e) => {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Routes => {
            let dispatcher = demo_dispatcher(&config)?;
            for entry in dispatcher.table().entries() {
                let params: Vec<String> = entry
                    .params()
                    .iter()
                    .map(|p| format!("{}: {} ({})", p.name, p.kind, p.source))
                    .collect();
                println!(
                    "{:<28} {}::{} [{}]",
                    entry.key(),
                    entry.group(),
                    entry.handler(),
                    params.join(", ")
                );
            }
        }
    }

    Ok(())
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("getjson v{} starting", env!("CARGO_PKG_VERSION"));

    let dispatcher = demo_dispatcher(&config)?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = dispatcher.table().len(),
        duplicate_routes = ?config.routing.duplicate_routes,
        route_miss = ?config.routing.route_miss,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(wait_for_signal(shutdown));

    let server = HttpServer::new(config, dispatcher);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
