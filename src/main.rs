//! Dimension router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ site detection ──▶ route part handler
//!                                                          │
//!                          ┌───────────────────────────────┤
//!                          ▼                               ▼
//!                  resolver chain                   document lookup
//!               (uri path, host prefix)          (in-memory, memoized)
//!                          │                               │
//!                          └──────────────┬────────────────┘
//!                                         ▼
//!     Client Response ◀──────────── content address / URI
//!
//!     Cross-cutting: config (+ watcher), observability, lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dimension_router::config::loader::load_config;
use dimension_router::config::ConfigWatcher;
use dimension_router::http::HttpServer;
use dimension_router::lifecycle::{shutdown_signal, RoutingRuntime, Shutdown};
use dimension_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "dimension-router")]
#[command(about = "Dimension-aware URL routing service", long_about = None)]
struct Args {
    /// Configuration file (TOML).
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Disable reloading the configuration file on change.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(&args.config)?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let runtime = RoutingRuntime::build(config)?;

    let (watcher, updates) = ConfigWatcher::new(&args.config);
    let _watcher = if args.no_watch {
        None
    } else {
        match watcher.run() {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "Config watcher unavailable, hot reload disabled");
                None
            }
        }
    };

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(runtime).run(listener, updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
