//! HTTP server binary for featuredoc.
//!
//! Accepts `.feature` uploads, converts them into DOCX scenario tables, and
//! serves the generated documents for a limited time.

use std::net::SocketAddr;
use std::num::{NonZeroU64, NonZeroUsize};

use clap::Parser;
use tracing::info;

use featuredoc_server::config::{ConfigOverrides, LogLevel, ServerConfig};
use featuredoc_server::error::ServerError;
use featuredoc_server::logging::init_logging;
use featuredoc_server::server::serve;

/// Convert uploaded Gherkin feature files into DOCX scenario tables.
#[derive(Parser, Debug)]
#[command(name = "featuredoc-server", version, about)]
struct Args {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Address to listen on, e.g. `0.0.0.0:8000`.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Largest accepted feature file in bytes.
    #[arg(long)]
    max_upload_bytes: Option<NonZeroUsize>,

    /// Seconds a generated document remains downloadable.
    #[arg(long)]
    cache_ttl_secs: Option<NonZeroU64>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            let fallback = ServerConfig::default();
            init_logging(&fallback);
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting featuredoc-server"
    );

    if let Err(e) = run_server(config) {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<ServerConfig, ServerError> {
    let config = ServerConfig::from_env()?;
    Ok(config.apply_overrides(ConfigOverrides {
        log_level: args.log_level,
        bind_addr: args.bind,
        max_upload_bytes: args.max_upload_bytes,
        cache_ttl_secs: args.cache_ttl_secs,
    }))
}

/// Run the HTTP server on a multi-threaded runtime.
fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve(config))
}
