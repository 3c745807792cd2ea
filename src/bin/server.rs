//! filexfer Server Binary
//!
//! Serves files from a directory over the filexfer protocol.

use std::sync::Arc;

use clap::Parser;
use filexfer::storage::DirStore;
use filexfer::{Config, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// filexfer Server
#[derive(Parser, Debug)]
#[command(name = "filexfer-server")]
#[command(about = "Serve files over a minimal TCP file-transfer protocol")]
#[command(version)]
struct Args {
    /// Listen address (host:port), port within 1024..=64000
    #[arg(short, long, default_value = "127.0.0.1:12345")]
    listen: String,

    /// Directory to serve files from
    #[arg(short, long, default_value = ".")]
    root: String,

    /// Worker threads serving connections (defaults to the number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Listen backlog / pending connection queue size
    #[arg(short, long, default_value = "5")]
    backlog: usize,

    /// Per-read timeout in milliseconds (must be non-zero)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Per-write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filexfer=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("filexfer server v{}", filexfer::VERSION);
    tracing::info!("Serving directory: {}", args.root);

    // Build config from args
    let mut builder = Config::builder()
        .listen_addr(&args.listen)
        .root_dir(&args.root)
        .backlog(args.backlog)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms);
    if let Some(workers) = args.workers {
        builder = builder.workers(workers);
    }
    let config = builder.build();

    let store = Arc::new(DirStore::new(&config.root_dir));

    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
