//! filexfer Client Binary
//!
//! Fetches a single file from a filexfer server.

use std::path::PathBuf;

use clap::Parser;
use filexfer::{Client, Config, FetchOutcome};
use tracing_subscriber::{fmt, EnvFilter};

/// filexfer Client
#[derive(Parser, Debug)]
#[command(name = "filexfer-client")]
#[command(about = "Fetch a file from a filexfer server")]
#[command(version)]
struct Args {
    /// Name of the file on the server
    filename: String,

    /// Where to write the file (must not exist); defaults to the file's name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Server address (host:port)
    #[arg(short, long, default_value = "localhost:12345")]
    server: String,

    /// Connect timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Per-read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Per-write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,

    /// Payload read and write granularity in bytes
    #[arg(long, default_value = "65536")]
    chunk_size: usize,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filexfer=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let destination = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(&args.filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&args.filename))
    });

    let config = Config::builder()
        .server_addr(&args.server)
        .connect_timeout_ms(args.connect_timeout_ms)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .chunk_size(args.chunk_size)
        .build();

    match Client::new(config).fetch(&args.filename, &destination) {
        Ok(FetchOutcome::Received { bytes, crc32 }) => {
            println!(
                "{} -> {} ({} bytes, crc32 {:08x})",
                args.filename,
                destination.display(),
                bytes,
                crc32
            );
        }
        Ok(FetchOutcome::NotFound) => {
            eprintln!("Server cannot find file '{}'", args.filename);
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("Transfer failed: {}", e);
            std::process::exit(1);
        }
    }
}
