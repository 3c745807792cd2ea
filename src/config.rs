//! Configuration for filexfer
//!
//! Centralized configuration with sensible defaults, shared by the
//! server and client entry points.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, XferError};

/// Lowest port the server accepts to listen on
pub const MIN_LISTEN_PORT: u16 = 1024;

/// Highest port the server accepts to listen on
pub const MAX_LISTEN_PORT: u16 = 64000;

/// Main configuration for a filexfer server or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address (server)
    pub listen_addr: String,

    /// Server address to connect to (client), resolved through DNS
    pub server_addr: String,

    /// Listen backlog; also bounds connections accepted but not yet picked
    /// up by a worker
    pub backlog: usize,

    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory the server resolves requested filenames against
    pub root_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Concurrency Configuration
    // -------------------------------------------------------------------------
    /// Number of worker threads serving connections. 1 = sequential service.
    pub workers: usize,

    // -------------------------------------------------------------------------
    // Timeout Configuration (0 disables the timeout)
    // -------------------------------------------------------------------------
    /// Client connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Transfer Configuration
    // -------------------------------------------------------------------------
    /// Size of each payload piece the client pulls off the socket before
    /// persisting it
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:12345".to_string(),
            server_addr: "localhost:12345".to_string(),
            backlog: 5,
            root_dir: PathBuf::from("."),
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            chunk_size: 64 * 1024, // 64 KB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings a server needs before it binds.
    pub fn validate(&self) -> Result<()> {
        let addr: SocketAddr = self.listen_addr.parse().map_err(|e| {
            XferError::Config(format!("invalid listen address {:?}: {}", self.listen_addr, e))
        })?;

        // Port 0 asks the OS for an ephemeral port, used by tests.
        let port = addr.port();
        if port != 0 && !(MIN_LISTEN_PORT..=MAX_LISTEN_PORT).contains(&port) {
            return Err(XferError::Config(format!(
                "listen port {} outside allowed range {}..={}",
                port, MIN_LISTEN_PORT, MAX_LISTEN_PORT
            )));
        }
        if self.workers == 0 {
            return Err(XferError::Config("workers must be at least 1".to_string()));
        }
        if self.backlog == 0 {
            return Err(XferError::Config("backlog must be at least 1".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(XferError::Config("chunk_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the server address the client connects to
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the listen backlog
    pub fn backlog(mut self, backlog: usize) -> Self {
        self.config.backlog = backlog;
        self
    }

    /// Set the directory files are served from
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the number of worker threads
    pub fn workers(mut self, count: usize) -> Self {
        self.config.workers = count;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the payload chunk size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
