//! TCP Client
//!
//! Caller-facing entry point: one connection, one file.

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, XferError};
use crate::session::{ClientSession, FetchOutcome};

use super::Connection;

/// Fetches files from a filexfer server
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch `filename` from the configured server into `destination`
    ///
    /// Refuses to start if `destination` already exists. The connection is
    /// closed before this returns, whatever the outcome.
    pub fn fetch(&self, filename: &str, destination: impl AsRef<Path>) -> Result<FetchOutcome> {
        let destination = destination.as_ref();
        if destination.exists() {
            return Err(XferError::DestinationExists(destination.to_path_buf()));
        }

        let conn = Connection::connect(&self.config.server_addr, self.config.connect_timeout())?;
        conn.set_timeouts(self.config.read_timeout(), self.config.write_timeout())?;
        tracing::info!("Connected to {}", conn.peer_addr());

        let mut session = ClientSession::new(conn).with_chunk_size(self.config.chunk_size);
        session.fetch(filename, destination)
    }
}
