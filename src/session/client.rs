//! Client session

use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::protocol::{read_response_header, write_request, Status};
use crate::storage::Destination;
use crate::transport::read_exact_into;

/// Default size of each payload piece pulled off the stream
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Where a client session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Connected,
    AwaitingResponseHeader,
    ReceivingPayload,
    Done,
    Failed,
}

/// Result of a completed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Payload written to the destination
    Received { bytes: u64, crc32: u32 },

    /// Server answered FAIL; nothing was written
    NotFound,
}

/// Drives one request/response exchange over an established stream
pub struct ClientSession<S> {
    stream: S,
    state: ClientState,
    chunk_size: usize,
}

impl<S: Read + Write> ClientSession<S> {
    /// Start a session on a connected stream
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            state: ClientState::Connected,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the payload chunk size (clamped to at least 1 byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// Request `filename` and persist the reply to `destination`
    ///
    /// The session ends in `Done` or `Failed`; it is not reusable.
    pub fn fetch(&mut self, filename: &str, destination: &Path) -> Result<FetchOutcome> {
        let result = self.exchange(filename, destination);
        self.state = match result {
            Ok(_) => ClientState::Done,
            Err(ref e) => {
                tracing::warn!(filename, state = ?self.state, "Fetch failed: {}", e);
                ClientState::Failed
            }
        };
        result
    }

    fn exchange(&mut self, filename: &str, destination: &Path) -> Result<FetchOutcome> {
        let sent = write_request(&mut self.stream, filename)?;
        tracing::debug!(filename, bytes = sent, "File request sent");
        self.state = ClientState::AwaitingResponseHeader;

        let header = read_response_header(&mut self.stream)?;
        tracing::debug!(status = ?header.status, data_len = header.data_len, "Response header received");

        match header.status {
            Status::Fail => {
                tracing::info!(filename, "Server cannot find file");
                Ok(FetchOutcome::NotFound)
            }
            Status::Success => {
                self.state = ClientState::ReceivingPayload;
                self.receive_payload(header.payload_len(), destination)
            }
        }
    }

    /// Pull exactly `len` payload bytes into `destination`
    fn receive_payload(&mut self, len: usize, destination: &Path) -> Result<FetchOutcome> {
        let mut dest = Destination::create(destination)?;
        let mut hasher = crc32fast::Hasher::new();
        let mut buf = vec![0u8; self.chunk_size.min(len)];
        let mut remaining = len;

        while remaining > 0 {
            let piece = &mut buf[..remaining.min(self.chunk_size)];
            read_exact_into(&mut self.stream, piece)?;
            hasher.update(piece);
            dest.write_chunk(piece)?;
            remaining -= piece.len();
        }

        let bytes = dest.commit()?;
        let crc32 = hasher.finalize();
        tracing::info!(
            bytes,
            crc32 = %format!("{:08x}", crc32),
            destination = %destination.display(),
            "File data written"
        );

        Ok(FetchOutcome::Received { bytes, crc32 })
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}
