//! Server session

use std::io::{Read, Write};

use crate::error::{Result, XferError};
use crate::protocol::{read_request, write_response, ResponseFrame};
use crate::storage::FileStore;

/// What the server sent back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    /// SUCCESS with the file contents
    Sent { filename: String, bytes: usize },

    /// FAIL; the file was missing or unreadable
    NotFound { filename: String },
}

/// Serves one request on one stream
pub struct ServerSession<'a, S, F: ?Sized> {
    stream: S,
    store: &'a F,
}

impl<'a, S: Read + Write, F: FileStore + ?Sized> ServerSession<'a, S, F> {
    pub fn new(stream: S, store: &'a F) -> Self {
        Self { stream, store }
    }

    /// Receive the request, look the file up and send the response
    ///
    /// Header validation and transport errors are returned to the caller
    /// without writing anything; a missing file is not an error.
    pub fn run(&mut self) -> Result<ServeOutcome> {
        let request = read_request(&mut self.stream)?;
        let filename = request.into_filename();
        tracing::debug!(filename = %filename, "File request received");

        let response = match self.store.load(&filename) {
            Ok(data) => {
                tracing::debug!(
                    filename = %filename,
                    bytes = data.len(),
                    crc32 = %format!("{:08x}", crc32fast::hash(&data)),
                    "File data read"
                );
                ResponseFrame::success(data)
            }
            Err(XferError::PayloadTooLarge(len)) => {
                tracing::warn!(filename = %filename, bytes = len, "File too large to send");
                ResponseFrame::fail()
            }
            Err(e) => {
                tracing::debug!(filename = %filename, "File unavailable: {}", e);
                ResponseFrame::fail()
            }
        };

        let (sent, outcome) = match write_response(&mut self.stream, &response) {
            Ok(sent) => (sent, Self::outcome(&response, filename)),
            Err(XferError::PayloadTooLarge(len)) => {
                // Stores that do not check the size up front
                tracing::warn!(filename = %filename, bytes = len, "File too large to send");
                let sent = write_response(&mut self.stream, &ResponseFrame::fail())?;
                (sent, ServeOutcome::NotFound { filename })
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(bytes = sent, "File response sent");
        Ok(outcome)
    }

    fn outcome(response: &ResponseFrame, filename: String) -> ServeOutcome {
        match response {
            ResponseFrame::Success { payload } => ServeOutcome::Sent {
                filename,
                bytes: payload.len(),
            },
            ResponseFrame::Fail => ServeOutcome::NotFound { filename },
        }
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}
