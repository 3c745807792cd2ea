//! Error types for filexfer
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using XferError
pub type Result<T> = std::result::Result<T, XferError>;

/// Unified error type for filexfer operations
#[derive(Debug, Error)]
pub enum XferError {
    // -------------------------------------------------------------------------
    // Frame Validation Errors
    // -------------------------------------------------------------------------
    #[error("bad magic number: 0x{0:04x}")]
    BadMagic(u16),

    #[error("bad frame type: expected {expected}, got {actual}")]
    BadType { expected: u8, actual: u8 },

    #[error("bad response status: {0}")]
    BadStatus(u8),

    #[error("filename too long: {0} bytes")]
    FilenameTooLong(usize),

    #[error("filename is not valid UTF-8")]
    InvalidFilename,

    #[error("payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("peer closed connection after {received} of {expected} bytes")]
    PeerClosed { expected: usize, received: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl XferError {
    /// True when the error is a socket read/write timeout.
    ///
    /// Unix reports an expired `SO_RCVTIMEO` as `WouldBlock`, Windows as `TimedOut`.
    pub fn is_timeout(&self) -> bool {
        match self {
            XferError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// True for errors raised by header validation, before any payload I/O.
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            XferError::BadMagic(_)
                | XferError::BadType { .. }
                | XferError::BadStatus(_)
                | XferError::FilenameTooLong(_)
                | XferError::InvalidFilename
        )
    }
}
