//! Request definitions
//!
//! Represents the client's request for a single named file.

use crate::error::{Result, XferError};
use super::FrameType;

/// Fixed header size: magic (2) + type (1) + filename length (2)
pub const REQUEST_HEADER_SIZE: usize = 5;

/// Longest filename (in UTF-8 bytes) a request may carry
pub const MAX_FILENAME_LEN: usize = 1024;

/// Decoded fixed header of a request frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHeader {
    pub frame_type: FrameType,

    /// Number of filename bytes following the header
    pub filename_len: usize,
}

/// A complete request: the filename the client wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame {
    filename: String,
}

impl RequestFrame {
    /// Create a request, rejecting filenames longer than `MAX_FILENAME_LEN` bytes
    pub fn new(filename: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        if filename.len() > MAX_FILENAME_LEN {
            return Err(XferError::FilenameTooLong(filename.len()));
        }
        Ok(Self { filename })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn into_filename(self) -> String {
        self.filename
    }
}
