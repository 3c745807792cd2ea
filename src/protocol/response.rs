//! Response definitions
//!
//! Represents the server's answer to a request.

use bytes::Bytes;

use super::FrameType;

/// Fixed header size: magic (2) + type (1) + status (1) + data length (4)
pub const RESPONSE_HEADER_SIZE: usize = 8;

/// Largest payload the 32-bit data length can describe
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Fail = 0x00,
    Success = 0x01,
}

/// Decoded fixed header of a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub frame_type: FrameType,
    pub status: Status,

    /// Payload length. Only meaningful when `status` is `Success`; callers
    /// must ignore it for `Fail`.
    pub data_len: u32,
}

impl ResponseHeader {
    /// Number of payload bytes that follow this header on the wire
    pub fn payload_len(&self) -> usize {
        match self.status {
            Status::Success => self.data_len as usize,
            Status::Fail => 0,
        }
    }
}

/// A response to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseFrame {
    /// The file was not found or could not be read
    Fail,

    /// The file's contents
    Success { payload: Bytes },
}

impl ResponseFrame {
    /// Create a SUCCESS response carrying the file contents
    pub fn success(payload: impl Into<Bytes>) -> Self {
        ResponseFrame::Success {
            payload: payload.into(),
        }
    }

    /// Create a FAIL response
    pub fn fail() -> Self {
        ResponseFrame::Fail
    }

    pub fn status(&self) -> Status {
        match self {
            ResponseFrame::Fail => Status::Fail,
            ResponseFrame::Success { .. } => Status::Success,
        }
    }
}
