//! Protocol Module
//!
//! Defines the wire protocol for client-server communication. One TCP
//! connection carries exactly one request frame followed by one response
//! frame. All integers are big-endian.
//!
//! ### Request Format
//! ```text
//! ┌───────────┬──────────┬───────────────┬──────────────────────┐
//! │ Magic (2) │ Type (1) │ NameLen (2)   │  Filename (UTF-8)    │
//! └───────────┴──────────┴───────────────┴──────────────────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌───────────┬──────────┬────────────┬──────────────┬──────────────┐
//! │ Magic (2) │ Type (1) │ Status (1) │ DataLen (4)  │   Payload    │
//! └───────────┴──────────┴────────────┴──────────────┴──────────────┘
//! ```
//!
//! ### Frame Types
//! - 0x01: REQUEST
//! - 0x02: RESPONSE
//!
//! ### Status Codes
//! - 0x00: FAIL    (header only, DataLen is zero, no payload follows)
//! - 0x01: SUCCESS (DataLen bytes of payload follow)

mod request;
mod response;
mod codec;

pub use request::{RequestFrame, RequestHeader, MAX_FILENAME_LEN, REQUEST_HEADER_SIZE};
pub use response::{
    ResponseFrame, ResponseHeader, Status, MAX_PAYLOAD_LEN, RESPONSE_HEADER_SIZE,
};
pub use codec::{
    decode_filename, decode_request_header, decode_response_header, encode_request,
    encode_response, read_request, read_response_header, write_request, write_response,
    FrameType, MAGIC,
};
