//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! Decoding is a two-phase pull: the fixed header is decoded first to learn
//! the length of the variable section, then exactly that many bytes are read.
//! Header decoders check the magic number, then the frame type, and only
//! then trust the remaining fields.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, XferError};
use crate::transport::{read_exact, read_exact_into, write_all};
use super::{
    RequestFrame, RequestHeader, ResponseFrame, ResponseHeader, Status, MAX_FILENAME_LEN,
    REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE,
};

/// Magic number opening every frame
pub const MAGIC: u16 = 0x497E;

/// Frame kind discriminator (third byte of every frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    Request = 0x01,
    Response = 0x02,
}

/// Check magic and type of a frame header, in that order
fn check_preamble(buf: &mut &[u8], expected: FrameType) -> Result<FrameType> {
    let magic = buf.get_u16();
    if magic != MAGIC {
        return Err(XferError::BadMagic(magic));
    }

    let frame_type = buf.get_u8();
    if frame_type != expected as u8 {
        return Err(XferError::BadType {
            expected: expected as u8,
            actual: frame_type,
        });
    }

    Ok(expected)
}

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request for `filename`
///
/// Format: magic (2) + type (1) + filename_len (2) + filename
pub fn encode_request(filename: &str) -> Result<Bytes> {
    let name = filename.as_bytes();
    if name.len() > MAX_FILENAME_LEN {
        return Err(XferError::FilenameTooLong(name.len()));
    }

    let mut message = BytesMut::with_capacity(REQUEST_HEADER_SIZE + name.len());
    message.put_u16(MAGIC);
    message.put_u8(FrameType::Request as u8);
    message.put_u16(name.len() as u16);
    message.put_slice(name);

    Ok(message.freeze())
}

/// Decode the fixed request header
///
/// The filename bytes are not inspected here.
pub fn decode_request_header(header: &[u8; REQUEST_HEADER_SIZE]) -> Result<RequestHeader> {
    let mut buf = &header[..];
    let frame_type = check_preamble(&mut buf, FrameType::Request)?;

    let filename_len = buf.get_u16() as usize;
    if filename_len > MAX_FILENAME_LEN {
        return Err(XferError::FilenameTooLong(filename_len));
    }

    Ok(RequestHeader {
        frame_type,
        filename_len,
    })
}

/// Decode the filename section of a request
pub fn decode_filename(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| XferError::InvalidFilename)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: magic (2) + type (1) + status (1) + data_len (4) + payload.
/// A FAIL response is the bare 8-byte header with a zero data length.
pub fn encode_response(response: &ResponseFrame) -> Result<Bytes> {
    let payload: &[u8] = match response {
        ResponseFrame::Success { payload } => &payload[..],
        ResponseFrame::Fail => &[],
    };
    let data_len =
        u32::try_from(payload.len()).map_err(|_| XferError::PayloadTooLarge(payload.len()))?;

    let mut message = BytesMut::with_capacity(RESPONSE_HEADER_SIZE + payload.len());
    message.put_u16(MAGIC);
    message.put_u8(FrameType::Response as u8);
    message.put_u8(response.status() as u8);
    message.put_u32(data_len);
    message.put_slice(payload);

    Ok(message.freeze())
}

/// Decode the fixed response header
///
/// A FAIL header with a non-zero data length is not rejected; callers go
/// through `ResponseHeader::payload_len`, which ignores it.
pub fn decode_response_header(header: &[u8; RESPONSE_HEADER_SIZE]) -> Result<ResponseHeader> {
    let mut buf = &header[..];
    let frame_type = check_preamble(&mut buf, FrameType::Response)?;

    let status = match buf.get_u8() {
        0x00 => Status::Fail,
        0x01 => Status::Success,
        other => return Err(XferError::BadStatus(other)),
    };
    let data_len = buf.get_u32();

    Ok(ResponseHeader {
        frame_type,
        status,
        data_len,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until the header and the full filename are received. A bad header
/// fails before any filename byte is read.
pub fn read_request<R: Read + ?Sized>(reader: &mut R) -> Result<RequestFrame> {
    let mut header = [0u8; REQUEST_HEADER_SIZE];
    read_exact_into(reader, &mut header)?;
    let header = decode_request_header(&header)?;

    tracing::trace!(filename_len = header.filename_len, "request header received");

    let name = read_exact(reader, header.filename_len)?;
    RequestFrame::new(decode_filename(&name)?)
}

/// Write a request to a stream
pub fn write_request<W: Write + ?Sized>(writer: &mut W, filename: &str) -> Result<usize> {
    let bytes = encode_request(filename)?;
    write_all(writer, &bytes)?;
    Ok(bytes.len())
}

/// Read and decode a response header from a stream
///
/// The payload, if any, is left on the stream for the caller.
pub fn read_response_header<R: Read + ?Sized>(reader: &mut R) -> Result<ResponseHeader> {
    let mut header = [0u8; RESPONSE_HEADER_SIZE];
    read_exact_into(reader, &mut header)?;
    decode_response_header(&header)
}

/// Write a response to a stream, returning the number of bytes sent
pub fn write_response<W: Write + ?Sized>(writer: &mut W, response: &ResponseFrame) -> Result<usize> {
    let bytes = encode_response(response)?;
    write_all(writer, &bytes)?;
    Ok(bytes.len())
}
