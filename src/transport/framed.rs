//! Framed read/write primitives

use std::io::{self, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::error::{Result, XferError};

/// Fill `buf` completely from `reader`
///
/// Retries on `Interrupted`; any other error propagates. A read returning
/// zero bytes before `buf` is full fails with `PeerClosed`.
pub fn read_exact_into<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let expected = buf.len();
    let mut received = 0;

    while received < expected {
        match reader.read(&mut buf[received..]) {
            Ok(0) => return Err(XferError::PeerClosed { expected, received }),
            Ok(n) => received += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Read exactly `n` bytes from `reader`
pub fn read_exact<R: Read + ?Sized>(reader: &mut R, n: usize) -> Result<Bytes> {
    let mut buf = BytesMut::zeroed(n);
    read_exact_into(reader, &mut buf)?;
    Ok(buf.freeze())
}

/// Write all of `bytes` to `writer`, then flush
///
/// Each call hands the unsent remainder to the underlying writer. A write
/// that accepts zero bytes is reported as `WriteZero`.
pub fn write_all<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    let mut written = 0;

    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("stream accepted 0 bytes after {} of {}", written, bytes.len()),
                )
                .into())
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    writer.flush()?;
    Ok(())
}
