//! Shared test helpers

#![allow(dead_code)]

use std::io::{self, Read, Write};

/// In-memory stream that hands out at most `read_chunk` bytes per read and
/// accepts at most `write_chunk` bytes per write
pub struct MockStream {
    input: Vec<u8>,
    pos: usize,
    read_chunk: usize,
    write_chunk: usize,
    pub written: Vec<u8>,
    pub reads: usize,
    pub writes: usize,
}

impl MockStream {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            pos: 0,
            read_chunk: usize::MAX,
            write_chunk: usize::MAX,
            written: Vec::new(),
            reads: 0,
            writes: 0,
        }
    }

    pub fn read_chunk(mut self, n: usize) -> Self {
        self.read_chunk = n;
        self
    }

    pub fn write_chunk(mut self, n: usize) -> Self {
        self.write_chunk = n;
        self
    }

    /// Bytes not yet consumed by reads
    pub fn unread(&self) -> &[u8] {
        &self.input[self.pos..]
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let n = buf.len().min(self.read_chunk).min(self.input.len() - self.pos);
        buf[..n].copy_from_slice(&self.input[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        let n = buf.len().min(self.write_chunk);
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Build a raw request frame without going through the encoder
pub fn raw_request(magic: u16, frame_type: u8, name: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&magic.to_be_bytes());
    frame.push(frame_type);
    frame.extend_from_slice(&(name.len() as u16).to_be_bytes());
    frame.extend_from_slice(name);
    frame
}

/// Build a raw response frame without going through the encoder
pub fn raw_response(magic: u16, frame_type: u8, status: u8, data_len: u32, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&magic.to_be_bytes());
    frame.push(frame_type);
    frame.push(status);
    frame.extend_from_slice(&data_len.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}
