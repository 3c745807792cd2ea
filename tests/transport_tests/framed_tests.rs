//! Tests for read_exact / write_all

use std::io::{self, Read, Write};

use filexfer::transport::{read_exact, read_exact_into, write_all};
use filexfer::XferError;

use crate::common::MockStream;

// =============================================================================
// Helper Streams
// =============================================================================

/// Fails with `Interrupted` on every other call
struct Flaky<S> {
    inner: S,
    calls: usize,
}

impl<S: Read> Read for Flaky<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

/// Accepts `limit` bytes then refuses everything
struct Stalled {
    limit: usize,
    written: usize,
    error: Option<io::ErrorKind>,
}

impl Write for Stalled {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written >= self.limit {
            return match self.error {
                Some(kind) => Err(kind.into()),
                None => Ok(0),
            };
        }
        let n = buf.len().min(self.limit - self.written);
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// read_exact
// =============================================================================

#[test]
fn test_read_exact_one_byte_increments() {
    let data: Vec<u8> = (0..=255).collect();
    let mut stream = MockStream::new(data.clone()).read_chunk(1);

    let bytes = read_exact(&mut stream, data.len()).unwrap();

    assert_eq!(&bytes[..], &data[..]);
    assert_eq!(stream.reads, data.len());
}

#[test]
fn test_read_exact_odd_increments() {
    let data: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();
    for chunk in [3, 7, 64, 999, 5000] {
        let mut stream = MockStream::new(data.clone()).read_chunk(chunk);
        let bytes = read_exact(&mut stream, data.len()).unwrap();
        assert_eq!(&bytes[..], &data[..], "chunk size {}", chunk);
    }
}

#[test]
fn test_read_exact_leaves_trailing_bytes() {
    let mut stream = MockStream::new(b"headerpayload".to_vec()).read_chunk(4);

    let bytes = read_exact(&mut stream, 6).unwrap();

    assert_eq!(&bytes[..], b"header");
    assert_eq!(stream.unread(), b"payload");
}

#[test]
fn test_read_exact_zero_bytes_does_not_read() {
    let mut stream = MockStream::new(b"abc".to_vec());

    let bytes = read_exact(&mut stream, 0).unwrap();

    assert!(bytes.is_empty());
    assert_eq!(stream.reads, 0);
}

#[test]
fn test_read_exact_peer_closed_midway() {
    let mut stream = MockStream::new(b"abc".to_vec()).read_chunk(1);

    match read_exact(&mut stream, 8) {
        Err(XferError::PeerClosed { expected, received }) => {
            assert_eq!(expected, 8);
            assert_eq!(received, 3);
        }
        other => panic!("Expected PeerClosed, got {:?}", other),
    }
    // Three data reads plus the single zero-byte read; no spinning
    assert_eq!(stream.reads, 4);
}

#[test]
fn test_read_exact_peer_closed_immediately() {
    let mut stream = MockStream::new(Vec::new());
    assert!(matches!(
        read_exact(&mut stream, 5),
        Err(XferError::PeerClosed { expected: 5, received: 0 })
    ));
}

#[test]
fn test_read_exact_retries_interrupted() {
    let mut stream = Flaky {
        inner: MockStream::new(b"hello".to_vec()).read_chunk(2),
        calls: 0,
    };
    let mut buf = [0u8; 5];

    read_exact_into(&mut stream, &mut buf).unwrap();

    assert_eq!(&buf, b"hello");
}

#[test]
fn test_read_exact_propagates_timeout() {
    struct TimesOut;
    impl Read for TimesOut {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::WouldBlock.into())
        }
    }

    let err = read_exact(&mut TimesOut, 4).unwrap_err();
    assert!(err.is_timeout());
}

// =============================================================================
// write_all
// =============================================================================

#[test]
fn test_write_all_partial_writes() {
    let data: Vec<u8> = (0..100).collect();
    let mut stream = MockStream::new(Vec::new()).write_chunk(7);

    write_all(&mut stream, &data).unwrap();

    assert_eq!(stream.written, data);
    assert_eq!(stream.writes, 15);
}

#[test]
fn test_write_all_empty() {
    let mut stream = MockStream::new(Vec::new());
    write_all(&mut stream, &[]).unwrap();
    assert_eq!(stream.writes, 0);
}

#[test]
fn test_write_all_zero_write_is_error() {
    let mut stream = Stalled {
        limit: 3,
        written: 0,
        error: None,
    };

    match write_all(&mut stream, b"abcdef") {
        Err(XferError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::WriteZero),
        other => panic!("Expected WriteZero, got {:?}", other),
    }
}

#[test]
fn test_write_all_error_propagates_immediately() {
    let mut stream = Stalled {
        limit: 2,
        written: 0,
        error: Some(io::ErrorKind::BrokenPipe),
    };

    match write_all(&mut stream, b"abcdef") {
        Err(XferError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("Expected BrokenPipe, got {:?}", other),
    }
    assert_eq!(stream.written, 2);
}
