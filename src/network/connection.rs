//! Connection Handle
//!
//! Owns one TCP stream for the lifetime of a single exchange.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::Result;

/// A single client/server connection
///
/// The stream is shut down when the handle is dropped, so every exit path
/// (success, protocol error, I/O error) releases it.
pub struct Connection {
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Wrap an accepted or connected stream
    pub fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm; each side writes one frame then waits
        stream.set_nodelay(true)?;

        Ok(Self { stream, peer_addr })
    }

    /// Connect to `addr` (host:port), trying each resolved address in turn
    pub fn connect(addr: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut last_err = None;

        for sock_addr in addr.to_socket_addrs()? {
            let attempt = match timeout {
                Some(t) => TcpStream::connect_timeout(&sock_addr, t),
                None => TcpStream::connect(sock_addr),
            };
            match attempt {
                Ok(stream) => return Self::new(stream),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", sock_addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} resolved to no addresses", addr),
                )
            })
            .into())
    }

    /// Configure connection timeouts (`None` blocks indefinitely)
    pub fn set_timeouts(&self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.stream.set_read_timeout(read)?;
        self.stream.set_write_timeout(write)?;
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // The peer may already be gone; nothing useful to do with the error.
        let _ = self.stream.shutdown(Shutdown::Both);
        tracing::trace!("Connection to {} closed", self.peer_addr);
    }
}
