//! TCP Server
//!
//! Accepts connections and dispatches them to worker threads.

use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, Receiver, SendTimeoutError, Sender};
use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{Result, XferError};
use crate::session::{ServeOutcome, ServerSession};
use crate::storage::FileStore;

use super::Connection;

/// How often the accept loop checks the shutdown flag while idle
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Connection counters, updated by the accept loop and workers
#[derive(Debug, Default)]
pub struct ServerStats {
    accepted: AtomicU64,
    served: AtomicU64,
    not_found: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of `ServerStats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub accepted: u64,
    pub served: u64,
    pub not_found: u64,
    pub failed: u64,
}

impl ServerStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            served: self.served.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Stops a running server from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

/// TCP server for filexfer
///
/// ## Concurrency
/// - One acceptor (the thread calling `run`)
/// - `config.workers` worker threads, each serving one connection at a time
/// - Accepted connections wait in a channel bounded by `config.backlog`
/// - Nothing is shared between connections except the read-only store and
///   the stats counters
pub struct Server {
    config: Config,
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<dyn FileStore>,
    shutdown: Arc<AtomicBool>,
    stats: ServerStats,
}

impl Server {
    /// Validate the config and bind the listening socket
    ///
    /// Fails with `XferError::Config` when `read_timeout_ms` is 0.
    pub fn bind(config: Config, store: Arc<dyn FileStore>) -> Result<Self> {
        config.validate()?;
        // Shutdown joins the workers; one blocked on a silent peer would never return
        if config.read_timeout().is_none() {
            return Err(XferError::Config(
                "server read timeout must be non-zero".to_string(),
            ));
        }

        let addr: SocketAddr = config
            .listen_addr
            .parse()
            .map_err(|e| XferError::Config(format!("invalid listen address: {}", e)))?;

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(config.backlog.min(i32::MAX as usize) as i32)?;

        let listener: TcpListener = socket.into();
        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Listening on {}", local_addr);

        Ok(Self {
            config,
            listener,
            local_addr,
            store,
            shutdown: Arc::new(AtomicBool::new(false)),
            stats: ServerStats::default(),
        })
    }

    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Start the server (blocking)
    ///
    /// Returns after `shutdown` once queued connections have been served and
    /// all workers have exited.
    pub fn run(&self) -> Result<()> {
        let (tx, rx) = channel::bounded::<TcpStream>(self.config.backlog);

        tracing::info!(
            workers = self.config.workers,
            backlog = self.config.backlog,
            root = %self.config.root_dir.display(),
            "Server started"
        );

        let result = thread::scope(|scope| -> Result<()> {
            for id in 0..self.config.workers {
                let rx = rx.clone();
                thread::Builder::new()
                    .name(format!("filexfer-worker-{}", id))
                    .spawn_scoped(scope, move || self.worker_loop(rx))?;
            }
            drop(rx);

            // Dropping the sender inside accept_loop lets workers drain and exit
            self.accept_loop(tx)
        });

        tracing::info!("Server stopped");
        result
    }

    fn accept_loop(&self, tx: Sender<TcpStream>) -> Result<()> {
        while !self.shutdown.load(Ordering::Relaxed) {
            let (stream, addr) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(POLL_INTERVAL);
                    continue;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // e.g. EMFILE; keep serving once resources free up
                    tracing::warn!("Accept failed: {}", e);
                    thread::sleep(POLL_INTERVAL);
                    continue;
                }
            };

            // Accepted sockets inherit O_NONBLOCK on some platforms
            if let Err(e) = stream.set_nonblocking(false) {
                tracing::warn!("Dropping connection from {}: {}", addr, e);
                continue;
            }

            self.stats.accepted.fetch_add(1, Ordering::Relaxed);
            tracing::info!("Connection accepted from {}", addr);

            let mut pending = stream;
            loop {
                match tx.send_timeout(pending, POLL_INTERVAL) {
                    Ok(()) => break,
                    Err(SendTimeoutError::Timeout(stream)) => {
                        if self.shutdown.load(Ordering::Relaxed) {
                            tracing::debug!("Dropping queued connection from {} on shutdown", addr);
                            return Ok(());
                        }
                        pending = stream;
                    }
                    Err(SendTimeoutError::Disconnected(_)) => {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            "all connection workers have exited",
                        )
                        .into());
                    }
                }
            }
        }

        Ok(())
    }

    fn worker_loop(&self, rx: Receiver<TcpStream>) {
        for stream in rx.iter() {
            self.serve(stream);
        }
    }

    /// Serve one connection to completion; errors stay with this connection
    fn serve(&self, stream: TcpStream) {
        let conn = match Connection::new(stream) {
            Ok(conn) => conn,
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Failed to set up connection: {}", e);
                return;
            }
        };
        let peer = conn.peer_addr().to_string();

        if let Err(e) = conn.set_timeouts(self.config.read_timeout(), self.config.write_timeout()) {
            self.stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Failed to set timeouts for {}: {}", peer, e);
            return;
        }

        let mut session = ServerSession::new(conn, &*self.store);
        match session.run() {
            Ok(ServeOutcome::Sent { filename, bytes }) => {
                self.stats.served.fetch_add(1, Ordering::Relaxed);
                tracing::info!(peer = %peer, filename = %filename, bytes, "File sent");
            }
            Ok(ServeOutcome::NotFound { filename }) => {
                self.stats.not_found.fetch_add(1, Ordering::Relaxed);
                tracing::info!(peer = %peer, filename = %filename, "File not found");
            }
            Err(e) if e.is_frame_error() => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Malformed request from {}: {}", peer, e);
            }
            Err(e) if e.is_timeout() => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Timed out serving {}", peer);
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Error serving {}: {}", peer, e);
            }
        }

        // Closes the connection
        drop(session);
        tracing::info!("Connection terminated for {}", peer);
    }
}
