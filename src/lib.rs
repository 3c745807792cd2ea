//! # filexfer
//!
//! A minimal file-transfer protocol over TCP:
//! - One connection carries one request frame and one response frame
//! - Fixed headers with a magic number, a frame type and length fields
//! - Exact-count read/write loops that tolerate partial socket I/O
//! - A blocking client and a server with a bounded worker pool
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐                 ┌──────────────────────────┐
//! │    Client session    │                 │   Server (accept loop)   │
//! │ request ─▶ response  │                 │   ─▶ worker pool         │
//! └──────────┬───────────┘                 └────────────┬─────────────┘
//!            │                                          │
//!            ▼                                          ▼
//! ┌──────────────────────┐    one TCP      ┌──────────────────────────┐
//! │  Framed transport    │◀──connection───▶│     Server session       │
//! │ read_exact/write_all │                 │ request ─▶ lookup ─▶ resp│
//! └──────────┬───────────┘                 └────────────┬─────────────┘
//!            │                                          │
//!            ▼                                          ▼
//! ┌──────────────────────┐                 ┌──────────────────────────┐
//! │  Request/Response    │                 │        DirStore          │
//! │       codecs         │                 │   (served directory)     │
//! └──────────────────────┘                 └──────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod storage;
pub mod session;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{XferError, Result};
pub use config::Config;
pub use network::{Client, Server};
pub use session::FetchOutcome;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of filexfer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
