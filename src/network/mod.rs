//! Network Module
//!
//! TCP server and client handling.
//!
//! ## Architecture
//! - Single acceptor thread
//! - Worker thread pool for connections
//! - One request/response exchange per connection

mod server;
mod client;
mod connection;

pub use server::{Server, ServerStats, ShutdownHandle, StatsSnapshot};
pub use client::Client;
pub use connection::Connection;
