//! Session Module
//!
//! One request/response exchange per connection.
//!
//! ## Client
//! ```text
//! Connected ──write request──▶ AwaitingResponseHeader ──FAIL──▶ Done (NotFound)
//!                                        │
//!                                     SUCCESS
//!                                        ▼
//!                                ReceivingPayload ──▶ Done (Received)
//! any error ──▶ Failed
//! ```
//!
//! ## Server
//! Read request header, read filename, look the file up, write one
//! response. Errors end the session; they never reach the accept loop.
//!
//! Sessions are generic over any blocking `Read + Write` stream and hold no
//! state shared with other connections.

mod client;
mod server;

pub use client::{ClientSession, ClientState, FetchOutcome};
pub use server::{ServeOutcome, ServerSession};
