//! Session Tests
//!
//! Client and server sessions over in-memory streams.

#[path = "../common/mod.rs"]
mod common;
