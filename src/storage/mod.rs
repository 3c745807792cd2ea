//! Storage Module
//!
//! Local filesystem collaborators of the protocol.
//!
//! ## Responsibilities
//! - Server side: resolve a requested filename inside the served root and
//!   read its bytes (`FileStore`, `DirStore`)
//! - Client side: persist received payload bytes to a destination that did
//!   not exist before the transfer (`Destination`)

mod dir_store;
mod destination;

pub use dir_store::{DirStore, FileStore};
pub use destination::Destination;
