//! Transport Module
//!
//! Frame-level I/O discipline over a blocking byte stream.
//!
//! A single `read` or `write` on a socket may move fewer bytes than asked
//! for. Every frame transfer goes through `read_exact`/`write_all`, which
//! loop until the byte-count target is met. A zero-byte read before the
//! target is `PeerClosed`, never a reason to retry.

mod framed;

pub use framed::{read_exact, read_exact_into, write_all};
