//! Protocol Tests
//!
//! Request and response frame codecs.

#[path = "../common/mod.rs"]
mod common;
