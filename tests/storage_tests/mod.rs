//! Storage Tests
//!
//! Served-directory lookups and client destination files.

mod destination_tests;
