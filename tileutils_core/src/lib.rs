//! Core types and helpers shared by the tileutils crates.
//!
//! - [`types`]: tile coordinates with the row flip, index records, blobs, byte ranges and Hilbert indices
//! - [`io`]: little-endian value readers and writers
//! - [`compression`]: gzip helpers for archive internals
//! - [`progress`]: interval-based progress reporting

pub mod compression;
pub mod io;
pub mod progress;
pub mod types;

pub use types::*;
