//! Exporting the tile locations of an archive into an index file, and replaying such an index
//! against the archive bytes.
//!
//! The index file is a plain sequence of [`IndexItem`](tileutils_core::IndexItem) records with
//! absolute offsets into the archive file. It carries no reference to that file: replaying it
//! against anything but the archive it was exported from produces garbage tiles.

mod export;
mod import;
mod index_file;

pub use export::export_index;
pub use import::IndexReplaySource;
pub use index_file::{IndexFileWriter, read_index_file};
