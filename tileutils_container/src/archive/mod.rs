//! Single-file tile archive in the PMTiles v3 layout.
//!
//! ```text
//! +--------+----------------+-----------+----------+-------------+
//! | header | root directory | tile data | metadata | leaf dirs   |
//! | 127 B  | ..16 KiB       |           | (gzip)   | (gzip)      |
//! +--------+----------------+-----------+----------+-------------+
//! ```
//!
//! Tiles are addressed by the Hilbert index of their coordinates in archive (bottom-origin) row
//! convention. Tile bytes are stored as given, in write order.

mod reader;
mod types;
mod writer;

pub use reader::ArchiveReader;
pub use writer::ArchiveWriter;
