//! Tile coordinates and the row flip between the two row conventions.
//!
//! The tile database counts rows from the top of the map (top-origin), the archive counts them
//! from the bottom (bottom-origin). For a zoom level `z` both conventions are related by
//! `row' = 2^z - 1 - row`, which is its own inverse. Every transfer between an archive and a
//! database applies the flip exactly once, always using the zoom level of the tile being
//! converted. Directory trees use the archive's rows in their paths.
//!
//! ```rust
//! use tileutils_core::{to_archive_row, to_tree_row};
//!
//! assert_eq!(to_archive_row(3, 2), 0);
//! assert_eq!(to_tree_row(0, 2), 3);
//! ```

use anyhow::{Result, ensure};
use std::fmt;

/// Highest zoom level whose rows and columns fit into a `u32`.
pub const MAX_ZOOM: u32 = 31;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TileId {
	pub x: u32,
	pub y: u32,
	pub z: u32,
}

impl TileId {
	/// Creates a tile id, rejecting zoom levels above [`MAX_ZOOM`] and coordinates outside of the level.
	pub fn new(x: u32, y: u32, z: u32) -> Result<TileId> {
		ensure!(z <= MAX_ZOOM, "zoom level {z} exceeds the maximum of {MAX_ZOOM}");
		let max = max_index(z);
		ensure!(x <= max && y <= max, "tile {z}/{x}/{y} lies outside of zoom level {z}");
		Ok(TileId { x, y, z })
	}
}

impl fmt::Display for TileId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.z, self.x, self.y)
	}
}

fn max_index(z: u32) -> u32 {
	((1u64 << z) - 1) as u32
}

/// `2^z - 1 - row`. Callers validate `z <= MAX_ZOOM` and `row < 2^z` beforehand.
fn flip_row(row: u32, z: u32) -> u32 {
	max_index(z) - row
}

/// Converts a top-origin database row into a bottom-origin archive row.
pub fn to_archive_row(top_row: u32, z: u32) -> u32 {
	flip_row(top_row, z)
}

/// Converts a bottom-origin archive row into a top-origin database row.
pub fn to_tree_row(bottom_row: u32, z: u32) -> u32 {
	flip_row(bottom_row, z)
}
