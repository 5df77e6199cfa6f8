//! Location records of tiles inside a blob.
//!
//! An [`IndexItem`] says where the bytes of one tile live (`offset`, `size`) without carrying the
//! bytes themselves. On disk an item is a fixed 24-byte little-endian record:
//!
//! | bytes  | field    | type  |
//! |--------|----------|-------|
//! | 0..4   | `x`      | `u32` |
//! | 4..8   | `y`      | `u32` |
//! | 8..12  | `z`      | `u32` |
//! | 12..16 | `size`   | `u32` |
//! | 16..24 | `offset` | `u64` |
//!
//! The record does not identify the blob it was derived from. Replaying an index against a
//! different blob cannot be detected and yields garbage tiles.

use super::{ByteRange, TileId};
use crate::io::{ValueReader, ValueWriter};
use anyhow::{Result, ensure};
use byteorder::LittleEndian;

/// Size of one serialized [`IndexItem`] in bytes.
pub const INDEX_ITEM_SIZE: u64 = 24;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct IndexItem {
	pub x: u32,
	pub y: u32,
	pub z: u32,
	pub size: u32,
	pub offset: u64,
}

impl IndexItem {
	/// Builds an item from a tile id and the absolute byte range of its bytes.
	pub fn from_location(id: &TileId, range: &ByteRange) -> Result<IndexItem> {
		ensure!(
			range.length <= u64::from(u32::MAX),
			"tile {id} has {} bytes, more than an index item can address",
			range.length
		);
		Ok(IndexItem {
			x: id.x,
			y: id.y,
			z: id.z,
			size: range.length as u32,
			offset: range.offset,
		})
	}

	pub fn tile_id(&self) -> Result<TileId> {
		TileId::new(self.x, self.y, self.z)
	}

	pub fn byte_range(&self) -> ByteRange {
		ByteRange::new(self.offset, u64::from(self.size))
	}

	pub fn read(reader: &mut dyn ValueReader<LittleEndian>) -> Result<IndexItem> {
		Ok(IndexItem {
			x: reader.read_u32()?,
			y: reader.read_u32()?,
			z: reader.read_u32()?,
			size: reader.read_u32()?,
			offset: reader.read_u64()?,
		})
	}

	pub fn write(&self, writer: &mut dyn ValueWriter<LittleEndian>) -> Result<()> {
		writer.write_u32(self.x)?;
		writer.write_u32(self.y)?;
		writer.write_u32(self.z)?;
		writer.write_u32(self.size)?;
		writer.write_u64(self.offset)?;
		Ok(())
	}
}
