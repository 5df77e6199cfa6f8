use super::ArchiveCompression;
use anyhow::{Result, ensure};
use tileutils_core::{
	Blob, ByteRange,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
};

/// Length of the serialized header.
pub const HEADER_LENGTH: u64 = 127;

/// Bytes reserved at the start of the file for the header and the root directory.
pub const ROOT_AREA_LENGTH: u64 = 16384;

const MAGIC: &[u8; 7] = b"PMTiles";
const VERSION: u8 = 3;

/// Tile type code for "unknown": the archive treats tile bytes as opaque.
const TILE_TYPE_UNKNOWN: u8 = 0;

#[derive(Debug, PartialEq)]
pub struct Header {
	pub root_dir: ByteRange,
	pub metadata: ByteRange,
	pub leaf_dirs: ByteRange,
	pub tile_data: ByteRange,
	pub addressed_tiles_count: u64,
	pub tile_entries_count: u64,
	pub tile_contents_count: u64,
	pub clustered: bool,
	pub internal_compression: ArchiveCompression,
	pub tile_compression: ArchiveCompression,
	pub tile_type: u8,
	pub min_zoom: u8,
	pub max_zoom: u8,
	pub min_lon_e7: i32,
	pub min_lat_e7: i32,
	pub max_lon_e7: i32,
	pub max_lat_e7: i32,
	pub center_zoom: u8,
	pub center_lon_e7: i32,
	pub center_lat_e7: i32,
}

impl Header {
	/// Header of an empty archive covering the whole web mercator world.
	pub fn new() -> Header {
		Header {
			root_dir: ByteRange::empty(),
			metadata: ByteRange::empty(),
			leaf_dirs: ByteRange::empty(),
			tile_data: ByteRange::empty(),
			addressed_tiles_count: 0,
			tile_entries_count: 0,
			tile_contents_count: 0,
			clustered: false,
			internal_compression: ArchiveCompression::Gzip,
			tile_compression: ArchiveCompression::Unknown,
			tile_type: TILE_TYPE_UNKNOWN,
			min_zoom: 0,
			max_zoom: 0,
			min_lon_e7: -1_800_000_000,
			min_lat_e7: -850_511_287,
			max_lon_e7: 1_800_000_000,
			max_lat_e7: 850_511_287,
			center_zoom: 0,
			center_lon_e7: 0,
			center_lat_e7: 0,
		}
	}

	pub fn serialize(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_slice(MAGIC)?;
		writer.write_u8(VERSION)?;

		writer.write_byte_range(&self.root_dir)?;
		writer.write_byte_range(&self.metadata)?;
		writer.write_byte_range(&self.leaf_dirs)?;
		writer.write_byte_range(&self.tile_data)?;
		writer.write_u64(self.addressed_tiles_count)?;
		writer.write_u64(self.tile_entries_count)?;
		writer.write_u64(self.tile_contents_count)?;

		writer.write_u8(u8::from(self.clustered))?;
		writer.write_u8(self.internal_compression as u8)?;
		writer.write_u8(self.tile_compression as u8)?;
		writer.write_u8(self.tile_type)?;
		writer.write_u8(self.min_zoom)?;
		writer.write_u8(self.max_zoom)?;
		writer.write_i32(self.min_lon_e7)?;
		writer.write_i32(self.min_lat_e7)?;
		writer.write_i32(self.max_lon_e7)?;
		writer.write_i32(self.max_lat_e7)?;
		writer.write_u8(self.center_zoom)?;
		writer.write_i32(self.center_lon_e7)?;
		writer.write_i32(self.center_lat_e7)?;

		Ok(writer.into_blob())
	}

	pub fn deserialize(blob: &Blob) -> Result<Self> {
		let buffer = blob.as_slice();

		ensure!(buffer.len() == HEADER_LENGTH as usize, "archive header must be {HEADER_LENGTH} bytes");
		ensure!(&buffer[0..7] == MAGIC, "archive magic number not found");
		ensure!(buffer[7] == VERSION, "archive version must be {VERSION}, found {}", buffer[7]);

		let mut reader = ValueReaderSlice::new_le(buffer);
		reader.set_position(8)?;

		Ok(Self {
			root_dir: reader.read_byte_range()?,
			metadata: reader.read_byte_range()?,
			leaf_dirs: reader.read_byte_range()?,
			tile_data: reader.read_byte_range()?,
			addressed_tiles_count: reader.read_u64()?,
			tile_entries_count: reader.read_u64()?,
			tile_contents_count: reader.read_u64()?,
			clustered: reader.read_u8()? == 1,
			internal_compression: ArchiveCompression::from_u8(reader.read_u8()?)?,
			tile_compression: ArchiveCompression::from_u8(reader.read_u8()?)?,
			tile_type: reader.read_u8()?,
			min_zoom: reader.read_u8()?,
			max_zoom: reader.read_u8()?,
			min_lon_e7: reader.read_i32()?,
			min_lat_e7: reader.read_i32()?,
			max_lon_e7: reader.read_i32()?,
			max_lat_e7: reader.read_i32()?,
			center_zoom: reader.read_u8()?,
			center_lon_e7: reader.read_i32()?,
			center_lat_e7: reader.read_i32()?,
		})
	}
}

impl Default for Header {
	fn default() -> Self {
		Header::new()
	}
}
