//! Reads tiles and tile locations from an archive file.
//!
//! Both [`ArchiveReader::tiles`] and [`ArchiveReader::tile_locations`] walk the root directory
//! and descend into leaf directories lazily, so only one leaf is held in memory per level.
//! Calling them again starts a fresh walk.
//!
//! ```rust,no_run
//! use tileutils_container::ArchiveReader;
//! use std::path::Path;
//!
//! let mut reader = ArchiveReader::open(Path::new("/tmp/tiles.pmtiles")).unwrap();
//! for location in reader.tile_locations() {
//!     let (id, range) = location.unwrap();
//!     println!("{id} at {range:?}");
//! }
//! ```

use super::types::{Entries, Entry, HEADER_LENGTH, Header};
use crate::TileSource;
use anyhow::{Result, ensure};
use byteorder::LittleEndian;
use std::path::{Path, PathBuf};
use tileutils_core::{
	Blob, ByteRange, TileId, hilbert_index_to_tile_id,
	io::{ValueReader, ValueReaderFile},
};
use tileutils_derive::context;

/// Leaf directories may nest, but never deeper than this.
const MAX_DIRECTORY_DEPTH: usize = 4;

pub struct ArchiveReader {
	path: PathBuf,
	reader: ValueReaderFile<LittleEndian>,
	header: Header,
	metadata: Blob,
	root_entries: Vec<Entry>,
}

impl ArchiveReader {
	#[context("opening archive '{}'", path.display())]
	pub fn open(path: &Path) -> Result<ArchiveReader> {
		log::debug!("open archive {path:?}");
		ensure!(path.is_file(), "archive {path:?} does not exist");

		let mut reader = ValueReaderFile::open_le(path)?;
		ensure!(reader.len() >= HEADER_LENGTH, "file is too short to be an archive");

		let header = Header::deserialize(&reader.read_range(&ByteRange::new(0, HEADER_LENGTH))?)?;
		log::trace!("header: {header:?}");

		let compression = header.internal_compression;
		let metadata = compression.decompress(reader.read_range(&header.metadata)?)?;
		let root_bytes = compression.decompress(reader.read_range(&header.root_dir)?)?;
		let root_entries = Entries::from_blob(&root_bytes)?.into_vec();
		log::trace!("root directory has {} entries", root_entries.len());

		Ok(ArchiveReader {
			path: path.to_path_buf(),
			reader,
			header,
			metadata,
			root_entries,
		})
	}

	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Metadata bytes as given to the writer.
	pub fn metadata(&self) -> &Blob {
		&self.metadata
	}

	/// Tile ids (bottom-origin rows) with their absolute byte ranges in the archive file.
	pub fn tile_locations(&mut self) -> TileLocations<'_> {
		TileLocations {
			walker: self.walker(),
		}
	}

	/// Tile ids (bottom-origin rows) with their bytes, in directory order.
	pub fn tiles(&mut self) -> Tiles<'_> {
		Tiles {
			walker: self.walker(),
		}
	}

	fn walker(&mut self) -> EntryWalker<'_> {
		EntryWalker {
			reader: &mut self.reader,
			header: &self.header,
			stack: vec![self.root_entries.clone().into_iter()],
			run: None,
		}
	}
}

impl TileSource for ArchiveReader {
	fn source_name(&self) -> String {
		format!("archive {:?}", self.path)
	}

	fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()> {
		for tile in self.tiles() {
			let (id, blob) = tile?;
			visit(id, blob)?;
		}
		Ok(())
	}
}

/// Depth-first walk over the directory tree, expanding runs into single tiles.
struct EntryWalker<'a> {
	reader: &'a mut ValueReaderFile<LittleEndian>,
	header: &'a Header,
	stack: Vec<std::vec::IntoIter<Entry>>,
	run: Option<(Entry, u32)>,
}

impl EntryWalker<'_> {
	fn next_location(&mut self) -> Option<Result<(TileId, ByteRange)>> {
		loop {
			if let Some((entry, index)) = &mut self.run {
				if *index < entry.run_length {
					let tile_id = entry.tile_id + u64::from(*index);
					*index += 1;
					let range = entry.range.get_shifted_forward(self.header.tile_data.offset);
					return Some(hilbert_index_to_tile_id(tile_id).map(|id| (id, range)));
				}
				self.run = None;
			}

			let Some(entry) = self.stack.last_mut()?.next() else {
				self.stack.pop();
				continue;
			};

			if entry.is_leaf_pointer() {
				match self.read_leaf(&entry) {
					Ok(entries) => self.stack.push(entries.into_vec().into_iter()),
					Err(err) => {
						self.stack.clear();
						return Some(Err(err));
					}
				}
			} else {
				self.run = Some((entry, 0));
			}
		}
	}

	fn read_leaf(&mut self, entry: &Entry) -> Result<Entries> {
		ensure!(self.stack.len() < MAX_DIRECTORY_DEPTH, "leaf directories nest too deep");
		ensure!(
			entry.range.fits_within(self.header.leaf_dirs.length),
			"leaf directory {:?} lies outside of the leaf section",
			entry.range
		);
		let range = entry.range.get_shifted_forward(self.header.leaf_dirs.offset);
		let bytes = self.reader.read_range(&range)?;
		Entries::from_blob(&self.header.internal_compression.decompress(bytes)?)
	}
}

pub struct TileLocations<'a> {
	walker: EntryWalker<'a>,
}

impl Iterator for TileLocations<'_> {
	type Item = Result<(TileId, ByteRange)>;

	fn next(&mut self) -> Option<Self::Item> {
		self.walker.next_location()
	}
}

pub struct Tiles<'a> {
	walker: EntryWalker<'a>,
}

impl Iterator for Tiles<'_> {
	type Item = Result<(TileId, Blob)>;

	fn next(&mut self) -> Option<Self::Item> {
		let (id, range) = match self.walker.next_location()? {
			Ok(location) => location,
			Err(err) => return Some(Err(err)),
		};
		Some(self.walker.reader.read_range(&range).map(|blob| (id, blob)))
	}
}
