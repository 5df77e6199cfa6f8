//! Writes tiles into a new archive file.
//!
//! The writer reserves the first 16 KiB for the header and the root directory and appends tile
//! bytes behind them as they arrive. [`ArchiveWriter::finish`] appends metadata and leaf
//! directories, then fills in the reserved area. Until then the file has no valid header.
//!
//! ```rust,no_run
//! use tileutils_container::{ArchiveWriter, TileSink};
//! use tileutils_core::{Blob, TileId};
//! use std::path::Path;
//!
//! let mut writer = ArchiveWriter::create(Path::new("/tmp/tiles.pmtiles"), Blob::new_empty()).unwrap();
//! writer.write_tile(TileId::new(0, 0, 0).unwrap(), Blob::from("tile")).unwrap();
//! writer.finish().unwrap();
//! ```

use super::types::{Entries, Entry, HEADER_LENGTH, Header, ROOT_AREA_LENGTH};
use crate::TileSink;
use anyhow::{Context, Result, bail, ensure};
use byteorder::LittleEndian;
use std::{
	fs::File,
	path::{Path, PathBuf},
};
use tileutils_core::{
	Blob, ByteRange, TileId,
	compression::compress_gzip,
	hilbert_index_to_tile_id,
	io::{ValueWriter, ValueWriterFile},
	tile_id_to_hilbert_index,
};
use tileutils_derive::context;

pub struct ArchiveWriter {
	path: PathBuf,
	writer: ValueWriterFile<LittleEndian>,
	metadata: Blob,
	entries: Entries,
	last_tile_id: Option<u64>,
	clustered: bool,
	zoom_range: Option<(u32, u32)>,
}

impl ArchiveWriter {
	/// Creates the archive file. Fails if `path` already exists.
	#[context("creating archive '{}'", path.display())]
	pub fn create(path: &Path, metadata: Blob) -> Result<ArchiveWriter> {
		log::debug!("create archive {path:?}");
		ensure!(!path.exists(), "output {path:?} already exists");

		let file = File::create_new(path)?;
		let mut writer = ValueWriterFile::new_le(file);
		writer.set_position(ROOT_AREA_LENGTH)?;

		Ok(ArchiveWriter {
			path: path.to_path_buf(),
			writer,
			metadata,
			entries: Entries::new(),
			last_tile_id: None,
			clustered: true,
			zoom_range: None,
		})
	}

	fn finish_archive(mut self) -> Result<()> {
		log::info!("Writing index...");

		let tile_data_end = self.writer.position()?;

		let mut entries = std::mem::take(&mut self.entries);
		if entries.is_empty() {
			log::warn!("archive {:?} contains no tiles", self.path);
		}
		entries.sort_by_tile_id();
		if let Some(tile_id) = entries.find_duplicate() {
			bail!("tile {} was written more than once", hilbert_index_to_tile_id(tile_id)?);
		}

		let mut header = Header::new();
		header.tile_data = ByteRange::new(ROOT_AREA_LENGTH, tile_data_end - ROOT_AREA_LENGTH);

		header.metadata = self.writer.append(&compress_gzip(&self.metadata)?)?;

		let directory = entries.as_directory(ROOT_AREA_LENGTH - HEADER_LENGTH)?;
		log::trace!("directory: {directory:?}");
		header.leaf_dirs = self.writer.append(&directory.leaves_bytes)?;

		self.writer.set_position(HEADER_LENGTH)?;
		header.root_dir = self.writer.append(&directory.root_bytes)?;

		header.clustered = self.clustered;
		header.addressed_tiles_count = entries.tile_count();
		header.tile_entries_count = entries.len() as u64;
		header.tile_contents_count = entries.len() as u64;
		if let Some((min_zoom, max_zoom)) = self.zoom_range {
			header.min_zoom = min_zoom as u8;
			header.max_zoom = max_zoom as u8;
			header.center_zoom = min_zoom as u8;
		}

		self.writer.write_start(&header.serialize()?)?;
		self.writer.flush()?;

		log::debug!("wrote {} tiles to {:?}", entries.len(), self.path);
		Ok(())
	}
}

impl TileSink for ArchiveWriter {
	fn sink_name(&self) -> String {
		format!("archive {:?}", self.path)
	}

	/// Appends the tile bytes. `id` uses bottom-origin rows.
	fn write_tile(&mut self, id: TileId, blob: Blob) -> Result<()> {
		let tile_id = tile_id_to_hilbert_index(&id)?;
		let range = self
			.writer
			.append(&blob)
			.with_context(|| format!("writing tile {id} to {:?}", self.path))?;

		self.entries.push(Entry::new(
			tile_id,
			range.get_shifted_backward(ROOT_AREA_LENGTH),
			1,
		));

		if self.last_tile_id.is_some_and(|last| last >= tile_id) {
			self.clustered = false;
		}
		self.last_tile_id = Some(tile_id);

		self.zoom_range = Some(match self.zoom_range {
			Some((min, max)) => (min.min(id.z), max.max(id.z)),
			None => (id.z, id.z),
		});
		Ok(())
	}

	fn finish(self) -> Result<()> {
		let path = self.path.clone();
		self
			.finish_archive()
			.with_context(|| format!("finishing archive '{}'", path.display()))
	}
}
