//! Replays an index file against the bytes it was exported from.

use super::read_index_file;
use crate::TileSource;
use anyhow::{Context, Result, ensure};
use byteorder::LittleEndian;
use std::path::{Path, PathBuf};
use tileutils_core::{
	Blob, IndexItem, TileId,
	io::{ValueReader, ValueReaderFile},
};
use tileutils_derive::context;

/// Yields the tiles of an index in ascending offset order, reading their bytes from the blob.
pub struct IndexReplaySource {
	blob_path: PathBuf,
	blob: ValueReaderFile<LittleEndian>,
	items: Vec<IndexItem>,
}

impl IndexReplaySource {
	/// Reads and sorts the index and checks every item against the blob length.
	#[context("opening index '{}' for '{}'", index_path.display(), blob_path.display())]
	pub fn open(index_path: &Path, blob_path: &Path) -> Result<IndexReplaySource> {
		let mut items = read_index_file(index_path)?;
		items.sort_by_key(|item| item.offset);

		let blob = ValueReaderFile::open_le(blob_path)?;
		let blob_len = blob.len();
		for item in &items {
			ensure!(
				item.byte_range().fits_within(blob_len),
				"index item {item:?} reaches past the end of the blob ({blob_len} bytes)"
			);
		}
		log::debug!("replaying {} index items against {blob_path:?}", items.len());

		Ok(IndexReplaySource {
			blob_path: blob_path.to_path_buf(),
			blob,
			items,
		})
	}
}

impl TileSource for IndexReplaySource {
	fn source_name(&self) -> String {
		format!("index replay of {:?}", self.blob_path)
	}

	fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()> {
		for item in &self.items {
			let id = item.tile_id().with_context(|| format!("invalid index item {item:?}"))?;
			let blob = self
				.blob
				.read_range(&item.byte_range())
				.with_context(|| format!("reading index item {item:?}"))?;
			visit(id, blob)?;
		}
		Ok(())
	}
}
