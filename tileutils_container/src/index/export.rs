use super::IndexFileWriter;
use crate::ArchiveReader;
use anyhow::Result;
use tileutils_core::{IndexItem, progress::ProgressReporter};

/// Writes one index item per tile of `reader`, in directory order, and finishes the index file.
/// Tile bytes are never read. Returns the number of items.
pub fn export_index(
	reader: &mut ArchiveReader,
	mut writer: IndexFileWriter,
	mut progress: ProgressReporter<'_>,
) -> Result<u64> {
	let mut count = 0;
	for location in reader.tile_locations() {
		let (id, range) = location?;
		writer.write_item(&IndexItem::from_location(&id, &range)?)?;
		count += 1;
		progress.tick(count);
	}
	writer.finish()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ArchiveWriter, TileSink, read_index_file};
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;
	use tileutils_core::{Blob, TileId};

	#[test]
	fn items_locate_tiles_in_the_archive() -> Result<()> {
		let dir = TempDir::new()?;
		let archive = dir.path().join("tiles.pmtiles");
		let index = dir.path().join("tiles.index");

		let mut writer = ArchiveWriter::create(&archive, Blob::new_empty())?;
		writer.write_tile(TileId::new(0, 0, 0)?, Blob::from("zero"))?;
		writer.write_tile(TileId::new(1, 0, 1)?, Blob::from("one"))?;
		writer.finish()?;

		let mut reader = ArchiveReader::open(&archive)?;
		let count = export_index(&mut reader, IndexFileWriter::create(&index)?, ProgressReporter::silent())?;
		assert_eq!(count, 2);

		let items = read_index_file(&index)?;
		assert_eq!(
			items,
			vec![
				IndexItem { x: 0, y: 0, z: 0, size: 4, offset: 16384 },
				IndexItem { x: 1, y: 0, z: 1, size: 3, offset: 16388 },
			]
		);
		Ok(())
	}
}
