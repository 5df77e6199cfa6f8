use anyhow::{Result, ensure};
use byteorder::LittleEndian;
use std::{
	fs::File,
	path::{Path, PathBuf},
};
use tileutils_core::{
	INDEX_ITEM_SIZE, IndexItem,
	io::{ValueReader, ValueReaderFile, ValueWriterFile},
};
use tileutils_derive::context;

/// Reads all items of an index file, in file order.
#[context("reading index file '{}'", path.display())]
pub fn read_index_file(path: &Path) -> Result<Vec<IndexItem>> {
	log::debug!("read index file {path:?}");
	let mut reader = ValueReaderFile::open_le(path)?;
	let len = reader.len();
	ensure!(
		len % INDEX_ITEM_SIZE == 0,
		"index file has {len} bytes, which is not a multiple of {INDEX_ITEM_SIZE}"
	);

	let mut items = Vec::with_capacity((len / INDEX_ITEM_SIZE) as usize);
	while reader.has_remaining()? {
		items.push(IndexItem::read(&mut reader)?);
	}
	log::trace!("read {} index items", items.len());
	Ok(items)
}

pub struct IndexFileWriter {
	path: PathBuf,
	writer: ValueWriterFile<LittleEndian>,
	count: u64,
}

impl IndexFileWriter {
	/// Creates the index file. Fails if `path` already exists.
	#[context("creating index file '{}'", path.display())]
	pub fn create(path: &Path) -> Result<IndexFileWriter> {
		log::debug!("create index file {path:?}");
		ensure!(!path.exists(), "output {path:?} already exists");
		Ok(IndexFileWriter {
			path: path.to_path_buf(),
			writer: ValueWriterFile::new_le(File::create_new(path)?),
			count: 0,
		})
	}

	pub fn write_item(&mut self, item: &IndexItem) -> Result<()> {
		item.write(&mut self.writer)?;
		self.count += 1;
		Ok(())
	}

	/// Flushes the file and returns the number of items written.
	#[context("finishing index file '{}'", self.path.display())]
	pub fn finish(mut self) -> Result<u64> {
		self.writer.flush()?;
		Ok(self.count)
	}
}
