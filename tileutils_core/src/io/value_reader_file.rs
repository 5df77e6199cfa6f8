//! `ValueReaderFile` reads values from a file through a buffered reader.
//!
//! It is used for random access into large files such as archives and the raw tile blobs an
//! index is replayed against. Forward seeks within the buffer are cheap, which is why index
//! import visits offsets in ascending order.

use super::{SeekRead, ValueReader};
use anyhow::{Context, Result, ensure};
use byteorder::{ByteOrder, LittleEndian};
use std::{
	fs::File,
	io::{BufReader, Seek},
	marker::PhantomData,
	path::Path,
};

pub struct ValueReaderFile<E: ByteOrder> {
	_phantom: PhantomData<E>,
	reader: BufReader<File>,
	len: u64,
}

impl<E: ByteOrder> ValueReaderFile<E> {
	pub fn new(file: File) -> Result<ValueReaderFile<E>> {
		let len = file.metadata()?.len();
		Ok(ValueReaderFile {
			_phantom: PhantomData,
			reader: BufReader::new(file),
			len,
		})
	}
}

impl ValueReaderFile<LittleEndian> {
	pub fn open_le(path: &Path) -> Result<ValueReaderFile<LittleEndian>> {
		let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
		ValueReaderFile::new(file)
	}
}

impl<E: ByteOrder> ValueReader<E> for ValueReaderFile<E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.reader
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.reader.stream_position()?)
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		ensure!(position <= self.len, "set position outside length");
		let current = self.reader.stream_position()?;
		// seek_relative keeps the buffer for short forward jumps
		self.reader.seek_relative(position as i64 - current as i64)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ByteRange;
	use assert_fs::NamedTempFile;
	use assert_fs::prelude::*;

	#[test]
	fn reads_ranges_in_any_order() -> Result<()> {
		let file = NamedTempFile::new("blob.bin")?;
		file.write_binary(&(0u8..=99).collect::<Vec<u8>>())?;

		let mut reader = ValueReaderFile::open_le(file.path())?;
		assert_eq!(reader.len(), 100);
		assert_eq!(reader.read_range(&ByteRange::new(90, 3))?.into_vec(), vec![90, 91, 92]);
		assert_eq!(reader.read_range(&ByteRange::new(10, 2))?.into_vec(), vec![10, 11]);
		assert_eq!(reader.read_u32()?, u32::from_le_bytes([12, 13, 14, 15]));
		assert!(reader.read_range(&ByteRange::new(99, 2)).is_err());
		Ok(())
	}
}
