//! `ValueWriterBlob` writes values into an in-memory [`Blob`].

use super::ValueWriter;
use crate::Blob;
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::io::{Cursor, Write};
use std::marker::PhantomData;

pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	#[must_use]
	pub fn new() -> ValueWriterBlob<E> {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}

	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}
}

impl ValueWriterBlob<LittleEndian> {
	#[must_use]
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::new()
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterBlob<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.cursor
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.cursor.position())
	}
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ByteRange;
	use crate::io::{ValueReader, ValueReaderSlice};

	#[test]
	fn varint_boundaries() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		writer.write_varint(127)?;
		writer.write_varint(128)?;
		writer.write_varint(u64::MAX)?;
		let blob = writer.into_blob();
		assert_eq!(blob.as_hex(), "7f 80 01 ff ff ff ff ff ff ff ff ff 01");

		let mut reader = ValueReaderSlice::new_le(blob.as_slice());
		assert_eq!(reader.read_varint()?, 127);
		assert_eq!(reader.read_varint()?, 128);
		assert_eq!(reader.read_varint()?, u64::MAX);
		Ok(())
	}

	#[test]
	fn mixed_values() -> Result<()> {
		let mut writer = ValueWriterBlob::new_le();
		assert!(writer.is_empty()?);
		writer.write_u8(7)?;
		writer.write_i32(-2)?;
		writer.write_byte_range(&ByteRange::new(1, 2))?;
		writer.write_slice(b"ok")?;
		assert_eq!(writer.position()?, 23);
		assert_eq!(
			writer.into_blob().as_hex(),
			"07 fe ff ff ff 01 00 00 00 00 00 00 00 02 00 00 00 00 00 00 00 6f 6b"
		);
		Ok(())
	}
}
