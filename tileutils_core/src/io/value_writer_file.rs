//! `ValueWriterFile` writes values to a file through a buffered writer.
//!
//! Besides appending it can jump back and overwrite earlier bytes, which archive writers use to
//! fill in headers once all tiles are written.

use super::ValueWriter;
use crate::{Blob, ByteRange};
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::marker::PhantomData;

pub struct ValueWriterFile<E: ByteOrder> {
	_phantom: PhantomData<E>,
	writer: BufWriter<File>,
}

impl<E: ByteOrder> ValueWriterFile<E> {
	#[must_use]
	pub fn new(file: File) -> ValueWriterFile<E> {
		ValueWriterFile {
			_phantom: PhantomData,
			writer: BufWriter::new(file),
		}
	}

	/// Appends `blob` at the current position and returns where it landed.
	pub fn append(&mut self, blob: &Blob) -> Result<ByteRange> {
		let offset = self.writer.stream_position()?;
		self.writer.write_all(blob.as_slice())?;
		Ok(ByteRange::new(offset, blob.len()))
	}

	pub fn set_position(&mut self, position: u64) -> Result<()> {
		self.writer.seek(SeekFrom::Start(position))?;
		Ok(())
	}

	/// Overwrites the beginning of the file and restores the current position.
	pub fn write_start(&mut self, blob: &Blob) -> Result<()> {
		let position = self.writer.stream_position()?;
		self.writer.rewind()?;
		self.writer.write_all(blob.as_slice())?;
		self.writer.seek(SeekFrom::Start(position))?;
		Ok(())
	}

	pub fn flush(&mut self) -> Result<()> {
		self.writer.flush()?;
		Ok(())
	}
}

impl ValueWriterFile<LittleEndian> {
	#[must_use]
	pub fn new_le(file: File) -> ValueWriterFile<LittleEndian> {
		ValueWriterFile::new(file)
	}
}

impl<E: ByteOrder> ValueWriter<E> for ValueWriterFile<E> {
	fn get_writer(&mut self) -> &mut dyn Write {
		&mut self.writer
	}

	fn position(&mut self) -> Result<u64> {
		Ok(self.writer.stream_position()?)
	}
}
