//! The `ValueReader` trait reads integers, varints, byte ranges and blobs from a seekable source.
//!
//! Implementations choose the byte order through the `E` parameter. Archive headers, directories
//! and index files are all little-endian, so most callers use the `new_le` constructors.

use crate::{Blob, ByteRange};
use anyhow::{Result, bail, ensure};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// Anything that can be both read and seeked.
pub trait SeekRead: Seek + Read {}
impl<T: Seek + Read> SeekRead for T {}

pub trait ValueReader<E: ByteOrder> {
	/// The underlying reader, positioned at the next value.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Total length of the readable data.
	fn len(&self) -> u64;

	fn position(&mut self) -> Result<u64>;

	fn set_position(&mut self, position: u64) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn remaining(&mut self) -> Result<u64> {
		Ok(self.len().saturating_sub(self.position()?))
	}

	fn has_remaining(&mut self) -> Result<bool> {
		Ok(self.remaining()? > 0)
	}

	/// Reads an unsigned LEB128 varint.
	fn read_varint(&mut self) -> Result<u64> {
		let mut value = 0;
		let mut shift = 0;
		loop {
			let byte = self.get_reader().read_u8()?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				bail!("Varint too long");
			}
		}
		Ok(value)
	}

	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.get_reader().read_u8()?)
	}

	fn read_i32(&mut self) -> Result<i32> {
		Ok(self.get_reader().read_i32::<E>()?)
	}

	fn read_u32(&mut self) -> Result<u32> {
		Ok(self.get_reader().read_u32::<E>()?)
	}

	fn read_u64(&mut self) -> Result<u64> {
		Ok(self.get_reader().read_u64::<E>()?)
	}

	/// Reads exactly `length` bytes.
	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		ensure!(
			length <= self.remaining()?,
			"cannot read {length} bytes, only {} remaining",
			self.remaining()?
		);
		let mut blob = Blob::new_sized(length as usize);
		self.get_reader().read_exact(blob.as_mut_slice())?;
		Ok(blob)
	}

	/// Seeks to `range.offset` and reads `range.length` bytes.
	fn read_range(&mut self, range: &ByteRange) -> Result<Blob> {
		ensure!(
			range.fits_within(self.len()),
			"{range:?} reaches beyond the end of the data ({} bytes)",
			self.len()
		);
		self.set_position(range.offset)?;
		self.read_blob(range.length)
	}

	/// Reads an offset/length pair of two `u64`.
	fn read_byte_range(&mut self) -> Result<ByteRange> {
		let offset = self.read_u64()?;
		let length = self.read_u64()?;
		Ok(ByteRange::new(offset, length))
	}
}
