//! This module provides the `ByteRange` struct, a contiguous range of bytes given by offset and length.
//!
//! # Examples
//!
//! ```rust
//! use tileutils_core::ByteRange;
//!
//! let range = ByteRange::new(23, 42);
//! assert_eq!(range.end(), 65);
//! assert_eq!(range.get_shifted_forward(100).offset, 123);
//! ```

use std::fmt;
use std::ops::Range;

#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct ByteRange {
	pub offset: u64,
	pub length: u64,
}

impl ByteRange {
	pub fn new(offset: u64, length: u64) -> Self {
		Self { offset, length }
	}

	pub fn empty() -> Self {
		Self { offset: 0, length: 0 }
	}

	/// First byte after the range.
	pub fn end(&self) -> u64 {
		self.offset + self.length
	}

	/// First byte after the range, or `None` if that does not fit into a `u64`.
	pub fn checked_end(&self) -> Option<u64> {
		self.offset.checked_add(self.length)
	}

	/// Whether the range lies inside data of `len` bytes.
	pub fn fits_within(&self, len: u64) -> bool {
		self.checked_end().is_some_and(|end| end <= len)
	}

	pub fn get_shifted_forward(&self, offset: u64) -> Self {
		Self {
			offset: self.offset + offset,
			length: self.length,
		}
	}

	pub fn get_shifted_backward(&self, offset: u64) -> Self {
		Self {
			offset: self.offset - offset,
			length: self.length,
		}
	}

	pub fn as_range_usize(&self) -> Range<usize> {
		Range {
			start: self.offset as usize,
			end: self.end() as usize,
		}
	}
}

impl fmt::Debug for ByteRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ByteRange[{},{}]", self.offset, self.length)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shifting() {
		let range = ByteRange::new(23, 42);
		assert_eq!(range.get_shifted_forward(7), ByteRange::new(30, 42));
		assert_eq!(range.get_shifted_backward(3), ByteRange::new(20, 42));
		assert_eq!(range.as_range_usize(), 23..65);
	}

	#[test]
	fn fits_within() {
		assert!(ByteRange::new(6, 4).fits_within(10));
		assert!(ByteRange::new(10, 0).fits_within(10));
		assert!(!ByteRange::new(8, 3).fits_within(10));
		assert!(!ByteRange::new(u64::MAX - 1, 4).fits_within(u64::MAX));
		assert_eq!(ByteRange::new(u64::MAX - 1, 4).checked_end(), None);
		assert_eq!(ByteRange::new(u64::MAX - 1, 1).checked_end(), Some(u64::MAX));
	}

	#[test]
	fn debug() {
		assert_eq!(format!("{:?}", ByteRange::new(23, 42)), "ByteRange[23,42]");
		assert_eq!(ByteRange::empty().end(), 0);
	}
}
