use tileutils_core::ByteRange;

/// One directory entry.
///
/// With `run_length > 0` the entry addresses `run_length` consecutive tile ids that all share the
/// bytes at `range` (relative to the tile data section). With `run_length == 0` it points at a
/// leaf directory, and `range` is relative to the leaf directory section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
	pub tile_id: u64,
	pub range: ByteRange,
	pub run_length: u32,
}

impl Entry {
	pub fn new(tile_id: u64, range: ByteRange, run_length: u32) -> Self {
		Self {
			tile_id,
			range,
			run_length,
		}
	}

	pub fn is_leaf_pointer(&self) -> bool {
		self.run_length == 0
	}
}
