use std::fmt::Debug;
use tileutils_core::Blob;

/// Serialized and compressed directory: the root plus the concatenated leaves.
pub struct Directory {
	pub root_bytes: Blob,
	pub leaves_bytes: Blob,
}

impl Debug for Directory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Directory")
			.field("root_bytes", &self.root_bytes.len())
			.field("leaves_bytes", &self.leaves_bytes.len())
			.finish()
	}
}
