use anyhow::{Result, bail};
use tileutils_core::{Blob, compression::decompress_gzip};

/// Compression codes as stored in the archive header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveCompression {
	Unknown = 0x0,
	None = 0x1,
	Gzip = 0x2,
	Brotli = 0x3,
	Zstd = 0x4,
}

impl ArchiveCompression {
	pub fn from_u8(value: u8) -> Result<Self> {
		Ok(match value {
			0 => ArchiveCompression::Unknown,
			1 => ArchiveCompression::None,
			2 => ArchiveCompression::Gzip,
			3 => ArchiveCompression::Brotli,
			4 => ArchiveCompression::Zstd,
			_ => bail!("unknown value {value} for archive compression"),
		})
	}

	/// Undoes the internal compression of directories and metadata.
	pub fn decompress(self, blob: Blob) -> Result<Blob> {
		match self {
			ArchiveCompression::None => Ok(blob),
			ArchiveCompression::Gzip => decompress_gzip(&blob),
			other => bail!("internal compression {other:?} is not supported"),
		}
	}
}
