//! Gzip helpers for the archive's internal directories and metadata.

use crate::Blob;
use anyhow::{Context, Result};
use flate2::bufread::{GzDecoder, GzEncoder};
use std::io::Read;
use tileutils_derive::context;

#[context("compressing blob ({} bytes) using gzip", blob.len())]
pub fn compress_gzip(blob: &Blob) -> Result<Blob> {
	let mut encoder = GzEncoder::new(blob.as_slice(), flate2::Compression::best());
	let mut compressed_data = Vec::new();
	encoder
		.read_to_end(&mut compressed_data)
		.context("failed to compress data using gzip")?;
	Ok(Blob::from(compressed_data))
}

#[context("decompressing blob ({} bytes) using gzip", blob.len())]
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.context("failed to decompress data using gzip")?;
	Ok(Blob::from(decompressed_data))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gzip_round_trip() -> Result<()> {
		let data = Blob::from((0..100_000u32).map(|i| (i % 251) as u8).collect::<Vec<u8>>());
		let compressed = compress_gzip(&data)?;
		assert!(compressed.len() < data.len());
		assert_eq!(&compressed.as_slice()[0..2], &[0x1f, 0x8b]);
		assert_eq!(decompress_gzip(&compressed)?, data);
		Ok(())
	}

	#[test]
	fn empty_blob_compresses() -> Result<()> {
		let compressed = compress_gzip(&Blob::new_empty())?;
		assert!(!compressed.is_empty());
		assert!(decompress_gzip(&compressed)?.is_empty());
		Ok(())
	}

	#[test]
	fn garbage_is_rejected() {
		let err = decompress_gzip(&Blob::from("not gzip")).unwrap_err();
		assert_eq!(err.to_string(), "decompressing blob (8 bytes) using gzip");
	}
}
