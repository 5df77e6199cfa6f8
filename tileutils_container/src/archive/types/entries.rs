//! Directory entry lists and their varint encoding.
//!
//! A serialized directory holds, each as varints: the entry count, the tile id deltas, the run
//! lengths, the byte lengths and finally the offsets. An offset is stored as `offset + 1`, or as
//! `0` when the entry directly follows its predecessor.

use super::{Directory, Entry};
use anyhow::{Context, Result, ensure};
use tileutils_core::{
	Blob, ByteRange,
	compression::compress_gzip,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob},
};

/// Upper bound on entries per directory, to reject corrupt counts before allocating.
const MAX_ENTRIES: u64 = 10_000_000_000;

#[derive(Debug, Default, PartialEq)]
pub struct Entries {
	entries: Vec<Entry>,
}

impl Entries {
	pub fn new() -> Self {
		Self { entries: Vec::new() }
	}

	pub fn from_blob(data: &Blob) -> Result<Self> {
		let mut reader = ValueReaderSlice::new_le(data.as_slice());

		let num_entries = reader.read_varint()?;
		ensure!(num_entries <= MAX_ENTRIES, "directory claims {num_entries} entries");
		// every entry needs at least four bytes
		ensure!(
			num_entries.saturating_mul(4) <= data.len(),
			"directory of {} bytes cannot hold {num_entries} entries",
			data.len()
		);
		let num_entries = num_entries as usize;

		let mut entries: Vec<Entry> = Vec::with_capacity(num_entries);
		let mut last_id: u64 = 0;
		for _ in 0..num_entries {
			last_id = last_id
				.checked_add(reader.read_varint()?)
				.context("directory tile ids exceed 2^64")?;
			entries.push(Entry::new(last_id, ByteRange::empty(), 0));
		}

		for entry in &mut entries {
			entry.run_length = u32::try_from(reader.read_varint()?)?;
		}

		for entry in &mut entries {
			entry.range.length = reader.read_varint()?;
		}

		for i in 0..num_entries {
			let value = reader.read_varint()?;
			entries[i].range.offset = if i > 0 && value == 0 {
				entries[i - 1].range.checked_end().context("directory entry ends beyond 2^64")?
			} else {
				ensure!(value > 0, "first directory entry must carry an offset");
				value - 1
			};
		}

		Ok(Entries { entries })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn push(&mut self, entry: Entry) {
		self.entries.push(entry);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Entry> {
		self.entries.iter()
	}

	pub fn into_vec(self) -> Vec<Entry> {
		self.entries
	}

	/// Sorts by tile id, keeping the write order of equal ids.
	pub fn sort_by_tile_id(&mut self) {
		self.entries.sort_by_key(|entry| entry.tile_id);
	}

	/// First tile id that occurs twice. Expects sorted entries.
	pub fn find_duplicate(&self) -> Option<u64> {
		self
			.entries
			.windows(2)
			.find(|pair| pair[0].tile_id == pair[1].tile_id)
			.map(|pair| pair[0].tile_id)
	}

	/// Number of tiles addressed, counting every tile of a run.
	pub fn tile_count(&self) -> u64 {
		self.iter().map(|entry| u64::from(entry.run_length)).sum()
	}

	/// Serializes the entries into a gzip compressed root directory of at most `target_root_len`
	/// bytes, moving entries into leaf directories when they do not fit.
	pub fn as_directory(&self, target_root_len: u64) -> Result<Directory> {
		let entries = self.entries.as_slice();

		if entries.len() < 16384 {
			let root_bytes = compress_gzip(&serialize_entries(entries)?)?;
			if root_bytes.len() <= target_root_len {
				return Ok(Directory {
					root_bytes,
					leaves_bytes: Blob::new_empty(),
				});
			}
		}

		// root directory of leaf pointers only, growing the leaves until the root fits
		let mut leaf_size: f64 = (entries.len() as f64 / 3500.0).max(4096.0);
		loop {
			let directory = build_root_and_leaves(entries, leaf_size as usize)?;
			if directory.root_bytes.len() <= target_root_len {
				return Ok(directory);
			}
			leaf_size *= 1.2;
		}
	}
}

fn build_root_and_leaves(entries: &[Entry], leaf_size: usize) -> Result<Directory> {
	let mut root_entries: Vec<Entry> = Vec::new();
	let mut leaves = ValueWriterBlob::new_le();

	for chunk in entries.chunks(leaf_size) {
		let leaf = compress_gzip(&serialize_entries(chunk)?)?;
		let offset = leaves.position()?;
		root_entries.push(Entry::new(chunk[0].tile_id, ByteRange::new(offset, leaf.len()), 0));
		leaves.write_blob(&leaf)?;
	}

	Ok(Directory {
		root_bytes: compress_gzip(&serialize_entries(&root_entries)?)?,
		leaves_bytes: leaves.into_blob(),
	})
}

fn serialize_entries(entries: &[Entry]) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new_le();

	writer.write_varint(entries.len() as u64)?;

	let mut last_id: u64 = 0;
	for entry in entries {
		writer.write_varint(entry.tile_id - last_id)?;
		last_id = entry.tile_id;
	}

	for entry in entries {
		writer.write_varint(u64::from(entry.run_length))?;
	}

	for entry in entries {
		writer.write_varint(entry.range.length)?;
	}

	for (i, entry) in entries.iter().enumerate() {
		let offset = if i > 0 && entry.range.offset == entries[i - 1].range.end() {
			0
		} else {
			entry.range.offset + 1
		};
		writer.write_varint(offset)?;
	}

	Ok(writer.into_blob())
}
