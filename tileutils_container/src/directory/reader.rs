//! Reads every file below the root of a [`PathTemplate`] as a tile.
//!
//! Files are visited in the order the file system lists them. Every regular file must match the
//! template, otherwise reading fails and names the file. Coordinates are taken from the path as
//! they are, paths use the archive's rows.

use super::PathTemplate;
use crate::TileSource;
use anyhow::{Context, Result, anyhow, ensure};
use std::{fs, path::PathBuf};
use tileutils_core::{Blob, TileId};
use tileutils_derive::context;
use walkdir::WalkDir;

pub struct DirectoryReader {
	template: PathTemplate,
	root: PathBuf,
}

impl DirectoryReader {
	pub fn open(template: PathTemplate) -> Result<DirectoryReader> {
		let root = template.root();
		log::debug!("open tile directory {root:?} for template '{template}'");
		if !root.as_os_str().is_empty() {
			ensure!(
				root.is_dir(),
				"input directory {root:?} of template '{template}' does not exist"
			);
		}
		Ok(DirectoryReader { template, root })
	}
}

impl TileSource for DirectoryReader {
	fn source_name(&self) -> String {
		format!("directory '{}'", self.template)
	}

	#[context("reading tiles for '{}'", self.template)]
	fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()> {
		let current_dir = self.root.as_os_str().is_empty();
		let walk_root = if current_dir { PathBuf::from(".") } else { self.root.clone() };

		for entry in WalkDir::new(&walk_root).follow_links(true) {
			let entry = entry?;
			if !entry.file_type().is_file() {
				continue;
			}

			let path = entry.path();
			let relative = if current_dir { path.strip_prefix(".").unwrap_or(path) } else { path };
			let name = relative
				.to_str()
				.ok_or_else(|| anyhow!("file name {relative:?} is not valid UTF-8"))?;

			let (x, y, z) = self
				.template
				.match_path(name)
				.ok_or_else(|| anyhow!("file '{name}' does not match the template '{}'", self.template))?;
			let id = TileId::new(x, y, z).with_context(|| format!("invalid tile file '{name}'"))?;

			log::trace!("read tile file '{name}'");
			let blob = Blob::from(fs::read(path).with_context(|| format!("reading '{name}'"))?);
			visit(id, blob)?;
		}
		Ok(())
	}
}
