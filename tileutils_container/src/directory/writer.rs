//! Writes each tile to the path its coordinates render to.
//!
//! Parent directories are created on demand and existing files are overwritten. Files written
//! before an error stay on disk.

use super::PathTemplate;
use crate::TileSink;
use anyhow::{Context, Result, ensure};
use std::{fs, path::Path};
use tileutils_core::{Blob, TileId};

pub struct DirectoryWriter {
	template: PathTemplate,
	count: u64,
}

impl DirectoryWriter {
	/// Fails if the root directory of the template already exists. A template rooted in the
	/// current directory skips that check.
	pub fn create(template: PathTemplate) -> Result<DirectoryWriter> {
		let root = template.root();
		log::debug!("create tile directory {root:?} for template '{template}'");
		if !root.as_os_str().is_empty() {
			ensure!(
				!root.exists(),
				"output directory {root:?} of template '{template}' already exists"
			);
		}
		Ok(DirectoryWriter { template, count: 0 })
	}
}

impl TileSink for DirectoryWriter {
	fn sink_name(&self) -> String {
		format!("directory '{}'", self.template)
	}

	fn write_tile(&mut self, id: TileId, blob: Blob) -> Result<()> {
		let name = self.template.render(&id);
		let path = Path::new(&name);
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent).with_context(|| format!("creating directory {parent:?}"))?;
		}
		fs::write(path, blob.as_slice()).with_context(|| format!("writing tile {id} to '{name}'"))?;
		self.count += 1;
		Ok(())
	}

	fn finish(self) -> Result<()> {
		log::debug!("wrote {} tile files for '{}'", self.count, self.template);
		Ok(())
	}
}
