//! Reads tiles from an MBTiles database.
//!
//! The database is opened read-only and scanned once, forward, in the order SQLite returns the
//! rows. Rows are converted to the archive convention while reading.

use crate::TileSource;
use anyhow::{Context, Result, ensure};
use r2d2::Pool;
use r2d2_sqlite::{SqliteConnectionManager, rusqlite::OpenFlags};
use std::path::{Path, PathBuf};
use tileutils_core::{Blob, TileId, to_archive_row};
use tileutils_derive::context;

pub struct MBTilesReader {
	path: PathBuf,
	pool: Pool<SqliteConnectionManager>,
}

impl MBTilesReader {
	#[context("opening MBTiles '{}'", path.display())]
	pub fn open(path: &Path) -> Result<MBTilesReader> {
		log::debug!("open MBTiles {path:?}");
		ensure!(path.is_file(), "database {path:?} does not exist");

		let manager = SqliteConnectionManager::file(path)
			.with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX);
		let pool = Pool::builder().max_size(1).build(manager)?;

		Ok(MBTilesReader {
			path: path.to_path_buf(),
			pool,
		})
	}

	/// All rows of the `metadata` table, in table order.
	#[context("reading metadata of '{}'", self.path.display())]
	pub fn metadata(&self) -> Result<Vec<(String, String)>> {
		let conn = self.pool.get()?;
		let mut stmt = conn.prepare("SELECT name, value FROM metadata")?;
		let pairs = stmt
			.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
			.collect::<Result<Vec<(String, String)>, _>>()?;
		Ok(pairs)
	}
}

/// Converts a raw row into an archive tile id, validating the coordinates on the way.
fn row_to_tile_id(column: i64, row: i64, zoom: i64) -> Result<TileId> {
	let x = u32::try_from(column).with_context(|| format!("invalid tile_column {column}"))?;
	let y = u32::try_from(row).with_context(|| format!("invalid tile_row {row}"))?;
	let z = u32::try_from(zoom).with_context(|| format!("invalid zoom_level {zoom}"))?;
	let top = TileId::new(x, y, z)?;
	Ok(TileId {
		y: to_archive_row(top.y, top.z),
		..top
	})
}

impl TileSource for MBTilesReader {
	fn source_name(&self) -> String {
		format!("MBTiles {:?}", self.path)
	}

	#[context("reading tiles from '{}'", self.path.display())]
	fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()> {
		let conn = self.pool.get()?;
		let mut stmt = conn.prepare("SELECT tile_column, tile_row, zoom_level, tile_data FROM tiles")?;
		let mut rows = stmt.query([])?;

		while let Some(row) = rows.next()? {
			let id = row_to_tile_id(row.get(0)?, row.get(1)?, row.get(2)?)?;
			let data: Vec<u8> = row.get(3)?;
			log::trace!("read tile {id}");
			visit(id, Blob::from(data))?;
		}
		Ok(())
	}
}
