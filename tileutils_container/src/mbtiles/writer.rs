//! Writes tiles into a new MBTiles database.
//!
//! The whole job runs inside one transaction that starts before the schema is created. Only
//! [`MBTilesWriter::finish`] commits. A failed insert, or dropping the writer early, rolls back
//! everything, so an aborted conversion leaves an empty database without tables.

use crate::TileSink;
use anyhow::{Context, Result, ensure};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::{SqliteConnectionManager, rusqlite::params};
use std::path::{Path, PathBuf};
use tileutils_core::{Blob, TileId, to_tree_row};
use tileutils_derive::context;

const SCHEMA: &str = "CREATE TABLE metadata (name TEXT, value TEXT);
CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB);
CREATE UNIQUE INDEX tile_index ON tiles (zoom_level, tile_column, tile_row);";

pub struct MBTilesWriter {
	path: PathBuf,
	conn: PooledConnection<SqliteConnectionManager>,
	committed: bool,
}

impl MBTilesWriter {
	/// Creates the database, its schema and the metadata rows. Fails if `path` already exists.
	#[context("creating MBTiles '{}'", path.display())]
	pub fn create(path: &Path, metadata: &[(&str, &str)]) -> Result<MBTilesWriter> {
		log::debug!("create MBTiles {path:?}");
		ensure!(!path.exists(), "output {path:?} already exists");

		let manager = SqliteConnectionManager::file(path);
		let pool = Pool::builder().max_size(1).build(manager)?;

		let mut writer = MBTilesWriter {
			path: path.to_path_buf(),
			conn: pool.get()?,
			committed: false,
		};

		writer.conn.execute_batch("BEGIN")?;
		writer.conn.execute_batch(SCHEMA)?;
		for (name, value) in metadata {
			log::trace!("metadata {name} = {value}");
			writer
				.conn
				.execute("INSERT INTO metadata (name, value) VALUES (?1, ?2)", params![name, value])?;
		}

		Ok(writer)
	}
}

impl TileSink for MBTilesWriter {
	fn sink_name(&self) -> String {
		format!("MBTiles {:?}", self.path)
	}

	/// Inserts one row. `id` uses bottom-origin rows and is stored top-origin.
	fn write_tile(&mut self, id: TileId, blob: Blob) -> Result<()> {
		let tile_row = to_tree_row(id.y, id.z);
		let mut stmt = self
			.conn
			.prepare_cached("INSERT INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)")?;
		stmt
			.execute(params![id.z, id.x, tile_row, blob.as_slice()])
			.with_context(|| format!("inserting tile {id} into {:?}", self.path))?;
		Ok(())
	}

	fn finish(mut self) -> Result<()> {
		log::info!("Writing index...");
		self
			.conn
			.execute_batch("COMMIT")
			.with_context(|| format!("committing {:?}", self.path))?;
		self.committed = true;
		log::debug!("committed {:?}", self.path);
		Ok(())
	}
}

impl Drop for MBTilesWriter {
	fn drop(&mut self) {
		if !self.committed {
			log::debug!("rolling back {:?}", self.path);
			if let Err(err) = self.conn.execute_batch("ROLLBACK") {
				log::warn!("rollback of {:?} failed: {err}", self.path);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ConversionAborted, ConversionJob, MBTilesReader, TileSource, bridge::tests::VecSource};
	use assert_fs::TempDir;
	use pretty_assertions::assert_eq;
	use r2d2_sqlite::rusqlite::Connection;

	fn count(path: &Path, sql: &str) -> Result<i64> {
		Ok(Connection::open(path)?.query_row(sql, [], |row| row.get(0))?)
	}

	#[test]
	fn writes_metadata_and_flipped_rows() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("out.mbtiles");

		let mut writer = MBTilesWriter::create(&path, &[("name", "demo"), ("format", "webp")])?;
		writer.write_tile(TileId::new(1, 0, 2)?, Blob::from("tile"))?;
		writer.finish()?;

		let conn = Connection::open(&path)?;
		let row: (u32, u32, u32, Vec<u8>) = conn.query_row(
			"SELECT zoom_level, tile_column, tile_row, tile_data FROM tiles",
			[],
			|row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
		)?;
		assert_eq!(row, (2, 1, 3, b"tile".to_vec()));

		let metadata = MBTilesReader::open(&path)?.metadata()?;
		assert_eq!(
			metadata,
			vec![
				(String::from("name"), String::from("demo")),
				(String::from("format"), String::from("webp"))
			]
		);
		Ok(())
	}

	#[test]
	fn duplicate_tile_rolls_back_everything() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("dup.mbtiles");
		let tile = (TileId::new(0, 0, 1)?, Blob::from("x"));
		let source = VecSource(vec![tile.clone(), tile], None);

		let err = ConversionJob::new(source, MBTilesWriter::create(&path, &[])?)
			.run()
			.unwrap_err();
		assert_eq!(err.downcast_ref::<ConversionAborted>().map(|a| a.committed), Some(1));

		assert!(path.exists());
		assert_eq!(count(&path, "SELECT COUNT(*) FROM sqlite_master")?, 0);
		Ok(())
	}

	#[test]
	fn dropping_without_finish_rolls_back() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("dropped.mbtiles");

		let mut writer = MBTilesWriter::create(&path, &[("name", "gone")])?;
		writer.write_tile(TileId::new(0, 0, 0)?, Blob::from("x"))?;
		drop(writer);

		assert_eq!(count(&path, "SELECT COUNT(*) FROM sqlite_master")?, 0);
		Ok(())
	}

	#[test]
	fn refuses_existing_output() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("exists.mbtiles");
		std::fs::write(&path, b"keep")?;
		assert!(MBTilesWriter::create(&path, &[]).is_err());
		assert_eq!(std::fs::read(&path)?, b"keep");
		Ok(())
	}

	#[test]
	fn empty_job_leaves_an_empty_table() -> Result<()> {
		let dir = TempDir::new()?;
		let path = dir.path().join("empty.mbtiles");
		ConversionJob::new(VecSource(vec![], None), MBTilesWriter::create(&path, &[])?).run()?;

		assert_eq!(count(&path, "SELECT COUNT(*) FROM tiles")?, 0);
		let mut visited = 0;
		MBTilesReader::open(&path)?.visit_tiles(&mut |_, _| {
			visited += 1;
			Ok(())
		})?;
		assert_eq!(visited, 0);
		Ok(())
	}
}
