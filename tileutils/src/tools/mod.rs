pub mod archive_to_mbtiles;
pub mod archive_to_tree;
pub mod export_index;
pub mod import_index;
pub mod mbtiles_to_archive;
pub mod tree_to_archive;

mod preconditions;

use anyhow::Result;
use tileutils_container::{ConversionJob, TileSink, TileSource};
use tileutils_core::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressReporter};

/// Streams all tiles from `source` into `sink`, logging the phases and the progress.
fn convert<S: TileSource, K: TileSink>(source: S, sink: K) -> Result<()> {
	log::info!("Writing tiles...");
	let count = ConversionJob::new(source, sink)
		.with_progress(ProgressReporter::log_every(DEFAULT_PROGRESS_INTERVAL))
		.run()?;
	log::debug!("{count} tiles written");
	log::info!("Done!");
	Ok(())
}
