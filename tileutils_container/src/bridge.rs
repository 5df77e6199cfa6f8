//! The streaming bridge between one tile source and one tile sink.
//!
//! A [`ConversionJob`] pulls tiles from a [`TileSource`] one at a time and pushes each of them
//! into a [`TileSink`] before the next one is read, so memory use does not grow with the size of
//! the tile set. The job:
//!
//! - keeps the source order, without sorting or deduplicating;
//! - stops at the first error of either side and tags it with [`ConversionAborted`], which
//!   carries the number of tiles the sink had accepted;
//! - calls [`TileSink::finish`] exactly once, and only after every tile was written.

use anyhow::{Context, Result};
use std::fmt;
use tileutils_core::{Blob, TileId, progress::ProgressReporter};

/// Something that produces tiles in archive row convention.
pub trait TileSource {
	/// Human readable name used in logs and error messages.
	fn source_name(&self) -> String;

	/// Calls `visit` for every tile, in the source's native order, until `visit` fails.
	fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()>;
}

/// Something that consumes tiles in archive row convention.
pub trait TileSink {
	fn sink_name(&self) -> String;

	fn write_tile(&mut self, id: TileId, blob: Blob) -> Result<()>;

	/// Completes the output. Consuming `self` rules out writes after finishing.
	fn finish(self) -> Result<()>
	where
		Self: Sized;
}

/// Context attached to the error of an aborted [`ConversionJob`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConversionAborted {
	pub committed: u64,
}

impl fmt::Display for ConversionAborted {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "conversion aborted after {} tiles", self.committed)
	}
}

pub struct ConversionJob<'a, S: TileSource, K: TileSink> {
	source: S,
	sink: K,
	progress: ProgressReporter<'a>,
}

impl<'a, S: TileSource, K: TileSink> ConversionJob<'a, S, K> {
	pub fn new(source: S, sink: K) -> Self {
		ConversionJob {
			source,
			sink,
			progress: ProgressReporter::silent(),
		}
	}

	#[must_use]
	pub fn with_progress(mut self, progress: ProgressReporter<'a>) -> Self {
		self.progress = progress;
		self
	}

	/// Moves all tiles and finishes the sink. Returns the number of tiles written.
	pub fn run(self) -> Result<u64> {
		let ConversionJob {
			mut source,
			mut sink,
			mut progress,
		} = self;

		log::debug!("converting from {} to {}", source.source_name(), sink.sink_name());

		let mut committed: u64 = 0;
		let result = source.visit_tiles(&mut |id, blob| {
			sink.write_tile(id, blob)?;
			committed += 1;
			progress.tick(committed);
			Ok(())
		});

		if let Err(err) = result {
			return Err(err.context(ConversionAborted { committed }));
		}

		let sink_name = sink.sink_name();
		sink.finish().with_context(|| format!("finishing {sink_name}"))?;

		log::debug!("converted {committed} tiles");
		Ok(committed)
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;
	use anyhow::bail;
	use pretty_assertions::assert_eq;
	use std::{cell::RefCell, rc::Rc, time::Duration};

	pub struct VecSource(pub Vec<(TileId, Blob)>, pub Option<usize>);

	impl TileSource for VecSource {
		fn source_name(&self) -> String {
			String::from("vec")
		}

		fn visit_tiles(&mut self, visit: &mut dyn FnMut(TileId, Blob) -> Result<()>) -> Result<()> {
			for (index, (id, blob)) in self.0.iter().enumerate() {
				if Some(index) == self.1 {
					bail!("source broke at tile {index}");
				}
				visit(*id, blob.clone())?;
			}
			Ok(())
		}
	}

	#[derive(Default)]
	pub struct RecordingSink {
		pub written: Rc<RefCell<Vec<TileId>>>,
		pub finished: Rc<RefCell<u32>>,
		pub fail_at: Option<usize>,
	}

	impl TileSink for RecordingSink {
		fn sink_name(&self) -> String {
			String::from("recording")
		}

		fn write_tile(&mut self, id: TileId, _blob: Blob) -> Result<()> {
			if Some(self.written.borrow().len()) == self.fail_at {
				bail!("sink refused {id}");
			}
			self.written.borrow_mut().push(id);
			Ok(())
		}

		fn finish(self) -> Result<()> {
			*self.finished.borrow_mut() += 1;
			Ok(())
		}
	}

	fn tiles() -> Vec<(TileId, Blob)> {
		[(3, 1, 2), (0, 0, 0), (1, 1, 1), (0, 0, 2)]
			.into_iter()
			.map(|(x, y, z)| (TileId::new(x, y, z).unwrap(), Blob::from(vec![x as u8])))
			.collect()
	}

	fn ids() -> Vec<TileId> {
		tiles().into_iter().map(|(id, _)| id).collect()
	}

	#[test]
	fn keeps_source_order_and_finishes_once() -> Result<()> {
		let sink = RecordingSink::default();
		let (written, finished) = (Rc::clone(&sink.written), Rc::clone(&sink.finished));

		let count = ConversionJob::new(VecSource(tiles(), None), sink).run()?;

		assert_eq!(count, 4);
		assert_eq!(*written.borrow(), ids());
		assert_eq!(*finished.borrow(), 1);
		Ok(())
	}

	#[test]
	fn sink_error_reports_committed_tiles() {
		let sink = RecordingSink {
			fail_at: Some(2),
			..Default::default()
		};
		let finished = Rc::clone(&sink.finished);

		let err = ConversionJob::new(VecSource(tiles(), None), sink).run().unwrap_err();

		assert_eq!(err.downcast_ref::<ConversionAborted>(), Some(&ConversionAborted { committed: 2 }));
		assert_eq!(err.to_string(), "conversion aborted after 2 tiles");
		assert_eq!(err.root_cause().to_string(), "sink refused 1/1/1");
		assert_eq!(*finished.borrow(), 0);
	}

	#[test]
	fn source_error_reports_committed_tiles() {
		let sink = RecordingSink::default();
		let (written, finished) = (Rc::clone(&sink.written), Rc::clone(&sink.finished));

		let err = ConversionJob::new(VecSource(tiles(), Some(3)), sink).run().unwrap_err();

		assert_eq!(err.downcast_ref::<ConversionAborted>().map(|a| a.committed), Some(3));
		assert_eq!(written.borrow().len(), 3);
		assert_eq!(*finished.borrow(), 0);
	}

	#[test]
	fn empty_source_still_finishes() -> Result<()> {
		let sink = RecordingSink::default();
		let finished = Rc::clone(&sink.finished);
		assert_eq!(ConversionJob::new(VecSource(vec![], None), sink).run()?, 0);
		assert_eq!(*finished.borrow(), 1);
		Ok(())
	}

	#[test]
	fn progress_sees_a_running_count() -> Result<()> {
		let mut reports = Vec::new();
		let progress = ProgressReporter::new(Duration::ZERO, |count| reports.push(count));
		ConversionJob::new(VecSource(tiles(), None), RecordingSink::default())
			.with_progress(progress)
			.run()?;
		assert_eq!(reports, vec![1, 2, 3, 4]);
		Ok(())
	}
}
