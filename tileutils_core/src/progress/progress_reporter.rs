use std::time::{Duration, Instant};

/// Default interval between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

pub struct ProgressReporter<'a> {
	interval: Duration,
	last_report: Instant,
	callback: Box<dyn FnMut(u64) + 'a>,
}

impl<'a> ProgressReporter<'a> {
	pub fn new(interval: Duration, callback: impl FnMut(u64) + 'a) -> ProgressReporter<'a> {
		ProgressReporter {
			interval,
			last_report: Instant::now(),
			callback: Box::new(callback),
		}
	}

	/// Reports nothing.
	pub fn silent() -> ProgressReporter<'a> {
		ProgressReporter::new(Duration::MAX, |_| {})
	}

	/// Logs "Processed N tiles" at info level every `interval`.
	pub fn log_every(interval: Duration) -> ProgressReporter<'a> {
		ProgressReporter::new(interval, |count| log::info!("Processed {count} tiles"))
	}

	/// Records that `count` tiles have been processed so far.
	pub fn tick(&mut self, count: u64) {
		self.tick_at(count, Instant::now());
	}

	fn tick_at(&mut self, count: u64, now: Instant) {
		if now.saturating_duration_since(self.last_report) >= self.interval {
			self.last_report = now;
			(self.callback)(count);
		}
	}
}
