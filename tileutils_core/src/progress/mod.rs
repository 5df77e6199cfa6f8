//! Job-local progress reporting.
//!
//! A conversion job owns one [`ProgressReporter`] and calls [`ProgressReporter::tick`] after every
//! tile. The injected callback only fires when the configured wall-clock interval has elapsed
//! since the last report, so per-tile overhead is a single `Instant::now()`.

mod progress_reporter;

pub use progress_reporter::*;
