//! Ordered best-effort resource release.

use tracing::{debug, warn};

use crate::error::SessionError;

/// One failed release step: which stage, and why.
#[derive(Debug)]
pub struct TeardownFailure {
	pub stage: &'static str,
	pub error: SessionError,
}

/// Collected outcome of an ordered teardown cascade.
///
/// Releases are executed unconditionally in order; failures are recorded
/// here instead of propagating, so a cleanup failure can never mask a test
/// failure travelling past it.
#[derive(Debug, Default)]
pub struct TeardownReport {
	released: Vec<&'static str>,
	failures: Vec<TeardownFailure>,
}

impl TeardownReport {
	/// Records the outcome of releasing `stage`.
	pub fn release(&mut self, stage: &'static str, outcome: Result<(), SessionError>) {
		match outcome {
			Ok(()) => self.released.push(stage),
			Err(error) => self.failures.push(TeardownFailure { stage, error }),
		}
	}

	/// Stages released cleanly, in execution order.
	pub fn released(&self) -> &[&'static str] {
		&self.released
	}

	pub fn failures(&self) -> &[TeardownFailure] {
		&self.failures
	}

	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}

	/// Logs the report: one debug line per clean release, one warning per
	/// failure. Nothing is rethrown.
	pub fn log(&self) {
		for stage in &self.released {
			debug!(stage, "released");
		}
		for failure in &self.failures {
			warn!(stage = failure.stage, error = %failure.error, "teardown failure ignored");
		}
	}
}
