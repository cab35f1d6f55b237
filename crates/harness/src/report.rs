//! Structured step results and the append-only report sink.
//!
//! Scenarios build [`StepRecord`]s instead of weaving logging into their
//! control flow; the [`Reporter`] consumes the records. "Did it fail" and
//! "how do we log it" stay decoupled.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{error, info};

pub const DEFAULT_REPORT_DIR: &str = "test-results/reports";
const REPORT_FILE: &str = "test-report.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
	Passed,
	Failed,
	Skipped,
}

impl fmt::Display for StepStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Passed => write!(f, "PASS"),
			Self::Failed => write!(f, "FAIL"),
			Self::Skipped => write!(f, "SKIP"),
		}
	}
}

/// One test step outcome, timestamped at construction.
#[derive(Debug, Clone)]
pub struct StepRecord {
	pub test: String,
	pub status: StepStatus,
	pub message: String,
	pub at: DateTime<Local>,
}

impl StepRecord {
	fn new(test: impl Into<String>, status: StepStatus, message: impl Into<String>) -> Self {
		Self {
			test: test.into(),
			status,
			message: message.into(),
			at: Local::now(),
		}
	}

	pub fn passed(test: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(test, StepStatus::Passed, message)
	}

	pub fn failed(test: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(test, StepStatus::Failed, message)
	}

	pub fn skipped(test: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(test, StepStatus::Skipped, message)
	}

	/// `[timestamp] test - STATUS: message`
	pub fn render(&self) -> String {
		format!(
			"[{}] {} - {}: {}",
			self.at.format("%Y-%m-%d %H:%M:%S"),
			self.test,
			self.status,
			self.message
		)
	}
}

/// Append-only line-oriented report sink.
pub struct Reporter {
	dir: PathBuf,
}

impl Reporter {
	pub fn new() -> Self {
		Self::at(DEFAULT_REPORT_DIR)
	}

	pub fn at(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Appends one record; the directory is created if absent. Write
	/// failures are logged, never propagated to the test.
	pub fn record(&self, record: &StepRecord) {
		info!(test = %record.test, status = %record.status, message = %record.message, "step");
		if let Err(err) = self.append(record) {
			error!(error = %err, "failed to write report record");
		}
	}

	fn append(&self, record: &StepRecord) -> std::io::Result<()> {
		fs::create_dir_all(&self.dir)?;
		let mut file = fs::OpenOptions::new()
			.create(true)
			.append(true)
			.open(self.path())?;
		writeln!(file, "{}", record.render())
	}

	/// Path of the report file.
	pub fn path(&self) -> PathBuf {
		self.dir.join(REPORT_FILE)
	}
}

impl Default for Reporter {
	fn default() -> Self {
		Self::new()
	}
}
