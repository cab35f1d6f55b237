//! Cached JSON test data lookup.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{HarnessError, Result};

/// Directories searched for a data file, in order.
const SEARCH_DIRS: &[&str] = &["testdata", "tests/resources/testdata"];

/// Loads JSON data files by name and caches the parsed documents.
///
/// Every caller asking for the same file gets the same shared document, so
/// a run touching a fixture dozens of times parses it once.
pub struct TestDataStore {
	roots: Vec<PathBuf>,
	cache: Mutex<HashMap<String, Arc<serde_json::Value>>>,
}

impl TestDataStore {
	pub fn new() -> Self {
		Self::with_roots(SEARCH_DIRS.iter().map(PathBuf::from).collect())
	}

	pub fn with_roots(roots: Vec<PathBuf>) -> Self {
		Self {
			roots,
			cache: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the parsed document for `filename`, searching the roots in
	/// order on a cache miss.
	pub fn load(&self, filename: &str) -> Result<Arc<serde_json::Value>> {
		if let Some(doc) = self.cache.lock().get(filename) {
			return Ok(Arc::clone(doc));
		}

		for root in &self.roots {
			let path = root.join(filename);
			if !path.is_file() {
				continue;
			}
			let raw = fs::read_to_string(&path).map_err(|source| HarnessError::DataRead {
				path: path.clone(),
				source,
			})?;
			let doc: serde_json::Value =
				serde_json::from_str(&raw).map_err(|source| HarnessError::DataParse {
					path: path.clone(),
					source,
				})?;
			debug!(path = %path.display(), "loaded test data");
			let doc = Arc::new(doc);
			self.cache.lock().insert(filename.to_owned(), Arc::clone(&doc));
			return Ok(doc);
		}

		Err(HarnessError::DataNotFound {
			name: filename.to_owned(),
		})
	}
}

impl Default for TestDataStore {
	fn default() -> Self {
		Self::new()
	}
}
