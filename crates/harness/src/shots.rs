//! Screenshot persistence for failed steps.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

pub const DEFAULT_SCREENSHOT_DIR: &str = "test-results/screenshots";

/// Writes a captured screenshot under the default directory.
pub fn save_screenshot(bytes: &[u8], name: &str) -> io::Result<PathBuf> {
	save_screenshot_in(Path::new(DEFAULT_SCREENSHOT_DIR), bytes, name)
}

/// Writes a captured screenshot as `<dir>/<name>.png`, creating the
/// directory if absent. `name` may already carry the extension.
pub fn save_screenshot_in(dir: &Path, bytes: &[u8], name: &str) -> io::Result<PathBuf> {
	fs::create_dir_all(dir)?;
	let file = if name.ends_with(".png") {
		name.to_owned()
	} else {
		format!("{name}.png")
	};
	let path = dir.join(file);
	fs::write(&path, bytes)?;
	info!(path = %path.display(), "screenshot saved");
	Ok(path)
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn writes_bytes_and_appends_the_extension() {
		let temp = TempDir::new().unwrap();
		let dir = temp.path().join("shots");

		let path = save_screenshot_in(&dir, b"\x89PNG", "login_failure").unwrap();

		assert_eq!(path, dir.join("login_failure.png"));
		assert_eq!(fs::read(&path).unwrap(), b"\x89PNG");
	}

	#[test]
	fn keeps_an_existing_extension() {
		let temp = TempDir::new().unwrap();

		let path = save_screenshot_in(temp.path(), b"img", "checkout.png").unwrap();

		assert_eq!(path.file_name().unwrap(), "checkout.png");
	}
}
