//! Layered test configuration.
//!
//! Configuration is a flat key/value document loaded once at harness startup
//! and never mutated afterwards. Sources are resolved in a fixed order:
//! an explicit path in [`CONFIG_PATH_ENV`], then `config.properties` in the
//! working directory, then `config/config.properties`. A missing source is a
//! startup failure; a missing *key* is not, since every accessor falls back
//! to a caller-supplied default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "VOUCH_CONFIG";

const FALLBACK_PATHS: &[&str] = &["config.properties", "config/config.properties"];

/// Recognized configuration keys.
pub mod keys {
	pub const SPOTIFY_ACCESS_TOKEN: &str = "spotify.access.token";
	pub const SPOTIFY_BASE_URI: &str = "spotify.base.uri";
	pub const BROWSER_TYPE: &str = "browser.type";
	pub const BROWSER_HEADLESS: &str = "browser.headless";
	pub const APPIUM_SERVER_URL: &str = "appium.server.url";
	pub const APP_PATH: &str = "app.path";
	pub const DEVICE_NAME: &str = "device.name";
	pub const PLATFORM_VERSION: &str = "platform.version";
	pub const AUTOMATION_NAME: &str = "automation.name";
	pub const APP_PACKAGE: &str = "app.package";
	pub const APP_ACTIVITY: &str = "app.activity";
}

#[derive(Debug, Error)]
pub enum ConfigError {
	/// No configuration source exists anywhere in the search path.
	/// The process cannot proceed without one.
	#[error("configuration file not found: set {CONFIG_PATH_ENV} or provide config.properties")]
	NotFound,

	#[error("failed to read configuration from {path}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Immutable key/value configuration shared across the harness.
#[derive(Debug, Clone, Default)]
pub struct Config {
	values: HashMap<String, String>,
}

impl Config {
	/// Loads configuration from the fixed search order.
	///
	/// Fails with [`ConfigError::NotFound`] when no source exists; this is
	/// a startup precondition, not a recoverable per-call error.
	pub fn load() -> Result<Self, ConfigError> {
		if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
			let path = path.trim().to_string();
			if !path.is_empty() {
				return Self::load_from(Path::new(&path));
			}
		}
		for candidate in FALLBACK_PATHS {
			let path = Path::new(candidate);
			if path.exists() {
				return Self::load_from(path);
			}
		}
		Err(ConfigError::NotFound)
	}

	/// Loads configuration from an explicit properties file.
	pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::parse(&content);
		info!(path = %path.display(), keys = config.values.len(), "configuration loaded");
		Ok(config)
	}

	/// Builds a configuration from in-memory pairs. Used by embedders and tests.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	fn parse(content: &str) -> Self {
		let mut values = HashMap::new();
		for line in content.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
				continue;
			}
			if let Some((key, value)) = line.split_once('=') {
				values.insert(key.trim().to_string(), value.trim().to_string());
			}
		}
		Self { values }
	}

	/// Returns the value for `key`, or `default` when the key is absent.
	/// Never fails for an unknown key.
	pub fn get(&self, key: &str, default: &str) -> String {
		self.lookup(key).unwrap_or_else(|| default.to_string())
	}

	/// Boolean accessor. Absent or unparsable values resolve to `default`.
	pub fn get_bool(&self, key: &str, default: bool) -> bool {
		self.lookup(key).and_then(|v| parse_bool(&v)).unwrap_or(default)
	}

	/// Resolves one key through the layers: a process-environment override
	/// (`browser.type` reads `VOUCH_BROWSER_TYPE`) wins over the file value.
	fn lookup(&self, key: &str) -> Option<String> {
		if let Ok(value) = std::env::var(env_override_key(key)) {
			return Some(value);
		}
		self.values.get(key).cloned()
	}
}

fn env_override_key(key: &str) -> String {
	let mut name = String::with_capacity(key.len() + 6);
	name.push_str("VOUCH_");
	for ch in key.chars() {
		match ch {
			'.' | '-' => name.push('_'),
			_ => name.push(ch.to_ascii_uppercase()),
		}
	}
	name
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use serial_test::serial;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn parse_skips_comments_and_blank_lines() {
		let config = Config::parse(
			"# comment\n\
			 ! also a comment\n\
			 \n\
			 browser.type = firefox\n\
			 browser.headless=true\n",
		);
		assert_eq!(config.get(keys::BROWSER_TYPE, "chromium"), "firefox");
		assert!(config.get_bool(keys::BROWSER_HEADLESS, false));
	}

	#[test]
	fn absent_key_returns_exactly_the_default() {
		let config = Config::from_pairs([("present", "value")]);
		assert_eq!(config.get("absent.key", "fallback"), "fallback");
		assert!(config.get_bool("absent.flag", true));
		assert!(!config.get_bool("absent.flag", false));
	}

	#[test]
	fn bool_accessor_accepts_common_spellings() {
		let config = Config::from_pairs([
			("a", "TRUE"),
			("b", "1"),
			("c", "Yes"),
			("d", "off"),
			("e", "garbage"),
		]);
		assert!(config.get_bool("a", false));
		assert!(config.get_bool("b", false));
		assert!(config.get_bool("c", false));
		assert!(!config.get_bool("d", true));
		assert!(config.get_bool("e", true));
	}

	#[test]
	fn values_are_trimmed() {
		let config = Config::parse("device.name =  Pixel 7  \n");
		assert_eq!(config.get(keys::DEVICE_NAME, ""), "Pixel 7");
	}

	#[test]
	fn load_from_reports_missing_file_with_path() {
		let err = Config::load_from(Path::new("/definitely/missing/config.properties")).unwrap_err();
		assert!(matches!(err, ConfigError::Read { .. }));
	}

	#[test]
	fn load_from_reads_a_real_file() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("config.properties");
		fs::write(&path, "spotify.access.token=abc123\n").unwrap();

		let config = Config::load_from(&path).unwrap();
		assert_eq!(config.get(keys::SPOTIFY_ACCESS_TOKEN, ""), "abc123");
	}

	#[test]
	#[serial]
	fn env_override_wins_over_file_value() {
		let config = Config::from_pairs([(keys::BROWSER_TYPE, "chromium")]);
		unsafe { std::env::set_var("VOUCH_BROWSER_TYPE", "webkit") };
		let value = config.get(keys::BROWSER_TYPE, "chromium");
		unsafe { std::env::remove_var("VOUCH_BROWSER_TYPE") };
		assert_eq!(value, "webkit");
	}

	#[test]
	#[serial]
	fn explicit_path_env_is_preferred_by_load() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("explicit.properties");
		fs::write(&path, "platform.version=14\n").unwrap();

		unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
		let config = Config::load().unwrap();
		unsafe { std::env::remove_var(CONFIG_PATH_ENV) };
		assert_eq!(config.get(keys::PLATFORM_VERSION, "11.0"), "14");
	}
}
