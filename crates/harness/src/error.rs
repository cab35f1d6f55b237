use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
	#[error("test data file not found: {name}")]
	DataNotFound { name: String },

	#[error("failed to read test data {path}: {source}")]
	DataRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse test data {path}: {source}")]
	DataParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Config(#[from] vouch_config::ConfigError),

	#[error(transparent)]
	Session(#[from] vouch_session::SessionError),
}
