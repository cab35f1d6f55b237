use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
	/// Fatal configuration problem detected while building a session.
	#[error("configuration error: {0}")]
	Config(String),

	/// Authenticated operation attempted without a configured credential.
	/// Raised before any network I/O happens.
	#[error("spotify access token is not configured")]
	TokenMissing,

	/// Engine or driver failed to start. Fatal to the session, never
	/// retried automatically; the original cause is attached.
	#[error("engine launch failed: {context}")]
	EngineLaunch {
		context: String,
		#[source]
		source: anyhow::Error,
	},

	/// A bounded wait elapsed. Distinguishable from a hard crash.
	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("element not found: {locator}")]
	ElementNotFound { locator: String },

	#[error("invalid endpoint: {url}")]
	InvalidEndpoint {
		url: String,
		#[source]
		source: url::ParseError,
	},

	/// Operation attempted on a session that was already torn down.
	#[error("session is closed")]
	SessionClosed,

	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl SessionError {
	/// Wraps an opaque launch failure with its context.
	pub fn engine_launch(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
		Self::EngineLaunch {
			context: context.into(),
			source: source.into(),
		}
	}
}
