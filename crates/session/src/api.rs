//! API session variant: an authenticated HTTP client facade.
//!
//! The session is built once per client instance. An empty access token is
//! logged at construction and raised as [`SessionError::TokenMissing`] at
//! the first authenticated call, before any network I/O.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;
use vouch_config::{Config, keys};

use crate::error::{Result, SessionError};

pub const DEFAULT_SPOTIFY_BASE_URI: &str = "https://api.spotify.com/v1";

/// Raw response surface: status plus the unmodified body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
	pub status: u16,
	pub body: String,
}

impl ApiResponse {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Parses the body as JSON.
	pub fn json(&self) -> Result<Value> {
		Ok(serde_json::from_str(&self.body)?)
	}
}

/// HTTP client bound to one base URI with bearer-token auth.
#[derive(Debug)]
pub struct ApiSession {
	client: reqwest::Client,
	base: Url,
	token: String,
}

impl ApiSession {
	/// Builds a session from configuration.
	pub fn new(config: &Config) -> Result<Self> {
		let base = config.get(keys::SPOTIFY_BASE_URI, DEFAULT_SPOTIFY_BASE_URI);
		let token = config.get(keys::SPOTIFY_ACCESS_TOKEN, "");
		Self::with_base(&base, &token)
	}

	/// Builds a session against an explicit base URI. Tests point this at a
	/// mock server.
	pub fn with_base(base: &str, token: &str) -> Result<Self> {
		let base = Url::parse(base).map_err(|source| SessionError::InvalidEndpoint {
			url: base.to_string(),
			source,
		})?;

		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		let client = reqwest::Client::builder().default_headers(headers).build()?;

		let token = token.trim().to_string();
		if token.is_empty() {
			error!("spotify access token not configured or empty");
		} else {
			info!(token_len = token.len(), "access token configured");
		}

		Ok(Self { client, base, token })
	}

	/// Returns the bearer token, or [`SessionError::TokenMissing`] when none
	/// is configured. Every authenticated primitive calls this first.
	fn bearer(&self) -> Result<&str> {
		if self.token.is_empty() {
			return Err(SessionError::TokenMissing);
		}
		Ok(&self.token)
	}

	/// Resolves `path` against the base URI, appending `query` pairs in
	/// caller order.
	pub(crate) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Url {
		let mut url = self.base.clone();
		let joined = format!(
			"{}/{}",
			url.path().trim_end_matches('/'),
			path.trim_start_matches('/')
		);
		url.set_path(&joined);
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter().copied());
		}
		url
	}

	pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
		let token = self.bearer()?.to_string();
		let url = self.endpoint(path, query);
		debug!(%url, "GET");
		let response = self.client.get(url).bearer_auth(token).send().await?;
		Self::read(response).await
	}

	pub async fn put(&self, path: &str, query: &[(&str, &str)], body: Option<&Value>) -> Result<ApiResponse> {
		let token = self.bearer()?.to_string();
		let url = self.endpoint(path, query);
		debug!(%url, "PUT");
		let mut request = self.client.put(url).bearer_auth(token);
		if let Some(body) = body {
			request = request.json(body);
		}
		Self::read(request.send().await?).await
	}

	pub async fn post(&self, path: &str, query: &[(&str, &str)], body: Option<&Value>) -> Result<ApiResponse> {
		let token = self.bearer()?.to_string();
		let url = self.endpoint(path, query);
		debug!(%url, "POST");
		let mut request = self.client.post(url).bearer_auth(token);
		if let Some(body) = body {
			request = request.json(body);
		}
		Self::read(request.send().await?).await
	}

	pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
		let token = self.bearer()?.to_string();
		let url = self.endpoint(path, query);
		debug!(%url, "DELETE");
		let response = self.client.delete(url).bearer_auth(token).send().await?;
		Self::read(response).await
	}

	async fn read(response: reqwest::Response) -> Result<ApiResponse> {
		let status = response.status().as_u16();
		let body = response.text().await?;
		if status >= 400 {
			warn!(status, body = %body, "error response");
		}
		Ok(ApiResponse { status, body })
	}
}
