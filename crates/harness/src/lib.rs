//! Process-wide context for an automation run.
//!
//! A [`Harness`] carries the loaded configuration and the session
//! factories; tests receive it explicitly instead of reaching into
//! process-global singletons. Alongside the context live the run-level
//! utilities: structured step [`report`]ing, cached JSON [`testdata`],
//! failure [`shots`], and [`logging`] setup.

use std::sync::Arc;

use tracing::info;
use vouch_config::Config;
use vouch_session::{ApiSession, MobileBackend, MobileSessionFactory, WebEngineBoot, WebSessionFactory};

pub mod error;
pub mod logging;
pub mod report;
pub mod shots;
pub mod testdata;

pub use error::{HarnessError, Result};
pub use report::{Reporter, StepRecord, StepStatus};
pub use testdata::TestDataStore;

/// Everything a test needs to acquire sessions, passed by reference.
pub struct Harness {
	config: Arc<Config>,
	web: WebSessionFactory,
	mobile: MobileSessionFactory,
}

impl Harness {
	/// Builds a context over an already-loaded configuration and the
	/// engine backends for this run.
	pub fn new(
		config: Arc<Config>,
		web_boot: Arc<dyn WebEngineBoot>,
		mobile_backend: Arc<dyn MobileBackend>,
	) -> Self {
		Self {
			web: WebSessionFactory::new(Arc::clone(&config), web_boot),
			mobile: MobileSessionFactory::new(Arc::clone(&config), mobile_backend),
			config,
		}
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Web session factory; the engine boots on first acquisition.
	pub fn web(&self) -> &WebSessionFactory {
		&self.web
	}

	/// Mobile session factory; the driver connects on first acquisition.
	pub fn mobile(&self) -> &MobileSessionFactory {
		&self.mobile
	}

	/// A fresh authenticated API session from the configured base URI and
	/// access token.
	pub fn api(&self) -> Result<ApiSession> {
		Ok(ApiSession::new(&self.config)?)
	}

	/// Releases run-wide resources held by the factories.
	///
	/// Individual web sessions are closed by their owning tests; this only
	/// quits the shared mobile driver, so a later test can reconnect.
	pub async fn shutdown(&self) {
		info!("shutting down harness");
		self.mobile.quit().await;
	}
}

#[cfg(test)]
mod tests {
	use vouch_config::Config;
	use vouch_session::fake::{FakeBackend, FakeEngineBoot, FakeState};

	use super::*;

	fn harness(pairs: &[(&str, &str)]) -> (Arc<FakeState>, Harness) {
		let state = FakeState::new();
		let config = Arc::new(Config::from_pairs(pairs.iter().copied()));
		let harness = Harness::new(
			config,
			Arc::new(FakeEngineBoot::new(Arc::clone(&state))) as Arc<dyn WebEngineBoot>,
			Arc::new(FakeBackend::new(Arc::clone(&state))) as Arc<dyn MobileBackend>,
		);
		(state, harness)
	}

	#[tokio::test]
	async fn api_session_requires_a_configured_token_at_use() {
		let (_state, harness) = harness(&[]);

		// Construction succeeds with no token; the first request fails.
		let session = harness.api().unwrap();
		let err = session.get("/me", &[]).await.unwrap_err();
		assert!(matches!(err, vouch_session::SessionError::TokenMissing));
	}

	#[tokio::test]
	async fn shutdown_quits_the_mobile_driver() {
		let (state, harness) = harness(&[]);

		harness.mobile().driver().await.unwrap();
		harness.shutdown().await;

		assert!(state.actions().iter().any(|a| a == "driver.quit"));
	}
}
