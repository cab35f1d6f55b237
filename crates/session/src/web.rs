//! Web session acquisition and teardown.
//!
//! One shared engine process serves the whole test run; every test gets a
//! fresh browser + isolated context + page so tests cannot leak state into
//! each other. Teardown is an ordered best-effort cascade.

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::OnceCell;
use tracing::{debug, info};
use vouch_config::{Config, keys};

use crate::engine::{BrowserFlavor, BrowserHandle, ContextHandle, LaunchSpec, PageHandle, WebEngine, WebEngineBoot};
use crate::error::{Result, SessionError};
use crate::teardown::TeardownReport;

/// Produces fresh, isolated web sessions over one shared engine process.
pub struct WebSessionFactory {
	config: Arc<Config>,
	boot: Arc<dyn WebEngineBoot>,
	engine: OnceCell<Arc<dyn WebEngine>>,
}

impl WebSessionFactory {
	pub fn new(config: Arc<Config>, boot: Arc<dyn WebEngineBoot>) -> Self {
		Self {
			config,
			boot,
			engine: OnceCell::new(),
		}
	}

	/// Returns the shared engine, booting it on first use.
	///
	/// Concurrent first callers race into the cell; the boot runs at most
	/// once and every caller observes the same instance.
	pub async fn engine(&self) -> Result<Arc<dyn WebEngine>> {
		let engine = self
			.engine
			.get_or_try_init(|| async {
				info!("booting web engine");
				self.boot.boot().await
			})
			.await?;
		Ok(Arc::clone(engine))
	}

	/// Launch parameters resolved from configuration.
	pub fn launch_spec(&self) -> LaunchSpec {
		let flavor = BrowserFlavor::parse(&self.config.get(keys::BROWSER_TYPE, "chromium"));
		let headless = self.config.get_bool(keys::BROWSER_HEADLESS, false);
		LaunchSpec { flavor, headless }
	}

	/// Creates a fresh browser + context + page for one test.
	///
	/// A failure partway through closes whatever was already acquired
	/// before the error is returned.
	pub async fn session(&self) -> Result<WebSession> {
		let engine = self.engine().await?;
		let spec = self.launch_spec();
		debug!(flavor = %spec.flavor, headless = spec.headless, "launching browser");

		let browser = engine.launch(spec).await?;
		let context = match browser.new_context().await {
			Ok(context) => context,
			Err(err) => {
				let mut report = TeardownReport::default();
				report.release("browser", browser.close().await);
				report.log();
				return Err(err);
			}
		};
		let page = match context.new_page().await {
			Ok(page) => page,
			Err(err) => {
				let mut report = TeardownReport::default();
				report.release("context", context.close().await);
				report.release("browser", browser.close().await);
				report.log();
				return Err(err);
			}
		};

		info!(flavor = %spec.flavor, "web session ready");
		Ok(WebSession {
			browser: Some(browser),
			context: Some(context),
			page: Some(page),
			spec,
			created_at: SystemTime::now(),
		})
	}
}

/// One live browser tab bound to its own browser process and context.
///
/// The session is the sole owner of its handles; dropping it without
/// calling [`WebSession::close`] leaks the browser to the engine.
pub struct WebSession {
	browser: Option<Box<dyn BrowserHandle>>,
	context: Option<Box<dyn ContextHandle>>,
	page: Option<Box<dyn PageHandle>>,
	spec: LaunchSpec,
	created_at: SystemTime,
}

impl std::fmt::Debug for WebSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WebSession")
			.field("spec", &self.spec)
			.field("created_at", &self.created_at)
			.field("open", &self.page.is_some())
			.finish_non_exhaustive()
	}
}

impl WebSession {
	/// Returns the live page handle, or [`SessionError::SessionClosed`]
	/// after teardown.
	pub fn page(&self) -> Result<&dyn PageHandle> {
		self.page.as_deref().ok_or(SessionError::SessionClosed)
	}

	pub fn is_open(&self) -> bool {
		self.page.is_some()
	}

	/// The launch parameters this session was created with.
	pub fn launch_spec(&self) -> LaunchSpec {
		self.spec
	}

	pub fn created_at(&self) -> SystemTime {
		self.created_at
	}

	/// Releases page, context, and browser in order.
	///
	/// Every release is attempted regardless of earlier outcomes; failures
	/// are collected into the report and logged, never returned as an
	/// error. Calling this twice, or on a partially initialized session,
	/// releases only what is still held.
	pub async fn close(&mut self) -> TeardownReport {
		let mut report = TeardownReport::default();
		if let Some(page) = self.page.take() {
			report.release("page", page.close().await);
		}
		if let Some(context) = self.context.take() {
			report.release("context", context.close().await);
		}
		if let Some(browser) = self.browser.take() {
			report.release("browser", browser.close().await);
		}
		report.log();
		report
	}
}
