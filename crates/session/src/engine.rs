//! Trait seam for the browser-automation engine.
//!
//! The engine is an external capability provider: one heavyweight process
//! that can launch browsers on demand. The harness only depends on these
//! traits; production code plugs in a real engine, tests plug in
//! [`crate::fake::FakeEngine`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Browser engine flavor selected from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrowserFlavor {
	#[default]
	Chromium,
	Firefox,
	Webkit,
}

impl BrowserFlavor {
	/// Parses a configured flavor name, case-insensitively.
	/// Unknown values fall back to chromium.
	pub fn parse(value: &str) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"firefox" => Self::Firefox,
			"webkit" => Self::Webkit,
			_ => Self::Chromium,
		}
	}
}

impl fmt::Display for BrowserFlavor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Chromium => write!(f, "chromium"),
			Self::Firefox => write!(f, "firefox"),
			Self::Webkit => write!(f, "webkit"),
		}
	}
}

/// Launch parameters for one fresh browser instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchSpec {
	pub flavor: BrowserFlavor,
	pub headless: bool,
}

/// Boots the shared engine process. Invoked at most once per factory.
#[async_trait]
pub trait WebEngineBoot: Send + Sync {
	async fn boot(&self) -> Result<std::sync::Arc<dyn WebEngine>>;
}

/// The one shared engine process. Launching a browser must never tear the
/// engine itself down.
#[async_trait]
pub trait WebEngine: Send + Sync {
	async fn launch(&self, spec: LaunchSpec) -> Result<Box<dyn BrowserHandle>>;
}

/// One browser process owned by a single session.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
	async fn new_context(&self) -> Result<Box<dyn ContextHandle>>;
	async fn close(&self) -> Result<()>;
}

/// One isolated browsing context within a browser.
#[async_trait]
pub trait ContextHandle: Send + Sync {
	async fn new_page(&self) -> Result<Box<dyn PageHandle>>;
	async fn close(&self) -> Result<()>;
}

/// Primitive page operations provided by the engine.
///
/// Every operation resolves or fails within the engine's own bounds;
/// callers add an outer timeout where the contract requires one.
#[async_trait]
pub trait PageHandle: Send + Sync {
	async fn goto(&self, url: &str) -> Result<()>;
	async fn click(&self, selector: &str) -> Result<()>;
	async fn fill(&self, selector: &str, value: &str) -> Result<()>;
	async fn text_content(&self, selector: &str) -> Result<String>;
	async fn is_visible(&self, selector: &str) -> Result<bool>;
	async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;
	async fn screenshot_png(&self) -> Result<Vec<u8>>;
	async fn close(&self) -> Result<()>;
}
