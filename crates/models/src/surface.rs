//! Session-primitive façades handed to concrete page models.
//!
//! Concrete pages are composed from these primitives rather than inheriting
//! a base page: a model holds a surface plus its own locator table and
//! nothing else.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use vouch_session::engine::PageHandle;
use vouch_session::error::{Result, SessionError};
use vouch_session::mobile::MobileDriver;

pub const DEFAULT_WEB_WAIT: Duration = Duration::from_secs(30);
pub const DEFAULT_MOBILE_WAIT: Duration = Duration::from_secs(10);

/// Web primitives over a live page handle.
#[derive(Clone, Copy)]
pub struct Surface<'a> {
	page: &'a dyn PageHandle,
}

impl<'a> Surface<'a> {
	pub fn new(page: &'a dyn PageHandle) -> Self {
		Self { page }
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		debug!(url, "navigating");
		self.page.goto(url).await
	}

	pub async fn click(&self, selector: &str) -> Result<()> {
		debug!(selector, "click");
		self.page.click(selector).await
	}

	pub async fn fill(&self, selector: &str, value: &str) -> Result<()> {
		debug!(selector, "fill");
		self.page.fill(selector, value).await
	}

	pub async fn read_text(&self, selector: &str) -> Result<String> {
		self.page.text_content(selector).await
	}

	/// Visibility checks are non-throwing by contract: any underlying
	/// lookup failure resolves to `false`.
	pub async fn is_visible(&self, selector: &str) -> bool {
		self.page.is_visible(selector).await.unwrap_or(false)
	}

	pub async fn wait_for(&self, selector: &str) -> Result<()> {
		self.wait_for_within(selector, DEFAULT_WEB_WAIT).await
	}

	/// Bounded wait; expiry surfaces as [`SessionError::Timeout`].
	/// The outer timeout also guards an engine that never resolves.
	pub async fn wait_for_within(&self, selector: &str, timeout: Duration) -> Result<()> {
		match tokio::time::timeout(timeout, self.page.wait_for_selector(selector, timeout)).await {
			Ok(result) => result,
			Err(_) => Err(SessionError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: selector.to_string(),
			}),
		}
	}

	pub async fn screenshot_png(&self) -> Result<Vec<u8>> {
		self.page.screenshot_png().await
	}
}

/// Mobile primitives over the shared driver handle.
#[derive(Clone)]
pub struct MobileScreen {
	driver: Arc<dyn MobileDriver>,
}

impl MobileScreen {
	pub fn new(driver: Arc<dyn MobileDriver>) -> Self {
		Self { driver }
	}

	pub async fn click(&self, locator: &str) -> Result<()> {
		debug!(locator, "click");
		self.driver.click(locator).await
	}

	pub async fn send_keys(&self, locator: &str, text: &str) -> Result<()> {
		debug!(locator, "send keys");
		self.driver.send_keys(locator, text).await
	}

	pub async fn read_text(&self, locator: &str) -> Result<String> {
		self.driver.text(locator).await
	}

	/// Non-throwing, like [`Surface::is_visible`].
	pub async fn is_displayed(&self, locator: &str) -> bool {
		self.driver.is_displayed(locator).await.unwrap_or(false)
	}

	pub async fn wait_for(&self, locator: &str) -> Result<()> {
		self.wait_for_within(locator, DEFAULT_MOBILE_WAIT).await
	}

	pub async fn wait_for_within(&self, locator: &str, timeout: Duration) -> Result<()> {
		match tokio::time::timeout(timeout, self.driver.wait_for(locator, timeout)).await {
			Ok(result) => result,
			Err(_) => Err(SessionError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: locator.to_string(),
			}),
		}
	}

	pub async fn back(&self) -> Result<()> {
		self.driver.back().await
	}
}
