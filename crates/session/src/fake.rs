//! In-memory engine and backend fakes.
//!
//! No browser or device is spawned: element state is scripted up front and
//! every interaction is recorded, so lifecycle and page-model logic can be
//! exercised hermetically. Any stage can be made to fail by name to test
//! teardown and error paths.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::engine::{BrowserHandle, ContextHandle, LaunchSpec, PageHandle, WebEngine, WebEngineBoot};
use crate::error::{Result, SessionError};
use crate::mobile::{DeviceCaps, MobileBackend, MobileDriver};

/// Scripted state for one element.
#[derive(Debug, Clone, Default)]
pub struct ElementScript {
	pub text: String,
	pub visible: bool,
}

/// Shared scripted state backing one fake engine or backend tree.
#[derive(Debug, Default)]
pub struct FakeState {
	elements: Mutex<HashMap<String, ElementScript>>,
	actions: Mutex<Vec<String>>,
	failing_stages: Mutex<HashSet<&'static str>>,
	launches: AtomicUsize,
	last_spec: Mutex<Option<LaunchSpec>>,
}

impl FakeState {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Scripts an element: its text and whether it is visible.
	pub fn set_element(&self, selector: &str, text: &str, visible: bool) {
		self.elements.lock().insert(
			selector.to_string(),
			ElementScript {
				text: text.to_string(),
				visible,
			},
		);
	}

	pub fn remove_element(&self, selector: &str) {
		self.elements.lock().remove(selector);
	}

	/// Makes the named stage fail. Stages: `boot`, `launch`, `new_context`,
	/// `new_page`, `page.close`, `context.close`, `browser.close`,
	/// `connect`, `driver.quit`.
	pub fn fail_at(&self, stage: &'static str) {
		self.failing_stages.lock().insert(stage);
	}

	/// Everything the fakes were asked to do, in order.
	pub fn actions(&self) -> Vec<String> {
		self.actions.lock().clone()
	}

	/// Number of browsers launched from the engine.
	pub fn launch_count(&self) -> usize {
		self.launches.load(Ordering::SeqCst)
	}

	/// Spec of the most recent browser launch.
	pub fn last_spec(&self) -> Option<LaunchSpec> {
		*self.last_spec.lock()
	}

	fn record(&self, action: String) {
		self.actions.lock().push(action);
	}

	fn check(&self, stage: &'static str) -> Result<()> {
		if self.failing_stages.lock().contains(stage) {
			return Err(SessionError::engine_launch(
				stage,
				anyhow::anyhow!("scripted failure at {stage}"),
			));
		}
		Ok(())
	}

	fn element(&self, selector: &str) -> Result<ElementScript> {
		self.elements
			.lock()
			.get(selector)
			.cloned()
			.ok_or_else(|| SessionError::ElementNotFound {
				locator: selector.to_string(),
			})
	}
}

/// Boots a [`FakeEngine`]; counts boots for singleton assertions.
pub struct FakeEngineBoot {
	state: Arc<FakeState>,
	boots: AtomicUsize,
	delay: Option<Duration>,
}

impl FakeEngineBoot {
	pub fn new(state: Arc<FakeState>) -> Self {
		Self {
			state,
			boots: AtomicUsize::new(0),
			delay: None,
		}
	}

	/// Adds a boot delay to widen the first-boot race window.
	pub fn with_delay(state: Arc<FakeState>, delay: Duration) -> Self {
		Self {
			state,
			boots: AtomicUsize::new(0),
			delay: Some(delay),
		}
	}

	pub fn boot_count(&self) -> usize {
		self.boots.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl WebEngineBoot for FakeEngineBoot {
	async fn boot(&self) -> Result<Arc<dyn WebEngine>> {
		self.state.check("boot")?;
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		self.boots.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(FakeEngine {
			state: Arc::clone(&self.state),
		}))
	}
}

pub struct FakeEngine {
	state: Arc<FakeState>,
}

#[async_trait]
impl WebEngine for FakeEngine {
	async fn launch(&self, spec: LaunchSpec) -> Result<Box<dyn BrowserHandle>> {
		self.state.check("launch")?;
		let id = self.state.launches.fetch_add(1, Ordering::SeqCst);
		*self.state.last_spec.lock() = Some(spec);
		self.state.record(format!("launch {} headless={}", spec.flavor, spec.headless));
		Ok(Box::new(FakeBrowser {
			id,
			state: Arc::clone(&self.state),
			closed: AtomicBool::new(false),
		}))
	}
}

pub struct FakeBrowser {
	id: usize,
	state: Arc<FakeState>,
	closed: AtomicBool,
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
	async fn new_context(&self) -> Result<Box<dyn ContextHandle>> {
		if self.closed.load(Ordering::SeqCst) {
			return Err(SessionError::SessionClosed);
		}
		self.state.check("new_context")?;
		self.state.record(format!("browser#{}.new_context", self.id));
		Ok(Box::new(FakeContext {
			browser: self.id,
			state: Arc::clone(&self.state),
			closed: AtomicBool::new(false),
		}))
	}

	async fn close(&self) -> Result<()> {
		self.state.check("browser.close")?;
		self.closed.store(true, Ordering::SeqCst);
		self.state.record(format!("browser#{}.close", self.id));
		Ok(())
	}
}

pub struct FakeContext {
	browser: usize,
	state: Arc<FakeState>,
	closed: AtomicBool,
}

#[async_trait]
impl ContextHandle for FakeContext {
	async fn new_page(&self) -> Result<Box<dyn PageHandle>> {
		if self.closed.load(Ordering::SeqCst) {
			return Err(SessionError::SessionClosed);
		}
		self.state.check("new_page")?;
		Ok(Box::new(FakePage {
			browser: self.browser,
			state: Arc::clone(&self.state),
			closed: AtomicBool::new(false),
		}))
	}

	async fn close(&self) -> Result<()> {
		self.state.check("context.close")?;
		self.closed.store(true, Ordering::SeqCst);
		self.state.record(format!("context@browser#{}.close", self.browser));
		Ok(())
	}
}

pub struct FakePage {
	browser: usize,
	state: Arc<FakeState>,
	closed: AtomicBool,
}

impl FakePage {
	/// Standalone page over shared state, for model tests that do not need
	/// the full factory path.
	pub fn new(state: Arc<FakeState>) -> Self {
		Self {
			browser: 0,
			state,
			closed: AtomicBool::new(false),
		}
	}

	fn live(&self) -> Result<()> {
		if self.closed.load(Ordering::SeqCst) {
			return Err(SessionError::SessionClosed);
		}
		Ok(())
	}
}

#[async_trait]
impl PageHandle for FakePage {
	async fn goto(&self, url: &str) -> Result<()> {
		self.live()?;
		self.state.record(format!("goto {url}"));
		Ok(())
	}

	async fn click(&self, selector: &str) -> Result<()> {
		self.live()?;
		self.state.element(selector)?;
		self.state.record(format!("click {selector}"));
		Ok(())
	}

	async fn fill(&self, selector: &str, value: &str) -> Result<()> {
		self.live()?;
		self.state.element(selector)?;
		self.state.record(format!("fill {selector}={value}"));
		Ok(())
	}

	async fn text_content(&self, selector: &str) -> Result<String> {
		self.live()?;
		Ok(self.state.element(selector)?.text)
	}

	async fn is_visible(&self, selector: &str) -> Result<bool> {
		self.live()?;
		Ok(self.state.element(selector)?.visible)
	}

	async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
		self.live()?;
		match self.state.element(selector) {
			Ok(element) if element.visible => Ok(()),
			_ => Err(SessionError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: selector.to_string(),
			}),
		}
	}

	async fn screenshot_png(&self) -> Result<Vec<u8>> {
		self.live()?;
		self.state.record("screenshot".to_string());
		// PNG signature; enough for sink tests.
		Ok(vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'])
	}

	async fn close(&self) -> Result<()> {
		self.state.check("page.close")?;
		self.closed.store(true, Ordering::SeqCst);
		self.state.record(format!("page@browser#{}.close", self.browser));
		Ok(())
	}
}

/// Mobile backend fake; counts connects and keeps the last caps.
pub struct FakeBackend {
	state: Arc<FakeState>,
	connects: AtomicUsize,
	last_caps: Mutex<Option<DeviceCaps>>,
}

impl FakeBackend {
	pub fn new(state: Arc<FakeState>) -> Self {
		Self {
			state,
			connects: AtomicUsize::new(0),
			last_caps: Mutex::new(None),
		}
	}

	pub fn connect_count(&self) -> usize {
		self.connects.load(Ordering::SeqCst)
	}

	pub fn last_caps(&self) -> Option<DeviceCaps> {
		self.last_caps.lock().clone()
	}
}

#[async_trait]
impl MobileBackend for FakeBackend {
	async fn connect(&self, caps: &DeviceCaps) -> Result<Arc<dyn MobileDriver>> {
		self.state.check("connect")?;
		self.connects.fetch_add(1, Ordering::SeqCst);
		*self.last_caps.lock() = Some(caps.clone());
		self.state.record(format!("connect {}", caps.server_url));
		Ok(Arc::new(FakeDriver {
			state: Arc::clone(&self.state),
		}))
	}
}

pub struct FakeDriver {
	state: Arc<FakeState>,
}

#[async_trait]
impl MobileDriver for FakeDriver {
	async fn click(&self, locator: &str) -> Result<()> {
		self.state.element(locator)?;
		self.state.record(format!("click {locator}"));
		Ok(())
	}

	async fn send_keys(&self, locator: &str, text: &str) -> Result<()> {
		self.state.element(locator)?;
		self.state.record(format!("send_keys {locator}={text}"));
		Ok(())
	}

	async fn text(&self, locator: &str) -> Result<String> {
		Ok(self.state.element(locator)?.text)
	}

	async fn is_displayed(&self, locator: &str) -> Result<bool> {
		Ok(self.state.element(locator)?.visible)
	}

	async fn wait_for(&self, locator: &str, timeout: Duration) -> Result<()> {
		match self.state.element(locator) {
			Ok(element) if element.visible => Ok(()),
			_ => Err(SessionError::Timeout {
				ms: timeout.as_millis() as u64,
				condition: locator.to_string(),
			}),
		}
	}

	async fn back(&self) -> Result<()> {
		self.state.record("back".to_string());
		Ok(())
	}

	async fn quit(&self) -> Result<()> {
		self.state.check("driver.quit")?;
		self.state.record("driver.quit".to_string());
		Ok(())
	}
}
