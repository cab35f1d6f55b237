//! Mobile session variant: device driver acquisition over a backend seam.
//!
//! The backend (an external device-automation server) is opaque; the
//! harness owns capability resolution, the lazy driver singleton, and the
//! quit-and-clear teardown that lets a later acquire re-initialize cleanly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;
use vouch_config::{Config, keys};

use crate::error::{Result, SessionError};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4723";
const IMPLICIT_WAIT: Duration = Duration::from_secs(10);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// How the app under test is identified on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppIdentity {
	/// Packaged binary installed from a path on disk.
	Binary(String),
	/// Already-installed package plus launch activity.
	Installed { package: String, activity: String },
}

/// Capabilities used to start one device session.
#[derive(Debug, Clone)]
pub struct DeviceCaps {
	pub server_url: Url,
	pub platform_name: String,
	pub device_name: String,
	pub platform_version: String,
	pub automation_name: String,
	pub app: AppIdentity,
	pub no_reset: bool,
	pub full_reset: bool,
	pub implicit_wait: Duration,
	pub command_timeout: Duration,
}

impl DeviceCaps {
	/// Resolves capabilities from configuration.
	///
	/// An empty `app.path` falls back to the installed package+activity
	/// identity.
	pub fn from_config(config: &Config) -> Result<Self> {
		let raw_url = config.get(keys::APPIUM_SERVER_URL, DEFAULT_SERVER_URL);
		let server_url = Url::parse(&raw_url).map_err(|source| SessionError::InvalidEndpoint {
			url: raw_url.clone(),
			source,
		})?;

		let app_path = config.get(keys::APP_PATH, "");
		let app = if app_path.trim().is_empty() {
			AppIdentity::Installed {
				package: config.get(keys::APP_PACKAGE, "com.saucelabs.mydemoapp.rn"),
				activity: config.get(keys::APP_ACTIVITY, ".MainActivity"),
			}
		} else {
			AppIdentity::Binary(app_path)
		};

		Ok(Self {
			server_url,
			platform_name: "Android".to_string(),
			device_name: config.get(keys::DEVICE_NAME, "Android Emulator"),
			platform_version: config.get(keys::PLATFORM_VERSION, "11.0"),
			automation_name: config.get(keys::AUTOMATION_NAME, "UiAutomator2"),
			app,
			no_reset: false,
			full_reset: false,
			implicit_wait: IMPLICIT_WAIT,
			command_timeout: COMMAND_TIMEOUT,
		})
	}
}

/// Device-automation backend (opaque capability provider).
#[async_trait]
pub trait MobileBackend: Send + Sync {
	async fn connect(&self, caps: &DeviceCaps) -> Result<Arc<dyn MobileDriver>>;
}

/// One live driver bound to a device or emulator.
#[async_trait]
pub trait MobileDriver: Send + Sync {
	async fn click(&self, locator: &str) -> Result<()>;
	async fn send_keys(&self, locator: &str, text: &str) -> Result<()>;
	async fn text(&self, locator: &str) -> Result<String>;
	async fn is_displayed(&self, locator: &str) -> Result<bool>;
	async fn wait_for(&self, locator: &str, timeout: Duration) -> Result<()>;
	async fn back(&self) -> Result<()>;
	async fn quit(&self) -> Result<()>;
}

/// Owns the one shared driver and its lazy acquisition.
pub struct MobileSessionFactory {
	config: Arc<Config>,
	backend: Arc<dyn MobileBackend>,
	driver: Mutex<Option<Arc<dyn MobileDriver>>>,
}

impl MobileSessionFactory {
	pub fn new(config: Arc<Config>, backend: Arc<dyn MobileBackend>) -> Self {
		Self {
			config,
			backend,
			driver: Mutex::new(None),
		}
	}

	/// Returns the shared driver, connecting on first access.
	///
	/// The slot is checked and filled under one lock, so concurrent first
	/// callers connect exactly once.
	pub async fn driver(&self) -> Result<Arc<dyn MobileDriver>> {
		let mut slot = self.driver.lock().await;
		if let Some(driver) = slot.as_ref() {
			return Ok(Arc::clone(driver));
		}
		let caps = DeviceCaps::from_config(&self.config)?;
		info!(server = %caps.server_url, device = %caps.device_name, "initializing mobile driver");
		let driver = self.backend.connect(&caps).await?;
		*slot = Some(Arc::clone(&driver));
		Ok(driver)
	}

	/// Quits the driver and clears the singleton.
	///
	/// Quit failures are logged and swallowed; the slot is cleared either
	/// way so the next [`Self::driver`] call re-initializes cleanly.
	/// A no-op when no driver is live.
	pub async fn quit(&self) {
		let driver = self.driver.lock().await.take();
		if let Some(driver) = driver {
			match driver.quit().await {
				Ok(()) => info!("mobile driver closed"),
				Err(err) => warn!(error = %err, "mobile driver quit failure ignored"),
			}
		}
	}
}
