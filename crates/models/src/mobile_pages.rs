//! Screen objects for the mobile demo application.
//!
//! Locators are expressed in the device automation backend's XPath dialect.

use vouch_session::error::Result;

use crate::surface::MobileScreen;

/// Mobile app login screen.
pub struct MobileLoginPage {
	screen: MobileScreen,
}

impl MobileLoginPage {
	const USERNAME_FIELD: &'static str =
		"//android.widget.EditText[@content-desc='Username input field']";
	const PASSWORD_FIELD: &'static str =
		"//android.widget.EditText[@content-desc='Password input field']";
	const LOGIN_BUTTON: &'static str = "//android.view.ViewGroup[@content-desc='Login button']";
	const ERROR_MESSAGE: &'static str =
		"//android.widget.TextView[@text='Provided credentials do not match any user in this service.']";

	pub fn new(screen: MobileScreen) -> Self {
		Self { screen }
	}

	pub async fn login(&self, username: &str, password: &str) -> Result<()> {
		self.screen.send_keys(Self::USERNAME_FIELD, username).await?;
		self.screen.send_keys(Self::PASSWORD_FIELD, password).await?;
		self.screen.click(Self::LOGIN_BUTTON).await
	}

	pub async fn error_message(&self) -> Option<String> {
		if self.screen.is_displayed(Self::ERROR_MESSAGE).await {
			self.screen.read_text(Self::ERROR_MESSAGE).await.ok()
		} else {
			None
		}
	}

	pub async fn is_displayed(&self) -> bool {
		self.screen.is_displayed(Self::USERNAME_FIELD).await
			&& self.screen.is_displayed(Self::PASSWORD_FIELD).await
			&& self.screen.is_displayed(Self::LOGIN_BUTTON).await
	}
}

/// Mobile app products (catalog) screen.
pub struct MobileProductsPage {
	screen: MobileScreen,
}

impl MobileProductsPage {
	const PRODUCTS_TITLE: &'static str = "//android.widget.TextView[@text='Products']";
	const CATALOG_OPTION: &'static str = "//android.widget.TextView[@text='Catalog']";
	const FIRST_PRODUCT: &'static str =
		"(//android.view.ViewGroup[@content-desc='store item'])[1]";
	const ADD_TO_CART_BUTTON: &'static str =
		"//android.view.ViewGroup[@content-desc='Add To Cart button']";
	const CART_ICON: &'static str = "//android.view.ViewGroup[@content-desc='cart badge']";
	const MENU_BUTTON: &'static str = "//android.view.ViewGroup[@content-desc='open menu']";
	const LOGOUT_BUTTON: &'static str =
		"//android.view.ViewGroup[@content-desc='menu item log out']";
	const LOGOUT_CONFIRMATION_BUTTON: &'static str = "//android.widget.Button[@text='LOG OUT']";
	const OK_BUTTON: &'static str = "//android.widget.Button[@text='OK']";

	pub fn new(screen: MobileScreen) -> Self {
		Self { screen }
	}

	pub async fn open_catalog(&self) -> Result<()> {
		self.screen.click(Self::MENU_BUTTON).await?;
		self.screen.click(Self::CATALOG_OPTION).await
	}

	pub async fn is_displayed(&self) -> bool {
		if self.screen.wait_for(Self::PRODUCTS_TITLE).await.is_err() {
			return false;
		}
		self.screen.is_displayed(Self::PRODUCTS_TITLE).await
	}

	pub async fn select_first_product(&self) -> Result<()> {
		self.screen.click(Self::FIRST_PRODUCT).await
	}

	pub async fn is_add_to_cart_displayed(&self) -> bool {
		if self.screen.wait_for(Self::ADD_TO_CART_BUTTON).await.is_err() {
			return false;
		}
		self.screen.is_displayed(Self::ADD_TO_CART_BUTTON).await
	}

	pub async fn add_to_cart(&self) -> Result<()> {
		self.screen.click(Self::ADD_TO_CART_BUTTON).await
	}

	pub async fn open_cart(&self) -> Result<()> {
		self.screen.click(Self::CART_ICON).await
	}

	pub async fn is_cart_icon_displayed(&self) -> bool {
		self.screen.is_displayed(Self::CART_ICON).await
	}

	pub async fn logout(&self) -> Result<()> {
		self.screen.click(Self::MENU_BUTTON).await?;
		self.screen.wait_for(Self::LOGOUT_BUTTON).await?;
		self.screen.click(Self::LOGOUT_BUTTON).await?;
		self.screen.click(Self::LOGOUT_CONFIRMATION_BUTTON).await?;
		self.screen.click(Self::OK_BUTTON).await
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use vouch_session::fake::{FakeBackend, FakeState};
	use vouch_session::mobile::{DeviceCaps, MobileBackend};
	use vouch_config::Config;

	use super::*;

	async fn screen(state: &Arc<FakeState>) -> MobileScreen {
		let backend = FakeBackend::new(Arc::clone(state));
		let caps = DeviceCaps::from_config(&Config::default()).unwrap();
		MobileScreen::new(backend.connect(&caps).await.unwrap())
	}

	#[tokio::test]
	async fn login_sends_keys_then_taps() {
		let state = FakeState::new();
		state.set_element(MobileLoginPage::USERNAME_FIELD, "", true);
		state.set_element(MobileLoginPage::PASSWORD_FIELD, "", true);
		state.set_element(MobileLoginPage::LOGIN_BUTTON, "", true);

		let login = MobileLoginPage::new(screen(&state).await);
		login.login("standard_user", "secret_sauce").await.unwrap();

		let actions = state.actions();
		assert!(actions[1].starts_with("send_keys //android.widget.EditText[@content-desc='Username input field']"));
		assert!(actions.last().unwrap().starts_with("click //android.view.ViewGroup[@content-desc='Login button']"));
	}

	#[tokio::test]
	async fn products_display_check_is_false_without_title() {
		let state = FakeState::new();
		let products = MobileProductsPage::new(screen(&state).await);
		assert!(!products.is_displayed().await);
	}

	#[tokio::test]
	async fn logout_walks_the_confirmation_dialog() {
		let state = FakeState::new();
		for locator in [
			MobileProductsPage::MENU_BUTTON,
			MobileProductsPage::LOGOUT_BUTTON,
			MobileProductsPage::LOGOUT_CONFIRMATION_BUTTON,
			MobileProductsPage::OK_BUTTON,
		] {
			state.set_element(locator, "", true);
		}

		let products = MobileProductsPage::new(screen(&state).await);
		products.logout().await.unwrap();

		let clicks: Vec<_> = state.actions().into_iter().filter(|a| a.starts_with("click")).collect();
		assert_eq!(clicks.len(), 4);
		assert!(clicks.last().unwrap().ends_with("[@text='OK']"));
	}
}
