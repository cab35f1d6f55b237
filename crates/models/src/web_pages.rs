//! Page objects for the Sauce Demo web application.

use std::time::Duration;

use tracing::warn;
use vouch_session::error::Result;

use crate::surface::Surface;

const LOGIN_URL: &str = "https://www.saucedemo.com/v1/";

/// Sauce Demo login screen.
pub struct LoginPage<'a> {
	surface: Surface<'a>,
}

impl<'a> LoginPage<'a> {
	const USERNAME_INPUT: &'static str = "#user-name";
	const PASSWORD_INPUT: &'static str = "#password";
	const LOGIN_BUTTON: &'static str = "#login-button";
	const ERROR_MESSAGE: &'static str = "[data-test='error']";

	pub fn new(surface: Surface<'a>) -> Self {
		Self { surface }
	}

	pub async fn open(&self) -> Result<()> {
		self.surface.navigate(LOGIN_URL).await
	}

	pub async fn login(&self, username: &str, password: &str) -> Result<()> {
		self.surface.fill(Self::USERNAME_INPUT, username).await?;
		self.surface.fill(Self::PASSWORD_INPUT, password).await?;
		self.surface.click(Self::LOGIN_BUTTON).await
	}

	/// The error banner text, when one is shown.
	pub async fn error_message(&self) -> Option<String> {
		if self.surface.is_visible(Self::ERROR_MESSAGE).await {
			self.surface.read_text(Self::ERROR_MESSAGE).await.ok()
		} else {
			None
		}
	}

	pub async fn is_displayed(&self) -> bool {
		self.surface.is_visible(Self::USERNAME_INPUT).await
			&& self.surface.is_visible(Self::PASSWORD_INPUT).await
			&& self.surface.is_visible(Self::LOGIN_BUTTON).await
	}
}

/// Sauce Demo products (inventory) screen.
pub struct ProductsPage<'a> {
	surface: Surface<'a>,
}

impl<'a> ProductsPage<'a> {
	const PRODUCTS_TITLE: &'static str = ".product_label";
	const PRODUCTS_CONTAINER: &'static str = ".inventory_list";
	const PRODUCT_ITEM: &'static str = ".inventory_item";
	const ADD_TO_CART_BUTTON: &'static str = "button[class*='btn_inventory']";
	const SHOPPING_CART_ICON: &'static str = ".shopping_cart_link";
	const MENU_BUTTON: &'static str = "#react-burger-menu-btn";
	const LOGOUT_LINK: &'static str = "#logout_sidebar_link";

	const DISPLAY_WAIT: Duration = Duration::from_secs(10);

	pub fn new(surface: Surface<'a>) -> Self {
		Self { surface }
	}

	/// Tries the title, container, and item selectors in turn; any hit
	/// means the products screen is up.
	pub async fn is_displayed(&self) -> bool {
		for selector in [Self::PRODUCTS_TITLE, Self::PRODUCTS_CONTAINER, Self::PRODUCT_ITEM] {
			if self.surface.wait_for_within(selector, Self::DISPLAY_WAIT).await.is_ok() {
				return self.surface.is_visible(selector).await;
			}
		}
		warn!("products page not found");
		false
	}

	pub async fn title(&self) -> Result<String> {
		self.surface.read_text(Self::PRODUCTS_TITLE).await
	}

	pub async fn add_first_product_to_cart(&self) -> Result<()> {
		self.surface
			.click(&format!("{}:first-of-type", Self::ADD_TO_CART_BUTTON))
			.await
	}

	pub async fn open_cart(&self) -> Result<()> {
		self.surface.click(Self::SHOPPING_CART_ICON).await
	}

	pub async fn logout(&self) -> Result<()> {
		self.surface.click(Self::MENU_BUTTON).await?;
		self.surface.wait_for(Self::LOGOUT_LINK).await?;
		self.surface.click(Self::LOGOUT_LINK).await
	}
}

#[cfg(test)]
mod tests {
	use vouch_session::fake::{FakePage, FakeState};

	use super::*;

	#[tokio::test]
	async fn login_fills_credentials_then_clicks() {
		let state = FakeState::new();
		state.set_element("#user-name", "", true);
		state.set_element("#password", "", true);
		state.set_element("#login-button", "", true);
		let page = FakePage::new(std::sync::Arc::clone(&state));

		let login = LoginPage::new(Surface::new(&page));
		login.open().await.unwrap();
		login.login("standard_user", "secret_sauce").await.unwrap();

		assert_eq!(
			state.actions(),
			[
				"goto https://www.saucedemo.com/v1/",
				"fill #user-name=standard_user",
				"fill #password=secret_sauce",
				"click #login-button",
			]
		);
	}

	#[tokio::test]
	async fn error_message_is_none_when_banner_absent() {
		let state = FakeState::new();
		let page = FakePage::new(state);
		let login = LoginPage::new(Surface::new(&page));
		assert_eq!(login.error_message().await, None);
	}

	#[tokio::test]
	async fn error_message_reads_visible_banner() {
		let state = FakeState::new();
		state.set_element("[data-test='error']", "Username is required", true);
		let page = FakePage::new(state);
		let login = LoginPage::new(Surface::new(&page));
		assert_eq!(login.error_message().await.as_deref(), Some("Username is required"));
	}

	#[tokio::test]
	async fn products_display_check_falls_back_through_selectors() {
		let state = FakeState::new();
		// Only the bare item selector is present; title and container miss.
		state.set_element(".inventory_item", "item", true);
		let page = FakePage::new(state);
		let products = ProductsPage::new(Surface::new(&page));
		assert!(products.is_displayed().await);
	}

	#[tokio::test]
	async fn products_display_check_is_false_when_nothing_matches() {
		let state = FakeState::new();
		let page = FakePage::new(state);
		let products = ProductsPage::new(Surface::new(&page));
		assert!(!products.is_displayed().await);
	}

	#[tokio::test]
	async fn logout_opens_menu_and_waits_for_link() {
		let state = FakeState::new();
		state.set_element("#react-burger-menu-btn", "", true);
		state.set_element("#logout_sidebar_link", "", true);
		let page = FakePage::new(std::sync::Arc::clone(&state));

		let products = ProductsPage::new(Surface::new(&page));
		products.logout().await.unwrap();

		assert_eq!(
			state.actions(),
			["click #react-burger-menu-btn", "click #logout_sidebar_link"]
		);
	}
}
