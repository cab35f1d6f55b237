//! Lifecycle properties of the web and mobile session factories.

use std::sync::Arc;
use std::time::Duration;

use vouch_config::Config;
use vouch_session::fake::{FakeBackend, FakeEngineBoot, FakeState};
use vouch_session::{AppIdentity, BrowserFlavor, MobileBackend, MobileSessionFactory, WebEngineBoot, WebSessionFactory};

fn web_factory(config: Config, state: &Arc<FakeState>) -> (WebSessionFactory, Arc<FakeEngineBoot>) {
	let boot = Arc::new(FakeEngineBoot::new(Arc::clone(state)));
	let factory = WebSessionFactory::new(Arc::new(config), Arc::clone(&boot) as Arc<dyn WebEngineBoot>);
	(factory, boot)
}

#[tokio::test]
async fn engine_boots_at_most_once_under_concurrent_first_access() {
	let state = FakeState::new();
	let boot = Arc::new(FakeEngineBoot::with_delay(Arc::clone(&state), Duration::from_millis(10)));
	let factory = Arc::new(WebSessionFactory::new(
		Arc::new(Config::default()),
		Arc::clone(&boot) as Arc<dyn WebEngineBoot>,
	));

	let mut tasks = Vec::new();
	for _ in 0..8 {
		let factory = Arc::clone(&factory);
		tasks.push(tokio::spawn(async move { factory.session().await }));
	}
	for task in tasks {
		let mut session = task.await.unwrap().unwrap();
		session.close().await;
	}

	assert_eq!(boot.boot_count(), 1);
	assert_eq!(state.launch_count(), 8);
}

#[tokio::test]
async fn every_caller_observes_the_same_engine_instance() {
	let state = FakeState::new();
	let (factory, _boot) = web_factory(Config::default(), &state);

	let first = factory.engine().await.unwrap();
	let second = factory.engine().await.unwrap();
	assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn config_selects_flavor_case_insensitively_and_headless() {
	let state = FakeState::new();
	let config = Config::from_pairs([("browser.type", "FireFox"), ("browser.headless", "true")]);
	let (factory, _boot) = web_factory(config, &state);

	let mut session = factory.session().await.unwrap();
	assert_eq!(session.launch_spec().flavor, BrowserFlavor::Firefox);
	session.close().await;

	let spec = state.last_spec().unwrap();
	assert_eq!(spec.flavor, BrowserFlavor::Firefox);
	assert!(spec.headless);
}

#[tokio::test]
async fn sequential_sessions_are_independent() {
	let state = FakeState::new();
	state.set_element("#probe", "alive", true);
	let (factory, _boot) = web_factory(Config::default(), &state);

	let mut first = factory.session().await.unwrap();
	let second = factory.session().await.unwrap();
	assert_eq!(state.launch_count(), 2);

	let report = first.close().await;
	assert!(report.is_clean());
	assert!(!first.is_open());

	// Closing the first session must leave the second fully usable.
	assert!(second.is_open());
	let page = second.page().unwrap();
	assert_eq!(page.text_content("#probe").await.unwrap(), "alive");
}

#[tokio::test]
async fn double_close_is_a_no_op() {
	let state = FakeState::new();
	let (factory, _boot) = web_factory(Config::default(), &state);

	let mut session = factory.session().await.unwrap();
	let first = session.close().await;
	assert_eq!(first.released(), ["page", "context", "browser"]);

	let second = session.close().await;
	assert!(second.released().is_empty());
	assert!(second.is_clean());
}

#[tokio::test]
async fn close_failure_does_not_stop_the_cascade() {
	let state = FakeState::new();
	state.fail_at("page.close");
	let (factory, _boot) = web_factory(Config::default(), &state);

	let mut session = factory.session().await.unwrap();
	let report = session.close().await;

	assert_eq!(report.failures().len(), 1);
	assert_eq!(report.failures()[0].stage, "page");
	// Context and browser were still released.
	assert_eq!(report.released(), ["context", "browser"]);
	assert!(!session.is_open());
}

#[tokio::test]
async fn partial_initialization_is_cleaned_up() {
	let state = FakeState::new();
	state.fail_at("new_page");
	let (factory, _boot) = web_factory(Config::default(), &state);

	let err = factory.session().await.unwrap_err();
	assert!(err.to_string().contains("engine launch failed"));

	// Browser and context acquired before the failure were released.
	let actions = state.actions();
	assert!(actions.iter().any(|a| a.contains("context@browser#0.close")), "{actions:?}");
	assert!(actions.iter().any(|a| a.contains("browser#0.close")), "{actions:?}");
}

#[tokio::test]
async fn page_access_after_close_reports_session_closed() {
	let state = FakeState::new();
	let (factory, _boot) = web_factory(Config::default(), &state);

	let mut session = factory.session().await.unwrap();
	session.close().await;
	assert!(session.page().is_err());
}

#[tokio::test]
async fn mobile_driver_is_lazy_and_shared() {
	let state = FakeState::new();
	let backend = Arc::new(FakeBackend::new(Arc::clone(&state)));
	let factory = MobileSessionFactory::new(Arc::new(Config::default()), Arc::clone(&backend) as Arc<dyn MobileBackend>);

	assert_eq!(backend.connect_count(), 0);
	let first = factory.driver().await.unwrap();
	let second = factory.driver().await.unwrap();
	assert_eq!(backend.connect_count(), 1);
	assert!(Arc::ptr_eq(&first, &second));

	let caps = backend.last_caps().unwrap();
	assert!(matches!(caps.app, AppIdentity::Installed { .. }));
}

#[tokio::test]
async fn mobile_quit_clears_the_singleton_for_reacquisition() {
	let state = FakeState::new();
	let backend = Arc::new(FakeBackend::new(Arc::clone(&state)));
	let factory = MobileSessionFactory::new(Arc::new(Config::default()), Arc::clone(&backend) as Arc<dyn MobileBackend>);

	factory.driver().await.unwrap();
	factory.quit().await;
	factory.quit().await; // second quit is a no-op
	factory.driver().await.unwrap();

	assert_eq!(backend.connect_count(), 2);
	let quits = state.actions().iter().filter(|a| *a == "driver.quit").count();
	assert_eq!(quits, 1);
}

#[tokio::test]
async fn mobile_quit_failure_is_swallowed_and_slot_cleared() {
	let state = FakeState::new();
	state.fail_at("driver.quit");
	let backend = Arc::new(FakeBackend::new(Arc::clone(&state)));
	let factory = MobileSessionFactory::new(Arc::new(Config::default()), Arc::clone(&backend) as Arc<dyn MobileBackend>);

	factory.driver().await.unwrap();
	factory.quit().await; // must not panic or propagate
	factory.driver().await.unwrap();
	assert_eq!(backend.connect_count(), 2);
}
