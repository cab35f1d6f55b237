//! Session lifecycle for QA automation targets.
//!
//! Three session variants share one discipline: configuration-driven
//! construction, at-most-once bootstrap of the shared engine resource, and
//! idempotent best-effort teardown that never masks a test failure.
//!
//! - [`api::ApiSession`]: an authenticated HTTP client built once per
//!   client instance.
//! - [`web::WebSessionFactory`]: one shared engine process, a fresh
//!   browser + context + page per test.
//! - [`mobile::MobileSessionFactory`]: a lazy driver singleton that a
//!   quit-and-clear teardown lets re-initialize.
//!
//! Browser and device engines are external collaborators reached through
//! the trait seams in [`engine`] and [`mobile`]; [`fake`] provides
//! hermetic in-memory implementations for tests.

pub mod api;
pub mod engine;
pub mod error;
pub mod fake;
pub mod mobile;
pub mod teardown;
pub mod web;

pub use api::{ApiResponse, ApiSession};
pub use engine::{BrowserFlavor, BrowserHandle, ContextHandle, LaunchSpec, PageHandle, WebEngine, WebEngineBoot};
pub use error::{Result, SessionError};
pub use mobile::{AppIdentity, DeviceCaps, MobileBackend, MobileDriver, MobileSessionFactory};
pub use teardown::{TeardownFailure, TeardownReport};
pub use web::{WebSession, WebSessionFactory};
