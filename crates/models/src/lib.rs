//! Page and client models over session primitives.
//!
//! Models are composed, not inherited: a concrete page receives a
//! [`surface::Surface`] (or [`surface::MobileScreen`]) and owns only its
//! locator table plus intention-revealing operations. The Spotify client
//! plays the same role for the API session.

pub mod mobile_pages;
pub mod spotify;
pub mod surface;
pub mod web_pages;

pub use mobile_pages::{MobileLoginPage, MobileProductsPage};
pub use spotify::SpotifyClient;
pub use surface::{MobileScreen, Surface};
pub use web_pages::{LoginPage, ProductsPage};
