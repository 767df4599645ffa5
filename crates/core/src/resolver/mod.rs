//! Turning candidate locators into magnet links.

mod http;
mod types;

pub use http::{extract_magnet_link, HttpMagnetResolver};
pub use types::{is_magnet_link, MagnetResolver, ResolveError, MAGNET_MARKER};
