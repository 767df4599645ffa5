//! Discovery of the most recent and next scheduled events.

mod sherdog;
mod types;

pub use sherdog::{normalize_event_name, parse_listing, SherdogDiscovery};
pub use types::{DiscoveredEvents, DiscoveryError, EventDiscovery};
