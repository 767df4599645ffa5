use async_trait::async_trait;
use thiserror::Error;

use crate::event::Event;

/// Errors that can occur discovering events. All of them end the run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to fetch event listing: {0}")]
    FetchFailed(String),

    #[error("Event listing is missing {0}")]
    MissingElement(String),

    #[error("Invalid event date {value:?}: {message}")]
    InvalidDate { value: String, message: String },
}

/// The two events a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEvents {
    /// Most recent completed event.
    pub last: Event,
    /// Soonest upcoming event.
    pub next: Event,
}

/// Capability to find the last and next events.
#[async_trait]
pub trait EventDiscovery: Send + Sync {
    async fn discover(&self) -> Result<DiscoveredEvents, DiscoveryError>;
}
