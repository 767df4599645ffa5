//! Event store trait and types.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::event::Event;

/// All known events keyed by URL.
pub type EventMap = BTreeMap<String, Event>;

/// Errors that can occur reading or writing the event store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read event store {path}: {message}")]
    Read { path: String, message: String },

    #[error("Event store {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Failed to write event store {path}: {message}")]
    Write { path: String, message: String },
}

/// Durable mapping from event URL to event descriptor.
pub trait EventStore: Send + Sync {
    /// Read every stored event. A store that does not exist yet is empty.
    fn load(&self) -> Result<EventMap, StoreError>;

    /// Replace the stored contents with `events`.
    fn save(&self, events: &EventMap) -> Result<(), StoreError>;
}
