//! JSON file implementation of the event store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{EventMap, EventStore, StoreError};

/// Event store backed by a single JSON object file (`url -> event`).
#[derive(Debug, Clone)]
pub struct JsonEventStore {
    path: PathBuf,
}

impl JsonEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

impl EventStore for JsonEventStore {
    fn load(&self) -> Result<EventMap, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Event store missing, starting empty");
                return Ok(EventMap::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.display_path(),
                    message: e.to_string(),
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(EventMap::new());
        }

        let events: EventMap = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), events = events.len(), "Event store loaded");
        Ok(events)
    }

    fn save(&self, events: &EventMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(events).map_err(|e| StoreError::Write {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Write {
            path: self.display_path(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), events = events.len(), "Event store saved");
        Ok(())
    }
}
