//! In-memory event store for testing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::event::Event;
use crate::store::{EventMap, EventStore, StoreError};

/// Mock implementation of the EventStore trait.
///
/// Keeps events in memory and counts loads and saves.
#[derive(Debug, Default)]
pub struct MockEventStore {
    events: Mutex<EventMap>,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
}

impl MockEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an event.
    pub fn insert(&self, event: Event) {
        self.lock().insert(event.url.clone(), event);
    }

    /// Get the stored event for `url`.
    pub fn get(&self, url: &str) -> Option<Event> {
        self.lock().get(url).cloned()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EventMap> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventStore for MockEventStore {
    fn load(&self) -> Result<EventMap, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt {
                path: "<memory>".to_string(),
                message: "mock load failure".to_string(),
            });
        }
        Ok(self.lock().clone())
    }

    fn save(&self, events: &EventMap) -> Result<(), StoreError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                path: "<memory>".to_string(),
                message: "mock save failure".to_string(),
            });
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.lock() = events.clone();
        Ok(())
    }
}
