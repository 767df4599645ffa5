//! Durable event progress.
//!
//! The store is a whole-file snapshot: it is read completely at the start of an
//! orchestration run and rewritten completely at the end. There is no locking.

mod json_store;
mod types;

pub use json_store::JsonEventStore;
pub use types::{EventMap, EventStore, StoreError};
