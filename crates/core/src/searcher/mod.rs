//! Torrent search abstraction.
//!
//! This module provides a `Searcher` trait for querying a torrent indexer for
//! all releases of one event, plus the Prowlarr implementation.

mod prowlarr;
mod types;

pub use prowlarr::ProwlarrSearcher;
pub use types::*;
