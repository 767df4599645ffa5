//! Testing utilities and mock implementations.
//!
//! Every external capability the orchestrator depends on has an in-memory
//! double here, so a full run can be exercised without an indexer, a
//! download client or a notification service.
//!
//! # Example
//!
//! ```rust,ignore
//! use cagefetch_core::testing::{fixtures, MockSearcher, MockTorrentClient};
//!
//! let searcher = MockSearcher::new();
//! searcher.set_results(fixtures::ufc_300_pool()).await;
//!
//! let torrent_client = MockTorrentClient::new();
//! // ... run the orchestrator ...
//! assert_eq!(torrent_client.added_torrents().await.len(), 3);
//! ```

mod mock_event_store;
mod mock_notifier;
mod mock_resolver;
mod mock_searcher;
mod mock_torrent_client;

pub use mock_event_store::MockEventStore;
pub use mock_notifier::MockNotifier;
pub use mock_resolver::MockResolver;
pub use mock_searcher::{MockSearcher, RecordedSearch};
pub use mock_torrent_client::{MockTorrentClient, RecordedAddTorrent};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::DateTime;

    use crate::event::Event;
    use crate::searcher::Candidate;

    /// An event with nothing downloaded, dated 2024-04-13.
    pub fn event(url: &str, name: &str) -> Event {
        let date = DateTime::parse_from_rfc3339("2024-04-13T18:00:00-07:00")
            .expect("fixture date is valid RFC 3339");
        Event::new(url, name, date)
    }

    /// A candidate with the given locator.
    pub fn candidate(id: &str, title: &str, seeders: u32, locator: &str) -> Candidate {
        Candidate::new(id, title, seeders, locator)
    }

    /// One matching candidate per segment of "ufc 300", each with a direct magnet link.
    pub fn ufc_300_pool() -> Vec<Candidate> {
        vec![
            candidate("ep", "ufc 300 1080p early prelims", 10, "magnet:?xt=abc"),
            candidate("p", "ufc 300 1080p prelims", 20, "magnet:?xt=def"),
            candidate("m", "ufc 300 1080p", 30, "magnet:?xt=ghi"),
        ]
    }
}
