use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Segment;

/// A single event and its per-segment download progress.
///
/// Serialized with the camelCase field names of the event store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Canonical event URL; also the event store key.
    pub url: String,
    /// Lower-cased, trimmed event name used as the base search query.
    pub name: String,
    /// Event start, with the offset it was published in.
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub early_prelims_downloaded: bool,
    #[serde(default)]
    pub prelims_downloaded: bool,
    #[serde(default)]
    pub main_card_downloaded: bool,
}

impl Event {
    /// Create an event with no segment downloaded yet.
    pub fn new(url: impl Into<String>, name: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            date,
            early_prelims_downloaded: false,
            prelims_downloaded: false,
            main_card_downloaded: false,
        }
    }

    pub fn is_downloaded(&self, segment: Segment) -> bool {
        match segment {
            Segment::EarlyPrelims => self.early_prelims_downloaded,
            Segment::Prelims => self.prelims_downloaded,
            Segment::MainCard => self.main_card_downloaded,
        }
    }

    /// Record a segment as handed to the download client. Flags never go back to `false`.
    pub fn mark_downloaded(&mut self, segment: Segment) {
        match segment {
            Segment::EarlyPrelims => self.early_prelims_downloaded = true,
            Segment::Prelims => self.prelims_downloaded = true,
            Segment::MainCard => self.main_card_downloaded = true,
        }
    }

    /// True once every segment has been downloaded.
    pub fn is_complete(&self) -> bool {
        Segment::ALL.iter().all(|s| self.is_downloaded(*s))
    }

    /// Segments still waiting for a download, in processing order.
    pub fn pending_segments(&self) -> Vec<Segment> {
        Segment::ALL
            .into_iter()
            .filter(|s| !self.is_downloaded(*s))
            .collect()
    }

    /// Merge a freshly discovered descriptor with what the store already knows.
    ///
    /// A stored descriptor wins outright, metadata included.
    pub fn reconcile(discovered: Event, stored: Option<&Event>) -> Event {
        match stored {
            Some(stored) => stored.clone(),
            None => discovered,
        }
    }
}
