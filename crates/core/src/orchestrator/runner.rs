//! Download orchestrator implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DownloadConfig;
use crate::discovery::DiscoveredEvents;
use crate::event::{Event, Segment};
use crate::matcher::select_best;
use crate::notifier::{Notification, Notifier};
use crate::resolver::MagnetResolver;
use crate::searcher::{Candidate, SearchQuery, Searcher};
use crate::store::EventStore;
use crate::torrent_client::{AddTorrentRequest, TorrentClient};

use super::types::{OrchestratorError, ProcessReport, SegmentOutcome, SegmentReport};

/// Drives events through matching and submission, persisting progress.
pub struct DownloadOrchestrator {
    download: DownloadConfig,
    store: Arc<dyn EventStore>,
    searcher: Arc<dyn Searcher>,
    resolver: Arc<dyn MagnetResolver>,
    torrent_client: Arc<dyn TorrentClient>,
    notifier: Arc<dyn Notifier>,
}

impl DownloadOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        download: DownloadConfig,
        store: Arc<dyn EventStore>,
        searcher: Arc<dyn Searcher>,
        resolver: Arc<dyn MagnetResolver>,
        torrent_client: Arc<dyn TorrentClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            download,
            store,
            searcher,
            resolver,
            torrent_client,
            notifier,
        }
    }

    /// Process the last event, then the next one.
    ///
    /// Stops at the first fatal error; the last event's progress is already
    /// persisted by then.
    pub async fn process_discovered(
        &self,
        events: DiscoveredEvents,
    ) -> Result<Vec<ProcessReport>, OrchestratorError> {
        let last = self.process(events.last).await?;
        let next = self.process(events.next).await?;
        Ok(vec![last, next])
    }

    /// Process a single event.
    ///
    /// Only event store failures are returned as errors. Everything else is
    /// logged and reflected in the per-segment outcomes of the report.
    pub async fn process(&self, discovered: Event) -> Result<ProcessReport, OrchestratorError> {
        let mut events = self.store.load()?;
        let mut event = Event::reconcile(discovered.clone(), events.get(&discovered.url));

        if event.is_complete() {
            info!(event = %event.name, url = %event.url, "All segments already downloaded, skipping");
            return Ok(ProcessReport::skipped(event));
        }

        info!(
            event = %event.name,
            pending = ?event.pending_segments(),
            "Processing event"
        );

        let pool = match self.searcher.search(&SearchQuery::new(&event.name)).await {
            Ok(candidates) => {
                info!(
                    event = %event.name,
                    searcher = self.searcher.name(),
                    candidates = candidates.len(),
                    "Indexer search complete"
                );
                Ok(candidates)
            }
            Err(e) => {
                warn!(
                    event = %event.name,
                    searcher = self.searcher.name(),
                    error = %e,
                    "Indexer search failed, pending segments will be retried next run"
                );
                Err(e.to_string())
            }
        };

        let mut segments = Vec::with_capacity(Segment::ALL.len());
        for segment in Segment::ALL {
            let outcome = if event.is_downloaded(segment) {
                SegmentOutcome::AlreadyDownloaded
            } else {
                match &pool {
                    Ok(candidates) => self.process_segment(&mut event, candidates, segment).await,
                    Err(error) => SegmentOutcome::QueryFailed {
                        error: error.clone(),
                    },
                }
            };
            debug!(segment = segment.as_str(), outcome = outcome.as_str(), "Segment processed");
            segments.push(SegmentReport { segment, outcome });
        }

        events.insert(event.url.clone(), event.clone());
        self.store.save(&events)?;

        Ok(ProcessReport {
            event,
            skipped: false,
            segments,
        })
    }

    /// Match, submit and notify for one pending segment.
    async fn process_segment(
        &self,
        event: &mut Event,
        candidates: &[Candidate],
        segment: Segment,
    ) -> SegmentOutcome {
        let best = select_best(&event.name, candidates, segment, self.resolver.as_ref()).await;
        let Some((candidate, magnet)) =
            best.and_then(|c| c.resolved_magnet.clone().map(|m| (c, m)))
        else {
            info!(event = %event.name, segment = segment.as_str(), "No matching torrent found");
            return SegmentOutcome::NotFound;
        };

        let request = AddTorrentRequest::magnet(magnet)
            .with_category(self.download.category.clone())
            .with_auto_tmm(self.download.auto_tmm);

        let added = match self.torrent_client.add_torrent(request).await {
            Ok(added) => added,
            Err(e) => {
                warn!(
                    event = %event.name,
                    segment = segment.as_str(),
                    client = self.torrent_client.name(),
                    error = %e,
                    "Failed to submit torrent"
                );
                return SegmentOutcome::SubmissionFailed {
                    error: e.to_string(),
                };
            }
        };

        event.mark_downloaded(segment);
        info!(
            event = %event.name,
            segment = segment.as_str(),
            title = %candidate.title,
            seeders = candidate.seeders,
            "Torrent submitted"
        );

        let notification = Notification::segment_submitted(event, segment);
        let notified = match self.notifier.notify(&notification).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    notifier = self.notifier.name(),
                    error = %e,
                    "Failed to send notification"
                );
                false
            }
        };

        SegmentOutcome::Submitted {
            title: candidate.title,
            hash: added.hash,
            notified,
        }
    }
}
