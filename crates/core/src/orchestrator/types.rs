//! Types for the download orchestrator.

use serde::Serialize;
use thiserror::Error;

use crate::event::{Event, Segment};

/// Errors that abort orchestration of an event.
///
/// Indexer, resolution, submission and notification failures are not here:
/// they are recorded per segment in [`SegmentOutcome`].
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Event store error.
    #[error("event store error: {0}")]
    Store(#[from] crate::store::StoreError),
}

/// What happened to one segment during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SegmentOutcome {
    /// Flag was already set; nothing attempted.
    AlreadyDownloaded,
    /// Submitted to the download client and flagged as downloaded.
    Submitted {
        title: String,
        hash: String,
        /// False when the notification could not be delivered.
        notified: bool,
    },
    /// No candidate matched, or none resolved to a magnet link.
    NotFound,
    /// The indexer query failed, so no candidates were considered.
    QueryFailed { error: String },
    /// The download client refused or could not be reached.
    SubmissionFailed { error: String },
}

impl SegmentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentOutcome::AlreadyDownloaded => "already_downloaded",
            SegmentOutcome::Submitted { .. } => "submitted",
            SegmentOutcome::NotFound => "not_found",
            SegmentOutcome::QueryFailed { .. } => "query_failed",
            SegmentOutcome::SubmissionFailed { .. } => "submission_failed",
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SegmentOutcome::Submitted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub segment: Segment,
    pub outcome: SegmentOutcome,
}

/// Result of processing one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// The event as persisted at the end of the run.
    pub event: Event,
    /// True when the event was already complete and nothing was done.
    pub skipped: bool,
    /// One entry per segment, in processing order. Empty when skipped.
    pub segments: Vec<SegmentReport>,
}

impl ProcessReport {
    pub fn skipped(event: Event) -> Self {
        Self {
            event,
            skipped: true,
            segments: Vec::new(),
        }
    }

    pub fn outcome(&self, segment: Segment) -> Option<&SegmentOutcome> {
        self.segments
            .iter()
            .find(|r| r.segment == segment)
            .map(|r| &r.outcome)
    }

    /// Number of segments submitted in this run.
    pub fn submitted_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|r| r.outcome.is_submitted())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn event() -> Event {
        Event::new(
            "e1",
            "ufc 300",
            DateTime::parse_from_rfc3339("2024-04-13T18:00:00-07:00").unwrap(),
        )
    }

    #[test]
    fn test_skipped_report() {
        let report = ProcessReport::skipped(event());
        assert!(report.skipped);
        assert!(report.segments.is_empty());
        assert_eq!(report.submitted_count(), 0);
        assert!(report.outcome(Segment::MainCard).is_none());
    }

    #[test]
    fn test_outcome_lookup_and_count() {
        let report = ProcessReport {
            event: event(),
            skipped: false,
            segments: vec![
                SegmentReport {
                    segment: Segment::EarlyPrelims,
                    outcome: SegmentOutcome::NotFound,
                },
                SegmentReport {
                    segment: Segment::Prelims,
                    outcome: SegmentOutcome::Submitted {
                        title: "ufc 300 1080p prelims".to_string(),
                        hash: "def".to_string(),
                        notified: true,
                    },
                },
            ],
        };
        assert_eq!(report.submitted_count(), 1);
        assert_eq!(
            report.outcome(Segment::EarlyPrelims),
            Some(&SegmentOutcome::NotFound)
        );
        assert!(report.outcome(Segment::MainCard).is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&SegmentOutcome::QueryFailed {
            error: "Request timeout".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"outcome":"query_failed","error":"Request timeout"}"#);
        assert_eq!(SegmentOutcome::NotFound.as_str(), "not_found");
    }

    #[test]
    fn test_report_serialization() {
        let report = ProcessReport {
            event: event(),
            skipped: false,
            segments: vec![SegmentReport {
                segment: Segment::MainCard,
                outcome: SegmentOutcome::NotFound,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["event"]["name"], "ufc 300");
        assert_eq!(json["segments"][0]["segment"], "main_card");
        assert_eq!(json["segments"][0]["outcome"]["outcome"], "not_found");
    }

    #[test]
    fn test_error_display() {
        let err = OrchestratorError::from(crate::store::StoreError::Write {
            path: "/data/events.json".to_string(),
            message: "disk full".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "event store error: Failed to write event store /data/events.json: disk full"
        );
    }
}
