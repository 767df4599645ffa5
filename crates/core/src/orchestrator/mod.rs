//! Download orchestrator.
//!
//! Drives one event at a time through load → query → per-segment
//! match/resolve/submit → persist. Runs are sequential and single-attempt:
//! a segment that fails is retried only by the next invocation.

mod runner;
mod types;

pub use runner::DownloadOrchestrator;
pub use types::{OrchestratorError, ProcessReport, SegmentOutcome, SegmentReport};
