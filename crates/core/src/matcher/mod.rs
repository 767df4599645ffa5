//! Segment matching.
//!
//! Picks the best candidate for one segment out of the pool returned for an
//! event. Matching and ranking are pure; the only effect is resolution, which
//! is attempted lazily in rank order and stops at the first success.

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::event::Segment;
use crate::resolver::MagnetResolver;
use crate::searcher::Candidate;

/// Candidates matching `segment`, ordered by seeders (descending).
///
/// The sort is stable, so equally seeded candidates keep their pool order.
pub fn rank_matches<'a>(
    event_name: &str,
    candidates: &'a [Candidate],
    segment: Segment,
) -> Vec<&'a Candidate> {
    let definition = segment.definition();
    let mut matches: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| definition.matches(event_name, &c.title))
        .collect();

    matches.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    matches
}

/// Select the best resolvable candidate for `segment`.
///
/// Returns the highest-seeded matching candidate whose locator resolves, with
/// `resolved_magnet` filled in, or `None` when nothing matches or resolves.
pub async fn select_best(
    event_name: &str,
    candidates: &[Candidate],
    segment: Segment,
    resolver: &dyn MagnetResolver,
) -> Option<Candidate> {
    let ranked = rank_matches(event_name, candidates, segment);
    debug!(
        segment = segment.as_str(),
        matches = ranked.len(),
        "Ranked candidates"
    );

    let attempts = stream::iter(ranked).filter_map(move |candidate| async move {
        match resolver.resolve(&candidate.locator).await {
            Ok(magnet) => Some(candidate.clone().with_resolved_magnet(magnet)),
            Err(e) => {
                debug!(
                    segment = segment.as_str(),
                    title = %candidate.title,
                    error = %e,
                    "Candidate did not resolve, trying next"
                );
                None
            }
        }
    });
    let mut attempts = std::pin::pin!(attempts);

    attempts.next().await
}
