//! The three downloadable portions of an event.

use serde::Serialize;

/// One downloadable portion of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    EarlyPrelims,
    Prelims,
    MainCard,
}

/// Static matching rules for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDefinition {
    /// Human-readable label, used in notifications.
    pub label: &'static str,
    /// Tokens appended to the event name to build the required token set.
    pub search_suffix: &'static str,
    /// A title containing any of these (case-sensitive) is rejected.
    pub exclude_tokens: &'static [&'static str],
}

const EARLY_PRELIMS: SegmentDefinition = SegmentDefinition {
    label: "Early Prelims",
    search_suffix: "1080p early prelims",
    exclude_tokens: &["breakdown", "ppv", "embedded", "countdown"],
};

const PRELIMS: SegmentDefinition = SegmentDefinition {
    label: "Prelims",
    search_suffix: "1080p prelims",
    exclude_tokens: &["breakdown", "ppv", "embedded", "countdown", "early"],
};

const MAIN_CARD: SegmentDefinition = SegmentDefinition {
    label: "Main card",
    search_suffix: "1080p ",
    exclude_tokens: &["breakdown", "embedded", "countdown", "prelims"],
};

impl Segment {
    /// Processing order within a run.
    pub const ALL: [Segment; 3] = [Segment::EarlyPrelims, Segment::Prelims, Segment::MainCard];

    pub fn definition(&self) -> &'static SegmentDefinition {
        match self {
            Segment::EarlyPrelims => &EARLY_PRELIMS,
            Segment::Prelims => &PRELIMS,
            Segment::MainCard => &MAIN_CARD,
        }
    }

    pub fn label(&self) -> &'static str {
        self.definition().label
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::EarlyPrelims => "early_prelims",
            Segment::Prelims => "prelims",
            Segment::MainCard => "main_card",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl SegmentDefinition {
    /// Tokens a candidate title must contain, in order.
    pub fn required_tokens<'a>(&'a self, event_name: &'a str) -> Vec<&'a str> {
        event_name
            .split_whitespace()
            .chain(self.search_suffix.split_whitespace())
            .collect()
    }

    /// Whether a title carries every required token and no excluded one.
    pub fn matches(&self, event_name: &str, title: &str) -> bool {
        self.required_tokens(event_name)
            .iter()
            .all(|token| title.contains(token))
            && !self
                .exclude_tokens
                .iter()
                .any(|token| title.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        assert_eq!(
            Segment::ALL,
            [Segment::EarlyPrelims, Segment::Prelims, Segment::MainCard]
        );
    }

    #[test]
    fn test_required_tokens_drop_empty_parts() {
        let def = Segment::MainCard.definition();
        assert_eq!(def.required_tokens("ufc 300"), vec!["ufc", "300", "1080p"]);
        assert_eq!(
            def.required_tokens("  ufc   300 "),
            vec!["ufc", "300", "1080p"]
        );
    }

    #[test]
    fn test_matches_requires_every_token() {
        let def = Segment::EarlyPrelims.definition();
        assert!(def.matches("ufc 300", "ufc 300 1080p early prelims web-dl"));
        assert!(!def.matches("ufc 300", "ufc 300 720p early prelims"));
        assert!(!def.matches("ufc 300", "ufc 301 1080p early prelims"));
    }

    #[test]
    fn test_matches_rejects_excluded_tokens() {
        let def = Segment::Prelims.definition();
        assert!(def.matches("ufc 300", "ufc 300 1080p prelims"));
        assert!(!def.matches("ufc 300", "ufc 300 1080p early prelims"));
        assert!(!def.matches("ufc 300", "ufc 300 1080p prelims embedded subs"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let def = Segment::MainCard.definition();
        assert!(!def.matches("ufc 300", "UFC 300 1080p"));
        assert!(def.matches("ufc 300", "ufc 300 1080p PRELIMS"));
    }

    #[test]
    fn test_main_card_excludes_prelims() {
        let def = Segment::MainCard.definition();
        assert!(def.matches("ufc 300", "ufc 300 1080p web-dl h264"));
        assert!(!def.matches("ufc 300", "ufc 300 1080p prelims"));
        assert!(!def.matches("ufc 300", "ufc 300 1080p countdown"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Segment::EarlyPrelims.label(), "Early Prelims");
        assert_eq!(Segment::Prelims.label(), "Prelims");
        assert_eq!(Segment::MainCard.label(), "Main card");
        assert_eq!(Segment::MainCard.to_string(), "Main card");
    }
}
