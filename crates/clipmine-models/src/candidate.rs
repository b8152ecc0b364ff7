//! Clip candidates and per-source scoring details.

use serde::{Deserialize, Serialize};

/// Per-source metadata attached to a candidate.
///
/// A tagged variant per producer lets the scoring pass pattern-match instead
/// of probing optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceDetail {
    /// A comment-volume peak
    CommentPeak {
        /// Comment count of the peak's representative bin
        count: u64,
        /// Start of the representative bin
        peak_time: f64,
    },

    /// A burst of reaction keywords
    KeywordBurst {
        /// Keyword matches summed over the burst's bins
        total_count: u64,
    },

    /// A silence-bounded subtitle segment
    SubtitleSegment {
        /// Segment id at detection time
        segment_id: usize,
        /// Number of member cues
        subtitle_count: usize,
        /// Truncated segment text for tooltips
        text_preview: String,
    },

    /// A discourse-marker topic shift
    TopicShift {
        /// Marker pattern that matched
        keyword: String,
        /// Full subtitle text
        text: String,
    },
}

/// A proposed clip interval with a heuristic desirability score.
///
/// Candidates are mutable while the merge pass runs and frozen once emitted
/// in the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Interval start, seconds
    pub start: f64,

    /// Interval end, seconds
    pub end: f64,

    /// Distinct contributing reasons, in first-seen order
    pub reasons: Vec<String>,

    /// Composite score in [0, 1]
    pub score: f64,

    /// One entry per contributing detection, in merge order
    pub details: Vec<SourceDetail>,
}

impl Candidate {
    /// Create a candidate from a single detection.
    pub fn new(start: f64, end: f64, reason: impl Into<String>, detail: SourceDetail) -> Self {
        Self {
            start,
            end,
            reasons: vec![reason.into()],
            score: 0.0,
            details: vec![detail],
        }
    }

    /// Interval length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Record a contributing reason, keeping the list deduplicated.
    pub fn add_reason(&mut self, reason: &str) {
        if !self.reasons.iter().any(|r| r == reason) {
            self.reasons.push(reason.to_string());
        }
    }

    /// Display string joining the distinct reasons.
    pub fn reason_summary(&self) -> String {
        self.reasons.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_reason_deduplicates() {
        let mut candidate = Candidate::new(
            0.0,
            30.0,
            "comment surge",
            SourceDetail::CommentPeak {
                count: 12,
                peak_time: 10.0,
            },
        );
        candidate.add_reason("keyword burst");
        candidate.add_reason("comment surge");

        assert_eq!(candidate.reasons, vec!["comment surge", "keyword burst"]);
        assert_eq!(candidate.reason_summary(), "comment surge, keyword burst");
    }

    #[test]
    fn test_duration() {
        let candidate = Candidate::new(
            15.0,
            75.0,
            "subtitle segment",
            SourceDetail::KeywordBurst { total_count: 3 },
        );
        assert!((candidate.duration() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_source_detail_serializes_tagged() {
        let detail = SourceDetail::TopicShift {
            keyword: "それでは".to_string(),
            text: "それでは始めます".to_string(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["type"], "topic_shift");
        assert_eq!(json["keyword"], "それでは");
    }
}
