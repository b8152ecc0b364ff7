//! Statistics tables exposed to the display layer.

use serde::{Deserialize, Serialize};

/// Summary statistics over a comment table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentStats {
    /// Total comment records
    pub total_comments: usize,

    /// Distinct authors
    pub unique_commenters: usize,

    /// Mean comment length in characters
    pub avg_comment_length: f64,

    /// Span between the first and last comment, seconds
    pub duration_seconds: f64,

    /// Comments per minute over that span (0 when the span is empty)
    pub comments_per_minute: f64,
}

/// Summary statistics over a subtitle table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleStats {
    /// Total subtitle cues
    pub total_subtitles: usize,

    /// Span between the earliest start and latest end, seconds
    pub total_duration: f64,

    /// Mean cue duration, seconds
    pub avg_subtitle_duration: f64,

    /// Total characters across all cues
    pub total_characters: usize,

    /// Mean characters per cue
    pub avg_characters_per_subtitle: f64,
}

/// One row of the commenter ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCommenter {
    /// Author display name
    pub author: String,

    /// Number of comments by this author
    pub comment_count: u64,
}
