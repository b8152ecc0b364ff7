//! Silence gaps, subtitle segments, and topic changes.

use serde::{Deserialize, Serialize};

/// A silence gap between two adjacent subtitle cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilenceGap {
    /// End of the cue before the gap
    pub start: f64,

    /// Start of the cue after the gap
    pub end: f64,

    /// Gap length in seconds
    pub duration: f64,
}

/// A contiguous run of subtitles bounded by silence gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 0-based id, assigned in emission order after the minimum-duration
    /// filter; not stable across parameter choices
    pub id: usize,

    /// First member cue's start
    pub start: f64,

    /// Last member cue's end
    pub end: f64,

    /// `end - start` in seconds
    pub duration: f64,

    /// Number of member cues
    pub subtitle_count: usize,

    /// Member cue texts, space-joined in order
    pub text: String,
}

/// A discourse-marker topic change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicChange {
    /// Start of the subtitle containing the marker
    pub time: f64,

    /// Marker pattern that matched
    pub keyword: String,

    /// Full subtitle text
    pub text: String,
}
