//! Comment (chat replay) records.

use serde::{Deserialize, Serialize};

/// A single timestamped comment from a video's chat replay.
///
/// Timestamps are seconds from the start of the video. Input order is not
/// guaranteed; analysis tables sort their snapshot by timestamp. Duplicate
/// records (same author, timestamp, and text) are retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Seconds from the start of the video
    pub timestamp: f64,

    /// Display name of the comment author
    pub author: String,

    /// Message text
    pub text: String,
}

impl CommentRecord {
    /// Create a new comment record.
    pub fn new(timestamp: f64, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            author: author.into(),
            text: text.into(),
        }
    }
}
