//! Candidate-generation core for ClipMine.
//!
//! Four independent signal sources feed the clip generator:
//! - comment-volume peaks (time binning + percentile threshold)
//! - reaction-keyword bursts in the chat
//! - silence-bounded subtitle segments
//! - discourse-marker topic changes
//!
//! [`ClipGenerator`] merges overlapping candidates from all four and ranks
//! them by a composite score. Every stage is a synchronous pure function over
//! an immutable record snapshot; independent analyses can run on separate
//! threads with no coordination.

mod binning;

pub mod candidates;
pub mod comments;
pub mod error;
pub mod matcher;
pub mod peaks;
pub mod stats;
pub mod subtitles;

// Re-export common types
pub use candidates::{overlap_ratio, ClipGenerator, GeneratorConfig};
pub use comments::CommentAnalyzer;
pub use error::{AnalyzerError, AnalyzerResult};
pub use matcher::{KeywordSet, RegexMatcher, TextMatcher};
pub use peaks::find_peaks;
pub use stats::percentile;
pub use subtitles::SubtitleAnalyzer;
