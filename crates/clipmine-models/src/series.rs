//! Binned time-series tables and detected peaks.

use serde::{Deserialize, Serialize};

/// A fixed-width time bucket with a comment count.
///
/// Bins are half-open `[start, end)`; the final bin of a range is treated as
/// closed on the right so the maximum timestamp is included. Produced
/// sequences are sparse: zero-count bins are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBin {
    /// Bin start, seconds
    pub start: f64,

    /// Bin end, seconds (`start + bin_size`)
    pub end: f64,

    /// Comments falling in this bin
    pub count: u64,

    /// Comments per second (`count / bin_size`)
    pub rate: f64,
}

/// A comment-volume peak.
///
/// One or more adjacent above-threshold bins collapsed to their
/// maximum-count member; the representative bin's bounds are kept, not the
/// group's full span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Representative bin start, seconds
    pub start: f64,

    /// Representative bin end, seconds
    pub end: f64,

    /// Comment count of the representative bin
    pub count: u64,

    /// Comment rate of the representative bin
    pub rate: f64,
}

/// A single keyword match in a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    /// Pattern that matched
    pub keyword: String,

    /// Timestamp of the matching comment
    pub timestamp: f64,

    /// Full comment text
    pub text: String,
}

/// Matches for one keyword within one time bin.
///
/// Rows are sorted by (`bin_start`, `keyword`); bins and keywords with zero
/// matches are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordBinCount {
    /// Bin start, seconds
    pub bin_start: f64,

    /// Bin end, seconds
    pub bin_end: f64,

    /// Pattern that matched
    pub keyword: String,

    /// Matches for this keyword in this bin
    pub count: u64,
}
