//! Comment-stream analysis: time binning, keyword frequency, commenter
//! statistics.

use std::collections::{BTreeMap, HashSet};

use clipmine_models::{
    CommentRecord, CommentStats, KeywordBinCount, KeywordHit, TimeBin, TopCommenter,
};

use crate::binning::{bin_timestamps, BinGrid};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::matcher::{KeywordSet, TextMatcher};

/// Immutable, time-sorted comment table with analysis operations.
///
/// The table is a snapshot: building one copies and sorts the records, and
/// every operation reads from that snapshot without mutating it.
#[derive(Debug, Clone)]
pub struct CommentAnalyzer {
    records: Vec<CommentRecord>,
}

impl CommentAnalyzer {
    /// Build an analyzer over a snapshot of comment records.
    ///
    /// Input order is not assumed; records are sorted by timestamp here.
    pub fn new(mut records: Vec<CommentRecord>) -> Self {
        records.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Self { records }
    }

    /// Records in ascending timestamp order.
    pub fn records(&self) -> &[CommentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate comment counts into fixed-width time bins.
    ///
    /// Boundaries run from `floor(min_timestamp)` in `bin_size` steps; a
    /// record falls in the half-open bin `[b, b + bin_size)` and the final
    /// bin is closed on the right so the maximum timestamp is included.
    /// Zero-count bins are omitted; an empty table yields an empty series,
    /// not an error.
    pub fn bin_by_time(&self, bin_size: f64) -> AnalyzerResult<Vec<TimeBin>> {
        validate_bin_size(bin_size)?;
        let timestamps: Vec<f64> = self.records.iter().map(|r| r.timestamp).collect();
        Ok(bin_timestamps(&timestamps, bin_size))
    }

    /// Find every comment matching each keyword.
    ///
    /// A comment matching several keywords is counted once per keyword.
    /// Hits are keyword-major, time-ascending within a keyword.
    pub fn count_keywords(&self, keywords: &KeywordSet) -> Vec<KeywordHit> {
        let mut hits = Vec::new();
        for matcher in keywords.matchers() {
            for record in &self.records {
                if matcher.matches(&record.text) {
                    hits.push(KeywordHit {
                        keyword: matcher.pattern().to_string(),
                        timestamp: record.timestamp,
                        text: record.text.clone(),
                    });
                }
            }
        }
        hits
    }

    /// Per-bin, per-keyword match counts over the full comment range.
    ///
    /// Bin boundaries are computed from the whole table's time range, not
    /// per keyword, so rows from different keywords line up. Rows are sorted
    /// by (`bin_start`, `keyword`); zero rows are omitted.
    pub fn keyword_frequency_over_time(
        &self,
        keywords: &KeywordSet,
        bin_size: f64,
    ) -> AnalyzerResult<Vec<KeywordBinCount>> {
        validate_bin_size(bin_size)?;

        let hits = self.count_keywords(keywords);
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        // Records are sorted, so the table bounds are at the ends
        let min_ts = self.records[0].timestamp;
        let max_ts = self.records[self.records.len() - 1].timestamp;
        let grid = BinGrid::covering(min_ts, max_ts, bin_size);

        let mut counts: BTreeMap<(usize, String), u64> = BTreeMap::new();
        for hit in hits {
            *counts.entry((grid.index_of(hit.timestamp), hit.keyword)).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|((idx, keyword), count)| KeywordBinCount {
                bin_start: grid.start_of(idx),
                bin_end: grid.start_of(idx + 1),
                keyword,
                count,
            })
            .collect())
    }

    /// Rank authors by comment volume, most active first. Ties keep
    /// alphabetical order.
    pub fn top_commenters(&self, top_n: usize) -> Vec<TopCommenter> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.author.as_str()).or_insert(0) += 1;
        }

        let mut ranking: Vec<TopCommenter> = counts
            .into_iter()
            .map(|(author, comment_count)| TopCommenter {
                author: author.to_string(),
                comment_count,
            })
            .collect();
        ranking.sort_by(|a, b| b.comment_count.cmp(&a.comment_count));
        ranking.truncate(top_n);
        ranking
    }

    /// Summary statistics for the display layer.
    pub fn statistics(&self) -> CommentStats {
        if self.records.is_empty() {
            return CommentStats::default();
        }

        let duration = self.records[self.records.len() - 1].timestamp - self.records[0].timestamp;
        let unique: HashSet<&str> = self.records.iter().map(|r| r.author.as_str()).collect();
        let total_chars: usize = self.records.iter().map(|r| r.text.chars().count()).sum();

        CommentStats {
            total_comments: self.records.len(),
            unique_commenters: unique.len(),
            avg_comment_length: total_chars as f64 / self.records.len() as f64,
            duration_seconds: duration,
            comments_per_minute: if duration > 0.0 {
                self.records.len() as f64 / (duration / 60.0)
            } else {
                0.0
            },
        }
    }
}

fn validate_bin_size(bin_size: f64) -> AnalyzerResult<()> {
    if !bin_size.is_finite() || bin_size <= 0.0 {
        return Err(AnalyzerError::InvalidBinSize(bin_size));
    }
    Ok(())
}
