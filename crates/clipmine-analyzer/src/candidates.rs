//! Clip candidate generation: producers, merge pass, composite scoring.
//!
//! Four producers each turn a detection into a candidate interval; a single
//! left-to-right sweep then merges candidates that overlap by more than half
//! of the shorter one, and the survivors are scored and ranked.

use tracing::{debug, info};

use clipmine_models::{Candidate, SourceDetail};

use crate::comments::CommentAnalyzer;
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::matcher::{KeywordSet, REACTION_KEYWORDS};
use crate::peaks::find_peaks;
use crate::stats::percentile;
use crate::subtitles::SubtitleAnalyzer;

/// Reason label for comment-peak candidates.
pub const REASON_COMMENT_SURGE: &str = "comment surge";
/// Reason label for keyword-burst candidates.
pub const REASON_KEYWORD_BURST: &str = "keyword burst";
/// Reason label for silence-segment candidates.
pub const REASON_SUBTITLE_SEGMENT: &str = "subtitle segment";
/// Reason prefix for topic-change candidates; the marker is appended.
pub const REASON_TOPIC_SHIFT: &str = "topic shift";

/// Bin width for the comment-volume and keyword-frequency series (seconds).
const SIGNAL_BIN_SECS: f64 = 10.0;
/// Percentile threshold shared by the peak and burst producers.
const SIGNAL_PERCENTILE: f64 = 75.0;
/// Minimum spacing between distinct comment peaks (seconds).
const PEAK_MIN_GAP_SECS: f64 = 30.0;
/// Lead-in kept before a comment peak (seconds).
const PEAK_LEAD_IN_SECS: f64 = 15.0;
/// Tail kept after a comment peak (seconds).
const PEAK_TAIL_SECS: f64 = 30.0;
/// Hard cap on a peak candidate, measured from the peak start (seconds).
const PEAK_MAX_SPAN_SECS: f64 = 60.0;
/// Maximum hole between bins of a single keyword burst (seconds).
const BURST_JOIN_GAP_SECS: f64 = 20.0;
/// Padding added around a keyword-burst group (seconds).
const BURST_PAD_SECS: f64 = 10.0;
/// Silence threshold handed to the segment producer (seconds).
const SEGMENT_SILENCE_GAP_SECS: f64 = 2.0;
/// Candidate length after the final topic change (seconds).
const TOPIC_FALLBACK_SPAN_SECS: f64 = 60.0;
/// Overlap ratio above which two candidates merge (strict).
const MERGE_OVERLAP_RATIO: f64 = 0.5;
/// Character budget for segment preview text.
const PREVIEW_CHARS: usize = 100;

/// Clip generation parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Minimum candidate length (seconds)
    pub min_duration: f64,

    /// Maximum candidate length (seconds)
    pub max_duration: f64,

    /// Reaction patterns for the keyword-burst producer
    pub reaction_keywords: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_duration: 30.0,
            max_duration: 180.0,
            reaction_keywords: REACTION_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Generates ranked clip candidates from the available analyzers.
///
/// Either analyzer may be absent; producers without a source are skipped.
/// The generator holds no state across calls — each invocation reads fresh
/// snapshots and returns a fresh list.
#[derive(Debug, Clone, Copy)]
pub struct ClipGenerator<'a> {
    comments: Option<&'a CommentAnalyzer>,
    subtitles: Option<&'a SubtitleAnalyzer>,
}

impl<'a> ClipGenerator<'a> {
    pub fn new(
        comments: Option<&'a CommentAnalyzer>,
        subtitles: Option<&'a SubtitleAnalyzer>,
    ) -> Self {
        Self {
            comments,
            subtitles,
        }
    }

    /// Generate clip candidates, ranked descending by score.
    ///
    /// Producers that yield nothing are skipped; with no sources at all the
    /// result is empty, never an error. Invalid duration bounds and
    /// unparsable reaction patterns are rejected up front.
    pub fn generate_candidates(&self, config: &GeneratorConfig) -> AnalyzerResult<Vec<Candidate>> {
        if config.min_duration > config.max_duration {
            return Err(AnalyzerError::InvalidDurationBounds {
                min: config.min_duration,
                max: config.max_duration,
            });
        }
        let reactions = KeywordSet::compile(&config.reaction_keywords)?;

        let mut candidates = Vec::new();

        if let Some(comments) = self.comments {
            let peaks = from_comment_peaks(comments, config)?;
            debug!(count = peaks.len(), "Comment-peak candidates");
            candidates.extend(peaks);

            let bursts = from_keyword_bursts(comments, &reactions, config)?;
            debug!(count = bursts.len(), "Keyword-burst candidates");
            candidates.extend(bursts);
        }

        if let Some(subtitles) = self.subtitles {
            let segments = from_subtitle_segments(subtitles, config);
            debug!(count = segments.len(), "Subtitle-segment candidates");
            candidates.extend(segments);

            let topics = from_topic_changes(subtitles, config);
            debug!(count = topics.len(), "Topic-change candidates");
            candidates.extend(topics);
        }

        let mut ranked = merge_and_score(candidates, config);
        // Stable sort keeps merge order on score ties
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        info!(count = ranked.len(), "Generated clip candidates");
        Ok(ranked)
    }
}

/// Candidates around comment-volume peaks.
fn from_comment_peaks(
    comments: &CommentAnalyzer,
    config: &GeneratorConfig,
) -> AnalyzerResult<Vec<Candidate>> {
    let bins = comments.bin_by_time(SIGNAL_BIN_SECS)?;
    let peaks = find_peaks(&bins, SIGNAL_PERCENTILE, PEAK_MIN_GAP_SECS)?;

    let mut candidates = Vec::new();
    for peak in peaks {
        let start = (peak.start - PEAK_LEAD_IN_SECS).max(0.0);
        let end = (peak.end + PEAK_TAIL_SECS).min(peak.start + PEAK_MAX_SPAN_SECS);
        if within_bounds(end - start, config) {
            candidates.push(Candidate::new(
                start,
                end,
                REASON_COMMENT_SURGE,
                SourceDetail::CommentPeak {
                    count: peak.count,
                    peak_time: peak.start,
                },
            ));
        }
    }
    Ok(candidates)
}

/// A bin with matches summed across every reaction keyword.
#[derive(Debug, Clone, Copy)]
struct BurstBin {
    start: f64,
    end: f64,
    count: u64,
}

/// Candidates around reaction-keyword bursts.
fn from_keyword_bursts(
    comments: &CommentAnalyzer,
    reactions: &KeywordSet,
    config: &GeneratorConfig,
) -> AnalyzerResult<Vec<Candidate>> {
    let rows = comments.keyword_frequency_over_time(reactions, SIGNAL_BIN_SECS)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    // Rows are sorted by bin, so same-bin keywords are adjacent
    let mut bins: Vec<BurstBin> = Vec::new();
    for row in &rows {
        match bins.last_mut() {
            Some(bin) if bin.start == row.bin_start => bin.count += row.count,
            _ => bins.push(BurstBin {
                start: row.bin_start,
                end: row.bin_end,
                count: row.count,
            }),
        }
    }

    let totals: Vec<f64> = bins.iter().map(|b| b.count as f64).collect();
    let Some(threshold) = percentile(&totals, SIGNAL_PERCENTILE) else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    let mut group: Vec<BurstBin> = Vec::new();
    for bin in bins.into_iter().filter(|b| b.count as f64 >= threshold) {
        if let Some(last) = group.last() {
            if bin.start - last.end > BURST_JOIN_GAP_SECS {
                candidates.extend(burst_candidate(&group, config));
                group.clear();
            }
        }
        group.push(bin);
    }
    candidates.extend(burst_candidate(&group, config));

    Ok(candidates)
}

/// Collapse a group of qualifying burst bins into one padded candidate.
fn burst_candidate(group: &[BurstBin], config: &GeneratorConfig) -> Option<Candidate> {
    let (first, last) = (group.first()?, group.last()?);
    let start = (first.start - BURST_PAD_SECS).max(0.0);
    let end = last.end + BURST_PAD_SECS;
    if !within_bounds(end - start, config) {
        return None;
    }

    let total_count = group.iter().map(|b| b.count).sum();
    Some(Candidate::new(
        start,
        end,
        REASON_KEYWORD_BURST,
        SourceDetail::KeywordBurst { total_count },
    ))
}

/// Candidates from silence-bounded subtitle segments.
fn from_subtitle_segments(subtitles: &SubtitleAnalyzer, config: &GeneratorConfig) -> Vec<Candidate> {
    subtitles
        .segment_by_silence(SEGMENT_SILENCE_GAP_SECS, config.min_duration)
        .into_iter()
        .filter(|s| within_bounds(s.duration, config))
        .map(|s| {
            Candidate::new(
                s.start,
                s.end,
                REASON_SUBTITLE_SEGMENT,
                SourceDetail::SubtitleSegment {
                    segment_id: s.id,
                    subtitle_count: s.subtitle_count,
                    text_preview: preview(&s.text),
                },
            )
        })
        .collect()
}

/// Candidates spanning one topic change to the next.
fn from_topic_changes(subtitles: &SubtitleAnalyzer, config: &GeneratorConfig) -> Vec<Candidate> {
    let changes = subtitles.detect_topic_changes(&KeywordSet::discourse_markers());

    let mut candidates = Vec::new();
    for (i, change) in changes.iter().enumerate() {
        let start = change.time;
        let end = changes
            .get(i + 1)
            .map_or(start + TOPIC_FALLBACK_SPAN_SECS, |next| next.time);
        if within_bounds(end - start, config) {
            candidates.push(Candidate::new(
                start,
                end,
                format!("{}: {}", REASON_TOPIC_SHIFT, change.keyword),
                SourceDetail::TopicShift {
                    keyword: change.keyword.clone(),
                    text: change.text.clone(),
                },
            ));
        }
    }
    candidates
}

/// Merge overlapping candidates with a single left-to-right sweep, then
/// score the survivors and apply the duration bounds.
///
/// Candidates are sorted by start; the accumulator absorbs the next
/// candidate when their overlap ratio is strictly above the merge
/// threshold, otherwise it is scored and emitted and the next candidate
/// becomes the accumulator. Finalized candidates are never revisited, so a
/// pathological ordering can leave two overlapping but non-consecutive
/// candidates unmerged — a known limitation of the greedy sweep, kept for
/// output parity.
fn merge_and_score(mut candidates: Vec<Candidate>, config: &GeneratorConfig) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut iter = candidates.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if overlap_ratio(&current, &next) > MERGE_OVERLAP_RATIO {
            current.start = current.start.min(next.start);
            current.end = current.end.max(next.end);
            for reason in &next.reasons {
                current.add_reason(reason);
            }
            current.details.extend(next.details);
        } else {
            current.score = composite_score(&current);
            merged.push(current);
            current = next;
        }
    }
    current.score = composite_score(&current);
    merged.push(current);

    merged.retain(|c| within_bounds(c.duration(), config));
    merged
}

/// Shared duration divided by the shorter of the two candidates' durations.
///
/// Symmetric in its arguments; disjoint or zero-length intervals score 0.
pub fn overlap_ratio(a: &Candidate, b: &Candidate) -> f64 {
    let overlap = a.end.min(b.end) - a.start.max(b.start);
    if overlap <= 0.0 {
        return 0.0;
    }
    let shorter = a.duration().min(b.duration());
    if shorter <= 0.0 {
        return 0.0;
    }
    overlap / shorter
}

/// Composite score in [0, 1].
///
/// Distinct reasons contribute 0.3 each up to 0.6; comment-peak volume adds
/// up to 0.3 and keyword-burst volume up to 0.2; detail variants without a
/// recognized count add nothing. The sum is clamped to 1.0.
fn composite_score(candidate: &Candidate) -> f64 {
    let mut score = (candidate.reasons.len() as f64 * 0.3).min(0.6);

    for detail in &candidate.details {
        match detail {
            SourceDetail::CommentPeak { count, .. } => {
                score += (*count as f64 / 100.0).min(0.3);
            }
            SourceDetail::KeywordBurst { total_count } => {
                score += (*total_count as f64 / 50.0).min(0.2);
            }
            SourceDetail::SubtitleSegment { .. } | SourceDetail::TopicShift { .. } => {}
        }
    }

    score.min(1.0)
}

/// Truncate segment text to the preview budget.
fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn within_bounds(duration: f64, config: &GeneratorConfig) -> bool {
    duration >= config.min_duration && duration <= config.max_duration
}
