//! Subtitle-stream analysis: silence gaps, segmentation, topic changes,
//! lookup helpers.

use clipmine_models::{
    Segment, SilenceGap, SubtitleKeywordHit, SubtitleRecord, SubtitleStats, TopicChange,
};

use crate::matcher::{KeywordSet, TextMatcher};

/// Equality tolerance when matching a cue end against a gap boundary,
/// absorbing floating-point drift.
const GAP_BOUNDARY_TOLERANCE: f64 = 0.1;

/// Immutable, start-sorted subtitle table with analysis operations.
#[derive(Debug, Clone)]
pub struct SubtitleAnalyzer {
    records: Vec<SubtitleRecord>,
}

impl SubtitleAnalyzer {
    /// Build an analyzer over a snapshot of subtitle cues.
    ///
    /// Input order is not assumed; cues are sorted by start here. Overlaps
    /// between cues are kept as-is.
    pub fn new(mut records: Vec<SubtitleRecord>) -> Self {
        records.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { records }
    }

    /// Cues in ascending start order.
    pub fn records(&self) -> &[SubtitleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Detect silence gaps between adjacent cues.
    ///
    /// A pair with `next.start - current.end >= min_gap_seconds` produces a
    /// gap; the exact boundary counts as a gap. Fewer than two cues can
    /// produce none.
    pub fn silence_gaps(&self, min_gap_seconds: f64) -> Vec<SilenceGap> {
        self.records
            .windows(2)
            .filter_map(|pair| {
                let gap = pair[1].start - pair[0].end();
                (gap >= min_gap_seconds).then(|| SilenceGap {
                    start: pair[0].end(),
                    end: pair[1].start,
                    duration: gap,
                })
            })
            .collect()
    }

    /// Split the cue stream into contiguous segments at silence gaps.
    ///
    /// A segment closes immediately after the cue whose end sits on a gap
    /// boundary, or at the last cue. Segments shorter than
    /// `min_segment_duration` are dropped, not merged into a neighbor, so
    /// short throwaway runs vanish from the output. Ids are assigned 0-based
    /// after that filter and are not stable across parameter choices.
    pub fn segment_by_silence(
        &self,
        min_gap_seconds: f64,
        min_segment_duration: f64,
    ) -> Vec<Segment> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let gaps = self.silence_gaps(min_gap_seconds);

        let mut segments = Vec::new();
        let mut segment_start = self.records[0].start;
        let mut member_texts: Vec<&str> = Vec::new();

        for (i, cue) in self.records.iter().enumerate() {
            member_texts.push(&cue.text);

            let ends_at_gap = gaps
                .iter()
                .any(|g| (g.start - cue.end()).abs() < GAP_BOUNDARY_TOLERANCE);
            let is_last = i == self.records.len() - 1;
            if !ends_at_gap && !is_last {
                continue;
            }

            let end = cue.end();
            let duration = end - segment_start;
            if duration >= min_segment_duration {
                segments.push(Segment {
                    id: segments.len(),
                    start: segment_start,
                    end,
                    duration,
                    subtitle_count: member_texts.len(),
                    text: member_texts.join(" "),
                });
            }

            if !is_last {
                segment_start = self.records[i + 1].start;
                member_texts.clear();
            }
        }

        segments
    }

    /// Flag cues containing discourse-transition markers.
    ///
    /// Markers are tested in set order; the first match wins and the rest
    /// are not checked, so each cue yields at most one change.
    pub fn detect_topic_changes(&self, markers: &KeywordSet) -> Vec<TopicChange> {
        let mut changes = Vec::new();
        for cue in &self.records {
            if let Some(matcher) = markers.matchers().iter().find(|m| m.matches(&cue.text)) {
                changes.push(TopicChange {
                    time: cue.start,
                    keyword: matcher.pattern().to_string(),
                    text: cue.text.clone(),
                });
            }
        }
        changes
    }

    /// Find every cue matching each keyword, keyword-major.
    pub fn keyword_timestamps(&self, keywords: &KeywordSet) -> Vec<SubtitleKeywordHit> {
        let mut hits = Vec::new();
        for matcher in keywords.matchers() {
            for cue in &self.records {
                if matcher.matches(&cue.text) {
                    hits.push(SubtitleKeywordHit {
                        keyword: matcher.pattern().to_string(),
                        start: cue.start,
                        end: cue.end(),
                        text: cue.text.clone(),
                    });
                }
            }
        }
        hits
    }

    /// The cue on screen at `timestamp`, if any.
    pub fn subtitle_at(&self, timestamp: f64) -> Option<&str> {
        self.records
            .iter()
            .find(|c| c.start <= timestamp && c.end() > timestamp)
            .map(|c| c.text.as_str())
    }

    /// Cues overlapping the `(start_time, end_time)` window.
    pub fn subtitles_in_range(&self, start_time: f64, end_time: f64) -> Vec<&SubtitleRecord> {
        self.records
            .iter()
            .filter(|c| c.start < end_time && c.end() > start_time)
            .collect()
    }

    /// All cue text joined with `separator`.
    pub fn full_text(&self, separator: &str) -> String {
        self.records
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Summary statistics for the display layer.
    pub fn statistics(&self) -> SubtitleStats {
        if self.records.is_empty() {
            return SubtitleStats::default();
        }

        let min_start = self.records[0].start;
        let max_end = self
            .records
            .iter()
            .map(|c| c.end())
            .fold(f64::NEG_INFINITY, f64::max);
        let total_duration_sum: f64 = self.records.iter().map(|c| c.duration).sum();
        let total_chars: usize = self.records.iter().map(|c| c.text.chars().count()).sum();

        SubtitleStats {
            total_subtitles: self.records.len(),
            total_duration: max_end - min_start,
            avg_subtitle_duration: total_duration_sum / self.records.len() as f64,
            total_characters: total_chars,
            avg_characters_per_subtitle: total_chars as f64 / self.records.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start: f64, duration: f64, text: &str) -> SubtitleRecord {
        SubtitleRecord::new(start, duration, text)
    }

    fn table() -> SubtitleAnalyzer {
        SubtitleAnalyzer::new(vec![
            cue(0.0, 4.0, "こんにちは"),
            cue(5.0, 4.0, "これからゲームを始めます"),
            cue(10.0, 4.0, "次はボス戦です"),
            cue(15.0, 4.0, "すごい！"),
            cue(25.0, 4.0, "それでは終わります"),
            cue(30.0, 4.0, "ありがとうございました"),
        ])
    }

    #[test]
    fn test_silence_gaps_boundary_is_inclusive() {
        // 19 -> 25 is a 6s hole; with a 6s threshold the boundary case must
        // still count as a gap
        let gaps = table().silence_gaps(6.0);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start, 19.0);
        assert_eq!(gaps[0].end, 25.0);
        assert!((gaps[0].duration - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_cue_has_no_gaps() {
        let analyzer = SubtitleAnalyzer::new(vec![cue(0.0, 5.0, "solo")]);
        assert!(analyzer.silence_gaps(1.0).is_empty());
    }

    #[test]
    fn test_segment_by_silence_splits_at_gap() {
        let segments = table().segment_by_silence(4.0, 5.0);

        // Gap after 19.0; two segments: 0..19 and 25..34
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].id, 0);
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 19.0);
        assert_eq!(segments[0].subtitle_count, 4);
        assert_eq!(
            segments[0].text,
            "こんにちは これからゲームを始めます 次はボス戦です すごい！"
        );
        assert_eq!(segments[1].id, 1);
        assert_eq!(segments[1].start, 25.0);
        assert_eq!(segments[1].end, 34.0);
    }

    #[test]
    fn test_short_segments_are_dropped_not_merged() {
        // Second segment spans 9s; a 10s minimum drops it and the survivor
        // keeps id 0
        let segments = table().segment_by_silence(4.0, 10.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id, 0);
        assert_eq!(segments[0].end, 19.0);
    }

    #[test]
    fn test_no_gaps_yield_single_full_span_segment() {
        let segments = table().segment_by_silence(10.0, 5.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].end, 34.0);
        assert_eq!(segments[0].subtitle_count, 6);
    }

    #[test]
    fn test_no_gaps_below_minimum_duration_yield_nothing() {
        let segments = table().segment_by_silence(10.0, 60.0);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_empty_table_yields_no_segments() {
        let analyzer = SubtitleAnalyzer::new(Vec::new());
        assert!(analyzer.segment_by_silence(2.0, 10.0).is_empty());
    }

    #[test]
    fn test_detect_topic_changes_first_match_wins() {
        let changes = table().detect_topic_changes(&KeywordSet::discourse_markers());

        // "次は" at 10s, "これから" at 5s, "それでは" at 25s; one change per
        // cue even though 次は outranks これから in the marker list
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].time, 5.0);
        assert_eq!(changes[0].keyword, "これから");
        assert_eq!(changes[1].time, 10.0);
        assert_eq!(changes[1].keyword, "次は");
        assert_eq!(changes[2].time, 25.0);
        assert_eq!(changes[2].keyword, "それでは");
    }

    #[test]
    fn test_subtitle_lookup_helpers() {
        let analyzer = table();
        assert_eq!(analyzer.subtitle_at(11.0), Some("次はボス戦です"));
        assert_eq!(analyzer.subtitle_at(20.0), None);

        let in_range = analyzer.subtitles_in_range(14.0, 26.0);
        assert_eq!(in_range.len(), 2);
        assert_eq!(in_range[0].text, "すごい！");

        assert!(analyzer.full_text(" ").starts_with("こんにちは これから"));
    }

    #[test]
    fn test_statistics() {
        let stats = table().statistics();
        assert_eq!(stats.total_subtitles, 6);
        assert!((stats.total_duration - 34.0).abs() < f64::EPSILON);
        assert!((stats.avg_subtitle_duration - 4.0).abs() < f64::EPSILON);
    }
}
