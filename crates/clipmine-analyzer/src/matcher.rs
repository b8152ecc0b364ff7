//! Keyword matching.
//!
//! Detection logic talks to the [`TextMatcher`] trait so the matching engine
//! stays swappable; [`RegexMatcher`] is the production implementation. A
//! [`KeywordSet`] compiles its patterns once and is reused across every bin
//! and record.

use regex::{Regex, RegexBuilder};

use crate::error::AnalyzerResult;

/// Reaction patterns for Japanese chat (laughter, surprise, excitement).
pub const REACTION_KEYWORDS: &[&str] = &["w+", "草", "笑", "！+", "？+", "すごい", "やばい"];

/// Discourse-transition markers ("next", "well then", "continuing", "now",
/// "from here", "from now", "first", "finally").
pub const DISCOURSE_MARKERS: &[&str] = &[
    "次は",
    "それでは",
    "続いて",
    "さて",
    "ここから",
    "これから",
    "まず",
    "最後に",
];

/// Capability interface for pattern search over record text.
pub trait TextMatcher {
    /// The source pattern, used to label matches.
    fn pattern(&self) -> &str;

    /// True if the pattern is found anywhere in `text` (unanchored search).
    fn matches(&self, text: &str) -> bool;

    /// Byte ranges of every non-overlapping match in `text`.
    fn find_all(&self, text: &str) -> Vec<(usize, usize)>;
}

/// Regex-backed matcher.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    pattern: String,
    regex: Regex,
}

impl RegexMatcher {
    /// Compile a pattern. Case-insensitive unless `case_sensitive` is set.
    pub fn compile(pattern: &str, case_sensitive: bool) -> AnalyzerResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

impl TextMatcher for RegexMatcher {
    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        self.regex.find_iter(text).map(|m| (m.start(), m.end())).collect()
    }
}

/// An ordered set of compiled keyword patterns.
///
/// Order matters for topic-change detection, where the first matching
/// pattern wins.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    matchers: Vec<RegexMatcher>,
}

impl KeywordSet {
    /// Compile a pattern list, preserving order. Case-insensitive matching
    /// is the default.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> AnalyzerResult<Self> {
        Self::compile_with_case(patterns, false)
    }

    /// Compile a pattern list with explicit case sensitivity.
    pub fn compile_with_case<S: AsRef<str>>(
        patterns: &[S],
        case_sensitive: bool,
    ) -> AnalyzerResult<Self> {
        let matchers = patterns
            .iter()
            .map(|p| RegexMatcher::compile(p.as_ref(), case_sensitive))
            .collect::<AnalyzerResult<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    /// The default audience-reaction set.
    pub fn reaction_defaults() -> Self {
        Self::compile(REACTION_KEYWORDS).expect("default reaction patterns compile")
    }

    /// The default discourse-marker set for topic-change detection.
    pub fn discourse_markers() -> Self {
        Self::compile(DISCOURSE_MARKERS).expect("default discourse patterns compile")
    }

    /// Compiled matchers in pattern order.
    pub fn matchers(&self) -> &[RegexMatcher] {
        &self.matchers
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
