//! Subtitle document parsing.

use serde::Deserialize;
use tracing::warn;

use clipmine_models::SubtitleRecord;

use crate::error::IngestResult;

/// Parse a subtitle document (`{ "subtitles": [{ start, duration, text }] }`)
/// into start-sorted records.
///
/// Cues missing timing fields, or with non-finite or negative values, are
/// skipped individually.
pub fn parse_subtitle_document(json: &str) -> IngestResult<Vec<SubtitleRecord>> {
    let doc: SubtitleDocument = serde_json::from_str(json)?;

    let mut records = Vec::new();
    for cue in doc.subtitles {
        let (Some(start), Some(duration)) = (cue.start, cue.duration) else {
            warn!("Skipping subtitle cue with missing timing");
            continue;
        };
        if !start.is_finite() || !duration.is_finite() || duration < 0.0 {
            warn!(start, duration, "Skipping subtitle cue with invalid timing");
            continue;
        }
        records.push(SubtitleRecord {
            start,
            duration,
            text: cue.text,
        });
    }

    records.sort_by(|a, b| a.start.total_cmp(&b.start));
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct SubtitleDocument {
    #[serde(default)]
    subtitles: Vec<SubtitleCue>,
}

#[derive(Debug, Deserialize)]
struct SubtitleCue {
    #[serde(default)]
    start: Option<f64>,

    #[serde(default)]
    duration: Option<f64>,

    #[serde(default)]
    text: String,
}
