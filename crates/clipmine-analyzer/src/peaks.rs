//! Comment-volume peak detection.

use clipmine_models::{Peak, TimeBin};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::stats::percentile;

/// Detect peaks in a binned comment series.
///
/// Bins whose count reaches the `threshold_percentile` of all counts are
/// grouped greedily in time order: a bin joins the current group when its
/// start is within `min_gap_seconds` of the previous member's end. Each
/// group collapses to its maximum-count member (the first such member on
/// ties), keeping that single bin's bounds, count, and rate — the span of
/// merged low bins is discarded.
///
/// An empty series, or a threshold no bin reaches, yields an empty result.
pub fn find_peaks(
    bins: &[TimeBin],
    threshold_percentile: f64,
    min_gap_seconds: f64,
) -> AnalyzerResult<Vec<Peak>> {
    if !(0.0..=100.0).contains(&threshold_percentile) {
        return Err(AnalyzerError::InvalidPercentile(threshold_percentile));
    }

    let counts: Vec<f64> = bins.iter().map(|b| b.count as f64).collect();
    let Some(threshold) = percentile(&counts, threshold_percentile) else {
        return Ok(Vec::new());
    };

    let mut peaks = Vec::new();
    let mut group: Vec<&TimeBin> = Vec::new();
    for bin in bins.iter().filter(|b| b.count as f64 >= threshold) {
        if let Some(last) = group.last() {
            if bin.start - last.end > min_gap_seconds {
                peaks.push(collapse_group(&group));
                group.clear();
            }
        }
        group.push(bin);
    }
    if !group.is_empty() {
        peaks.push(collapse_group(&group));
    }

    Ok(peaks)
}

/// Collapse a group of adjacent above-threshold bins to its first
/// maximum-count member.
fn collapse_group(group: &[&TimeBin]) -> Peak {
    let repr = group
        .iter()
        .skip(1)
        .fold(group[0], |best, &bin| if bin.count > best.count { bin } else { best });

    Peak {
        start: repr.start,
        end: repr.end,
        count: repr.count,
        rate: repr.rate,
    }
}
