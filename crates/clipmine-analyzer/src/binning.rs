//! Fixed-width time binning.
//!
//! Bin boundaries run from `floor(min_timestamp)` in `bin_size` steps until
//! they pass `ceil(max_timestamp)`. A timestamp falls in the half-open bin
//! `[b, b + bin_size)`; the final bin is closed on the right so the maximum
//! timestamp is always included. Produced sequences are sparse and
//! time-ordered — downstream gap and threshold logic relies on that, so
//! zero-count bins must stay omitted.

use std::collections::BTreeMap;

use clipmine_models::TimeBin;

/// Bin grid covering a timestamp range.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BinGrid {
    origin: f64,
    size: f64,
    bins: usize,
}

impl BinGrid {
    /// Grid covering `[min_ts, max_ts]` with `size`-second bins.
    ///
    /// `size` must be positive and finite; callers validate it.
    pub(crate) fn covering(min_ts: f64, max_ts: f64, size: f64) -> Self {
        let origin = min_ts.floor();
        let top = max_ts.ceil();
        let bins = (((top - origin) / size).ceil() as usize).max(1);
        Self { origin, size, bins }
    }

    /// Index of the bin containing `t`, clamping the top boundary into the
    /// final bin.
    pub(crate) fn index_of(&self, t: f64) -> usize {
        let idx = ((t - self.origin) / self.size).floor().max(0.0) as usize;
        idx.min(self.bins - 1)
    }

    /// Start of bin `idx`.
    pub(crate) fn start_of(&self, idx: usize) -> f64 {
        self.origin + idx as f64 * self.size
    }

    /// Width of every bin.
    pub(crate) fn size(&self) -> f64 {
        self.size
    }
}

/// Aggregate timestamps into sparse, ascending [`TimeBin`]s.
///
/// `timestamps` must already be ascending; the ends of the slice are taken
/// as the range bounds.
pub(crate) fn bin_timestamps(timestamps: &[f64], bin_size: f64) -> Vec<TimeBin> {
    let (Some(&first), Some(&last)) = (timestamps.first(), timestamps.last()) else {
        return Vec::new();
    };
    let grid = BinGrid::covering(first, last, bin_size);

    let mut counts: BTreeMap<usize, u64> = BTreeMap::new();
    for &t in timestamps {
        *counts.entry(grid.index_of(t)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(idx, count)| {
            let start = grid.start_of(idx);
            TimeBin {
                start,
                end: start + grid.size(),
                count,
                rate: count as f64 / grid.size(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_record_count() {
        let timestamps = [10.0, 15.0, 20.0, 25.0, 100.0, 105.0, 110.0];
        let bins = bin_timestamps(&timestamps, 30.0);

        let total: u64 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total as usize, timestamps.len());
    }

    #[test]
    fn test_zero_count_bins_are_omitted() {
        // Boundaries start at floor(min) = 10; only two of the four bins
        // covering 10..130 hold comments
        let timestamps = [10.0, 15.0, 20.0, 25.0, 100.0, 105.0, 110.0];
        let bins = bin_timestamps(&timestamps, 30.0);

        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].start, 10.0);
        assert_eq!(bins[0].end, 40.0);
        assert_eq!(bins[0].count, 4);
        assert_eq!(bins[1].start, 100.0);
        assert_eq!(bins[1].end, 130.0);
        assert_eq!(bins[1].count, 3);
    }

    #[test]
    fn test_bins_are_disjoint_and_uniform_width() {
        let timestamps = [0.5, 3.0, 9.9, 10.0, 10.1, 29.0, 31.0];
        let bins = bin_timestamps(&timestamps, 10.0);

        for pair in bins.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for bin in &bins {
            assert_eq!(bin.end - bin.start, 10.0);
            assert_eq!(bin.rate, bin.count as f64 / 10.0);
        }
    }

    #[test]
    fn test_max_timestamp_on_top_boundary_lands_in_final_bin() {
        // ceil(max) = 20 is the top boundary itself; the record at 20.0 must
        // be kept in the final bin rather than dropped
        let timestamps = [0.0, 20.0];
        let bins = bin_timestamps(&timestamps, 10.0);

        let total: u64 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
        assert_eq!(bins.last().unwrap().start, 10.0);
        assert_eq!(bins.last().unwrap().count, 1);
    }

    #[test]
    fn test_identical_timestamps_form_one_bin() {
        let bins = bin_timestamps(&[42.0, 42.0, 42.0], 10.0);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].start, 42.0);
    }
}
