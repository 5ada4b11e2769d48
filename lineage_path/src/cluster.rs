// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsing near-duplicate coordinates onto shared representative values.

use smallvec::SmallVec;

/// How a cluster's representative value is derived from its members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeanRounding {
    /// The arithmetic mean of the members.
    #[default]
    Exact,
    /// The mean rounded to the nearest integer, halves rounding up.
    Nearest,
}

/// Cluster `values` and replace every member with its cluster's mean.
///
/// The values are sorted ascending, then grouped greedily: a value joins the
/// current group while its gap to the most recently added member is strictly
/// less than `threshold`. The result is parallel to the *sorted* input, not to
/// the original order.
///
/// Infinite values never join a group (their gap is NaN), so they survive
/// unchanged as singleton clusters.
///
/// ```
/// use lineage_path::cluster;
///
/// assert_eq!(cluster(&[100.0, 6.0, 5.0], 2.0), [5.5, 5.5, 100.0]);
/// ```
pub fn cluster(values: &[f64], threshold: f64) -> Vec<f64> {
    cluster_with(values, threshold, MeanRounding::Exact)
}

/// Like [`cluster`], with explicit control over how means are rounded.
pub fn cluster_with(values: &[f64], threshold: f64, rounding: MeanRounding) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut out = Vec::with_capacity(sorted.len());
    let mut group: SmallVec<[f64; 8]> = SmallVec::new();
    for v in sorted {
        if let Some(&last) = group.last()
            && (v - last).abs() >= threshold
        {
            flush(&mut group, rounding, &mut out);
        }
        // An infinite gap is NaN and compares false above.
        if let Some(&last) = group.last()
            && (v.is_infinite() || last.is_infinite())
        {
            flush(&mut group, rounding, &mut out);
        }
        group.push(v);
    }
    flush(&mut group, rounding, &mut out);
    out
}

fn flush(group: &mut SmallVec<[f64; 8]>, rounding: MeanRounding, out: &mut Vec<f64>) {
    if group.is_empty() {
        return;
    }
    let mean = group.iter().sum::<f64>() / group.len() as f64;
    let mean = match rounding {
        MeanRounding::Exact => mean,
        MeanRounding::Nearest => round_half_up(mean),
    };
    out.extend(core::iter::repeat_n(mean, group.len()));
    group.clear();
}

/// Round to the nearest integer with halves going toward positive infinity.
fn round_half_up(v: f64) -> f64 {
    if v.is_finite() { (v + 0.5).floor() } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_close_values_and_keeps_sorted_order() {
        assert_eq!(cluster(&[5.0, 6.0, 100.0], 2.0), [5.5, 5.5, 100.0]);
        assert_eq!(cluster(&[100.0, 5.0, 6.0], 2.0), [5.5, 5.5, 100.0]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let input = [3.0, 9.0, 3.5, 8.8, 40.0];
        assert_eq!(cluster(&input, 1.0), cluster(&input, 1.0));
    }

    #[test]
    fn gap_is_measured_from_last_member() {
        // 0 -> 1 -> 2 chain together even though 2 - 0 >= 1.5.
        assert_eq!(cluster(&[0.0, 1.0, 2.0], 1.5), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(cluster(&[0.0, 1.0], 1.0), [0.0, 1.0]);
    }

    #[test]
    fn nearest_rounding_rounds_halves_up() {
        assert_eq!(
            cluster_with(&[5.0, 6.0, 100.0], 2.0, MeanRounding::Nearest),
            [6.0, 6.0, 100.0]
        );
        assert_eq!(
            cluster_with(&[-3.0, -2.0], 2.0, MeanRounding::Nearest),
            [-2.0, -2.0]
        );
    }

    #[test]
    fn infinities_stay_singletons() {
        let out = cluster_with(
            &[f64::INFINITY, 196.0, f64::NEG_INFINITY, f64::INFINITY, 196.4],
            1.0,
            MeanRounding::Nearest,
        );
        assert_eq!(
            out,
            [
                f64::NEG_INFINITY,
                196.0,
                196.0,
                f64::INFINITY,
                f64::INFINITY
            ]
        );
    }

    #[test]
    fn empty_input() {
        assert!(cluster(&[], 1.0).is_empty());
    }
}
