// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sampled-polyline interpolation between two paths.

use kurbo::{Line, ParamCurve, Point};

use crate::PathData;

/// Default spacing between samples, in canvas units.
pub const DEFAULT_PRECISION: f64 = 4.0;

/// Upper bound on samples per morph.
const MAX_SAMPLES: usize = 4096;

/// An interpolation from one path to another.
///
/// Both paths are resampled into paired point lists once, up front; each frame
/// is then a pointwise lerp. Intermediate frames are polylines through those
/// samples. At ratio 1 the exact target path is returned, never the sampled
/// approximation.
///
/// When both paths have the same number of commands, samples are taken per
/// segment so that corresponding vertices stay paired throughout. Otherwise
/// both paths are sampled uniformly by arc length.
///
/// ```
/// use kurbo::Point;
/// use lineage_path::{PathData, PathMorph};
///
/// let from = PathData::from_points([Point::new(0.0, 0.0), Point::new(0.0, 8.0)]);
/// let to = PathData::from_points([Point::new(8.0, 0.0), Point::new(8.0, 8.0)]);
/// let morph = PathMorph::new(&from, &to, 4.0);
/// let halfway = morph.at(0.5);
/// assert!(halfway.points().all(|p| p.x == 4.0));
/// assert_eq!(morph.at(1.0), to);
/// ```
#[derive(Clone, Debug)]
pub struct PathMorph {
    from: Vec<Point>,
    to: Vec<Point>,
    target: PathData,
}

impl PathMorph {
    /// Prepare a morph from `from` to `to`, sampling roughly every `precision` units.
    ///
    /// A non-positive or non-finite `precision` falls back to [`DEFAULT_PRECISION`].
    pub fn new(from: &PathData, to: &PathData, precision: f64) -> Self {
        let precision = if precision.is_finite() && precision > 0.0 {
            precision
        } else {
            DEFAULT_PRECISION
        };
        let (from_samples, to_samples) = if from.is_empty() || to.is_empty() {
            let pts: Vec<Point> = to.points().collect();
            (pts.clone(), pts)
        } else if from.len() == to.len() {
            sample_aligned(from, to, precision)
        } else {
            sample_uniform(from, to, precision)
        };
        Self {
            from: from_samples,
            to: to_samples,
            target: to.clone(),
        }
    }

    /// The path at `ratio` in `[0, 1]`.
    pub fn at(&self, ratio: f64) -> PathData {
        if ratio >= 1.0 {
            return self.target.clone();
        }
        let ratio = ratio.max(0.0);
        PathData::from_points(
            self.from
                .iter()
                .zip(&self.to)
                .map(|(a, b)| a.lerp(*b, ratio)),
        )
    }

    /// The exact path this morph ends on.
    pub fn target(&self) -> &PathData {
        &self.target
    }

    /// Number of paired samples.
    pub fn sample_count(&self) -> usize {
        self.from.len()
    }
}

fn sample_aligned(from: &PathData, to: &PathData, precision: f64) -> (Vec<Point>, Vec<Point>) {
    let a: Vec<Point> = from.points().collect();
    let b: Vec<Point> = to.points().collect();
    let per_segment = MAX_SAMPLES / a.len().max(1);
    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    for (wa, wb) in a.windows(2).zip(b.windows(2)) {
        let la = Line::new(wa[0], wa[1]);
        let lb = Line::new(wb[0], wb[1]);
        let longest = wa[0].distance(wa[1]).max(wb[0].distance(wb[1]));
        let steps = step_count(longest / precision, per_segment);
        for j in 0..steps {
            let t = j as f64 / steps as f64;
            out_a.push(la.eval(t));
            out_b.push(lb.eval(t));
        }
    }
    out_a.extend(a.last().copied());
    out_b.extend(b.last().copied());
    (out_a, out_b)
}

fn sample_uniform(from: &PathData, to: &PathData, precision: f64) -> (Vec<Point>, Vec<Point>) {
    let n0 = from.length();
    let n1 = to.length();
    let longest = n0.max(n1);
    let steps = step_count(longest / precision, MAX_SAMPLES);
    let at = |path: &PathData, len: f64, t: f64| path.point_at_length(t * len);
    (0..=steps)
        .filter_map(|j| {
            let t = j as f64 / steps as f64;
            Some((at(from, n0, t)?, at(to, n1, t)?))
        })
        .unzip()
}

/// `ceil(raw)` clamped to `1..=max`.
fn step_count(raw: f64, max: usize) -> usize {
    if !raw.is_finite() || raw <= 1.0 {
        return 1;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Clamped to `max` before the cast matters."
    )]
    let steps = raw.ceil().min(max as f64) as usize;
    steps.max(1)
}
