// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equalizing command counts between an elbow and a traced path.

use kurbo::{Line, ParamCurve};
use smallvec::SmallVec;

use crate::{MeanRounding, PathData, PathError, cluster_with};

/// Interior points this close to the traced path's outer interior points are pinned to them.
pub const PIN_TOLERANCE: f64 = 2.0;

/// Interior x coordinates this close are treated as one vertical rail.
pub const RAIL_TOLERANCE: f64 = 1.0;

/// Insert synthetic points into `elbow` until it has as many commands as `ancient`.
///
/// The new points lie on the elbow's horizontal segment (between its second and
/// third commands) and are placed according to where the traced path's interior
/// points sit horizontally, so that morphing between the two paths keeps points
/// that share a vertical rail together.
///
/// `control_point_count` is the number of authored control points behind
/// `ancient` before any pruning; it decides how many slots the segment is
/// divided into.
///
/// When `ancient` has 4 commands or fewer the elbow is returned unchanged.
///
/// ```
/// use kurbo::Point;
/// use lineage_path::{PathData, elbow_path, reconcile};
///
/// let elbow = elbow_path(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
/// let ancient = PathData::from_points([
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 40.0),
///     Point::new(30.0, 45.0),
///     Point::new(100.0, 55.0),
///     Point::new(100.0, 100.0),
/// ]);
/// let equalized = reconcile(&elbow, &ancient, 5).unwrap();
/// assert_eq!(equalized.len(), ancient.len());
/// ```
pub fn reconcile(
    elbow: &PathData,
    ancient: &PathData,
    control_point_count: usize,
) -> Result<PathData, PathError> {
    let n = ancient.len();
    if n <= 4 {
        if n < 4 {
            log::trace!("no synthetic points for a {n}-command traced path");
        }
        return Ok(elbow.clone());
    }
    let num_to_add = n - 4;

    let (Some(start), Some(end)) = (elbow.point(1), elbow.point(2)) else {
        return Err(PathError::TooShort { len: elbow.len() });
    };
    let segment = Line::new(start, end);

    let points: SmallVec<[f64; 16]> = ancient.points().map(|p| p.x).collect();
    let first_x = points[1];
    let last_x = points[n - 2];
    let min_x = first_x.min(last_x);
    let max_x = first_x.max(last_x);

    let mut tagged: SmallVec<[f64; 16]> = points[2..2 + num_to_add]
        .iter()
        .map(|&x| {
            if x < min_x || (x - min_x).abs() < PIN_TOLERANCE {
                f64::NEG_INFINITY
            } else if x > max_x || (x - max_x).abs() < PIN_TOLERANCE {
                f64::INFINITY
            } else {
                x
            }
        })
        .collect();
    tagged.sort_by(|a, b| b.total_cmp(a));
    let clustered = cluster_with(&tagged, RAIL_TOLERANCE, MeanRounding::Nearest);

    let mut ranks: SmallVec<[f64; 16]> = clustered
        .iter()
        .copied()
        .filter(|x| x.is_finite())
        .collect();
    ranks.sort_by(|a, b| b.total_cmp(a));
    ranks.dedup();

    let slots = match control_point_count.checked_sub(n) {
        Some(pruned) => pruned + 1,
        None => num_to_add,
    };
    let (slots, divisions) = (slots as f64, (slots + 1) as f64);

    // Pinned points follow whichever end of the traced path they sit beside.
    let slot_of = |x: f64| -> f64 {
        if x == f64::NEG_INFINITY {
            if first_x < last_x { 0.0 } else { slots + 1.0 }
        } else if x == f64::INFINITY {
            if first_x > last_x { 0.0 } else { slots + 1.0 }
        } else {
            (ranks.iter().position(|&r| r == x).unwrap_or(0) + 1) as f64
        }
    };

    let inserted = clustered.iter().map(|&x| {
        let t = slot_of(x) / divisions;
        if !(0.0..=1.0).contains(&t) {
            log::trace!("slot position {t} outside the segment, clamping");
        }
        segment.eval(t.clamp(0.0, 1.0))
    });

    let mut out = elbow.clone();
    out.insert_points(2, inserted);
    Ok(out)
}
