// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two edge shapes: orthogonal elbows and traced control-point paths.

use kurbo::Point;
use smallvec::SmallVec;

use crate::{ControlPoints, PathData, PathError};

/// Points within this distance on an axis count as lying on the same rail.
pub const COLLINEAR_TOLERANCE: f64 = 1.0;

/// The 4-point orthogonal connector from `source` to `target`.
///
/// The path leaves `source` vertically, turns at half the vertical distance,
/// runs horizontally to `target.x`, then drops to `target`.
///
/// ```
/// use kurbo::Point;
/// use lineage_path::elbow_path;
///
/// let path = elbow_path(Point::new(0.0, 0.0), Point::new(40.0, 100.0));
/// assert_eq!(path.to_svg(), "M0,0L0,50L40,50L40,100");
/// ```
pub fn elbow_path(source: Point, target: Point) -> PathData {
    let mid_y = source.y + (target.y - source.y) / 2.0;
    PathData::from_points([
        source,
        Point::new(source.x, mid_y),
        Point::new(target.x, mid_y),
        target,
    ])
}

/// The traced path through the control points named by `ids`, in order.
///
/// With `prune` set, interior points lying on the same vertical or horizontal
/// rail as both of their neighbours (within [`COLLINEAR_TOLERANCE`]) are
/// dropped, so a straight run keeps only its two ends. Pruning repeats until
/// nothing more can be dropped. The first and last points are always kept.
///
/// Every id must resolve in `points`, and at least two ids are required.
pub fn ancient_path<S: AsRef<str>>(
    ids: &[S],
    points: &ControlPoints,
    prune: bool,
) -> Result<PathData, PathError> {
    if ids.len() < 2 {
        return Err(PathError::TooShort { len: ids.len() });
    }
    let mut resolved = ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            points
                .get(id)
                .ok_or_else(|| PathError::MissingControlPoint { id: id.to_owned() })
        })
        .collect::<Result<Vec<Point>, _>>()?;
    if prune {
        while prune_pass(&mut resolved) {}
    }
    Ok(PathData::from_points(resolved))
}

/// Drop every interior point that shares a rail with both neighbours.
///
/// Neighbours are judged on the list as it was when the pass started.
/// Returns whether anything was dropped.
fn prune_pass(points: &mut Vec<Point>) -> bool {
    let same_x = |a: Point, b: Point| (a.x - b.x).abs() <= COLLINEAR_TOLERANCE;
    let same_y = |a: Point, b: Point| (a.y - b.y).abs() <= COLLINEAR_TOLERANCE;

    let mut redundant: SmallVec<[usize; 8]> = SmallVec::new();
    for (i, w) in points.windows(3).enumerate() {
        let (prev, cur, next) = (w[0], w[1], w[2]);
        if (same_x(cur, prev) && same_x(cur, next)) || (same_y(cur, prev) && same_y(cur, next)) {
            redundant.push(i + 1);
        }
    }
    if redundant.is_empty() {
        return false;
    }
    let mut index = 0;
    points.retain(|_| {
        let keep = !redundant.contains(&index);
        index += 1;
        keep
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: &[(&str, (f64, f64))]) -> ControlPoints {
        entries
            .iter()
            .map(|&(id, (x, y))| (id.to_owned(), Point::new(x, y)))
            .collect()
    }

    #[test]
    fn elbow_turns_halfway_down() {
        let path = elbow_path(Point::new(10.0, 20.0), Point::new(30.0, 60.0));
        let pts: Vec<Point> = path.points().collect();
        assert_eq!(
            pts,
            [
                Point::new(10.0, 20.0),
                Point::new(10.0, 40.0),
                Point::new(30.0, 40.0),
                Point::new(30.0, 60.0),
            ]
        );
    }

    #[test]
    fn elbow_handles_upward_edges() {
        let path = elbow_path(Point::new(0.0, 100.0), Point::new(0.0, 0.0));
        assert_eq!(path.point(1), Some(Point::new(0.0, 50.0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn point_sharing_only_one_neighbour_rail_is_kept() {
        let d = dict(&[
            ("A", (0.0, 0.0)),
            ("B", (0.0, 50.0)),
            ("C", (50.0, 50.0)),
            ("D", (50.0, 100.0)),
        ]);
        let path = ancient_path(&["A", "B", "C", "D"], &d, true).unwrap();
        assert_eq!(path.to_svg(), "M0,0L0,50L50,50L50,100");
    }

    #[test]
    fn straight_runs_keep_their_ends() {
        let d = dict(&[
            ("1", (0.0, 0.0)),
            ("2", (0.5, 10.0)),
            ("3", (0.0, 20.0)),
            ("4", (0.0, 30.0)),
            ("5", (40.0, 30.0)),
        ]);
        let ids = ["1", "2", "3", "4", "5"];
        let pruned = ancient_path(&ids, &d, true).unwrap();
        assert_eq!(pruned.to_svg(), "M0,0L0,30L40,30");
        let raw = ancient_path(&ids, &d, false).unwrap();
        assert_eq!(raw.len(), 5);
    }

    #[test]
    fn pruning_settles_after_backtracking() {
        // Dropping (5,0) exposes (0,0) to two vertical neighbours.
        let d = dict(&[
            ("m", (0.0, -10.0)),
            ("k", (0.0, 0.0)),
            ("n", (5.0, 0.0)),
            ("p", (0.5, 0.5)),
            ("q", (0.5, 40.0)),
            ("r", (30.0, 40.0)),
        ]);
        let ids = ["m", "k", "n", "p", "q", "r"];
        let once = ancient_path(&ids, &d, true).unwrap();
        assert_eq!(once.to_svg(), "M0,-10L0.5,40L30,40");
        let twice = ancient_path(&["m", "q", "r"], &d, true).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn missing_control_point_is_reported() {
        let d = dict(&[("A", (0.0, 0.0))]);
        let err = ancient_path(&["A", "Z"], &d, true).unwrap_err();
        assert!(matches!(err, PathError::MissingControlPoint { ref id } if id == "Z"));
    }

    #[test]
    fn single_point_is_too_short() {
        let d = dict(&[("A", (0.0, 0.0))]);
        assert!(matches!(
            ancient_path(&["A"], &d, true),
            Err(PathError::TooShort { len: 1 })
        ));
    }
}
