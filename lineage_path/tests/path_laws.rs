// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for path construction, reconciliation, and clustering.

use kurbo::Point;
use lineage_path::{
    ControlPoints, MeanRounding, PathData, PathMorph, ancient_path, cluster, cluster_with,
    elbow_path, reconcile,
};
use proptest::prelude::*;

/// Coordinates on a coarse grid so that shared rails come up often.
fn coords(len: core::ops::Range<usize>) -> impl Strategy<Value = Vec<(i16, i16)>> {
    prop::collection::vec((0_i16..12, 0_i16..12), len)
}

fn dictionary(coords: &[(i16, i16)]) -> (ControlPoints, Vec<String>) {
    let mut points = ControlPoints::new();
    let mut ids = Vec::new();
    for (i, &(x, y)) in coords.iter().enumerate() {
        let id = format!("p{i}");
        points.insert(id.clone(), Point::new(f64::from(x) * 10.0, f64::from(y) * 10.0));
        ids.push(id);
    }
    (points, ids)
}

fn redictionary(path: &PathData) -> (ControlPoints, Vec<String>) {
    let mut points = ControlPoints::new();
    let mut ids = Vec::new();
    for (i, p) in path.points().enumerate() {
        let id = format!("q{i}");
        points.insert(id.clone(), p);
        ids.push(id);
    }
    (points, ids)
}

proptest! {
    #[test]
    fn pruning_is_idempotent(cs in coords(2..14)) {
        let (points, ids) = dictionary(&cs);
        let once = ancient_path(&ids, &points, true).unwrap();
        let (points2, ids2) = redictionary(&once);
        let twice = ancient_path(&ids2, &points2, true).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn endpoints_survive_pruning(cs in coords(2..14), prune in any::<bool>()) {
        let (points, ids) = dictionary(&cs);
        let path = ancient_path(&ids, &points, prune).unwrap();
        prop_assert_eq!(path.first_point(), points.get(&ids[0]));
        prop_assert_eq!(path.last_point(), points.get(&ids[ids.len() - 1]));
        prop_assert!(path.len() >= 2);
        prop_assert!(path.len() <= ids.len());
    }

    #[test]
    fn reconciled_elbow_matches_traced_count(
        cs in coords(4..16),
        source in (0_i16..100, 0_i16..100),
        target in (0_i16..100, 0_i16..100),
        extra in 0_usize..6,
    ) {
        let (points, ids) = dictionary(&cs);
        let ancient = ancient_path(&ids, &points, false).unwrap();
        let elbow = elbow_path(
            Point::new(f64::from(source.0), f64::from(source.1)),
            Point::new(f64::from(target.0), f64::from(target.1)),
        );
        let out = reconcile(&elbow, &ancient, ancient.len() + extra).unwrap();
        prop_assert_eq!(out.len(), ancient.len());
        prop_assert_eq!(out.first_point(), elbow.first_point());
        prop_assert_eq!(out.last_point(), elbow.last_point());

        // Inserted points never leave the elbow's horizontal segment.
        let (a, b) = (elbow.point(1).unwrap(), elbow.point(2).unwrap());
        let (lo, hi) = (a.x.min(b.x), a.x.max(b.x));
        for p in out.points().skip(2).take(ancient.len() - 4) {
            prop_assert!(p.x >= lo - 1e-9 && p.x <= hi + 1e-9);
            prop_assert!((p.y - a.y).abs() < 1e-9);
        }
    }

    #[test]
    fn four_command_traced_path_leaves_elbow_alone(
        cs in coords(4..5),
        target in (0_i16..100, 0_i16..100),
    ) {
        let (points, ids) = dictionary(&cs);
        let ancient = ancient_path(&ids, &points, false).unwrap();
        let elbow = elbow_path(Point::ORIGIN, Point::new(f64::from(target.0), f64::from(target.1)));
        prop_assert_eq!(reconcile(&elbow, &ancient, 4).unwrap(), elbow);
    }

    #[test]
    fn clustering_is_deterministic_and_ordered(
        values in prop::collection::vec(-500.0_f64..500.0, 0..24),
        threshold in 0.5_f64..20.0,
        nearest in any::<bool>(),
    ) {
        let rounding = if nearest { MeanRounding::Nearest } else { MeanRounding::Exact };
        let a = cluster_with(&values, threshold, rounding);
        let b = cluster_with(&values, threshold, rounding);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), values.len());
        prop_assert!(a.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn morph_ends_on_exact_target(
        from in coords(2..8),
        to in coords(2..8),
        precision in 1.0_f64..16.0,
    ) {
        let (fp, fi) = dictionary(&from);
        let (tp, ti) = dictionary(&to);
        let from = ancient_path(&fi, &fp, false).unwrap();
        let to = ancient_path(&ti, &tp, false).unwrap();
        let morph = PathMorph::new(&from, &to, precision);
        prop_assert_eq!(morph.at(1.0), to);
        prop_assert_eq!(morph.at(0.0).first_point(), from.first_point());
    }
}

#[test]
fn cluster_example() {
    assert_eq!(cluster(&[5.0, 6.0, 100.0], 2.0), [5.5, 5.5, 100.0]);
}

#[test]
fn abcd_scenario_keeps_every_point() {
    let mut points = ControlPoints::new();
    points.insert("A", Point::new(0.0, 0.0));
    points.insert("B", Point::new(0.0, 50.0));
    points.insert("C", Point::new(50.0, 50.0));
    points.insert("D", Point::new(50.0, 100.0));
    let path = ancient_path(&["A", "B", "C", "D"], &points, true).unwrap();
    let visited: Vec<Point> = path.points().collect();
    assert_eq!(
        visited,
        [
            Point::new(0.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(50.0, 50.0),
            Point::new(50.0, 100.0),
        ]
    );
}
