// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend: linear scans over every live slot.

use kurbo::{Point, Rect};

use crate::backend::{Backend, closer, rect_contains};

/// Linear-scan backend.
#[derive(Clone, Debug, Default)]
pub struct FlatVec {
    points: Vec<Option<Point>>,
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, point: Point) {
        if slot >= self.points.len() {
            self.points.resize(slot + 1, None);
        }
        self.points[slot] = Some(point);
    }

    fn remove(&mut self, slot: usize) {
        if let Some(p) = self.points.get_mut(slot) {
            *p = None;
        }
    }

    fn clear(&mut self) {
        self.points.clear();
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        for (slot, p) in self.points.iter().enumerate() {
            if let Some(p) = p
                && rect_contains(rect, *p)
            {
                f(slot);
            }
        }
    }

    fn nearest(&self, point: Point, max_distance_sq: f64) -> Option<(usize, f64)> {
        let mut best = None;
        for (slot, p) in self.points.iter().enumerate() {
            let Some(p) = p else { continue };
            let d = p.distance_squared(point);
            if d <= max_distance_sq && closer(best, (slot, d)) {
                best = Some((slot, d));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_skips_removed_slots() {
        let mut b = FlatVec::default();
        b.insert(0, Point::new(0.0, 0.0));
        b.insert(3, Point::new(10.0, 0.0));
        assert_eq!(b.nearest(Point::new(1.0, 0.0), f64::INFINITY), Some((0, 1.0)));
        b.remove(0);
        assert_eq!(b.nearest(Point::new(1.0, 0.0), f64::INFINITY), Some((3, 81.0)));
        assert_eq!(b.nearest(Point::new(1.0, 0.0), 4.0), None);
    }
}
