// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucketed point quadtree.
//!
//! Leaves hold up to [`LEAF_CAPACITY`] slots before splitting into four
//! quadrants, down to [`MAX_DEPTH`]. The root square starts around the first
//! point inserted and doubles whenever a point lands outside it; growing
//! rebuilds the tree from the stored positions.

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::backend::{Backend, closer, rect_contains};

/// Slots a leaf holds before it splits.
const LEAF_CAPACITY: usize = 8;

/// Leaves at this depth never split.
const MAX_DEPTH: usize = 16;

type Bucket = SmallVec<[usize; LEAF_CAPACITY]>;

#[derive(Clone, Debug)]
enum Node {
    Leaf(Bucket),
    Branch(Box<[Node; 4]>),
}

impl Default for Node {
    fn default() -> Self {
        Self::Leaf(Bucket::new())
    }
}

/// Quadrant of `rect` that `p` falls in: bit 0 set for the right half, bit 1 for the bottom half.
#[inline]
fn quadrant(rect: Rect, p: Point) -> usize {
    let c = rect.center();
    usize::from(p.x >= c.x) | (usize::from(p.y >= c.y) << 1)
}

#[inline]
fn child_rect(rect: Rect, q: usize) -> Rect {
    let c = rect.center();
    let (x0, x1) = if q & 1 == 0 { (rect.x0, c.x) } else { (c.x, rect.x1) };
    let (y0, y1) = if q & 2 == 0 { (rect.y0, c.y) } else { (c.y, rect.y1) };
    Rect::new(x0, y0, x1, y1)
}

/// Squared distance from `p` to the nearest point of `rect`.
#[inline]
fn rect_distance_sq(rect: Rect, p: Point) -> f64 {
    let dx = (rect.x0 - p.x).max(0.0).max(p.x - rect.x1);
    let dy = (rect.y0 - p.y).max(0.0).max(p.y - rect.y1);
    dx * dx + dy * dy
}

/// Point quadtree backend.
#[derive(Clone, Debug, Default)]
pub struct QuadTree {
    bounds: Option<Rect>,
    root: Node,
    points: Vec<Option<Point>>,
}

impl QuadTree {
    /// Create an empty tree whose root square covers `bounds`.
    ///
    /// Points outside `bounds` are still accepted; the root grows to fit.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds: Some(square_around(bounds)),
            ..Self::default()
        }
    }

    /// Current root square, if any point has been inserted or bounds were given.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Depth of the deepest leaf.
    pub fn depth(&self) -> usize {
        fn depth_of(node: &Node) -> usize {
            match node {
                Node::Leaf(_) => 0,
                Node::Branch(children) => 1 + children.iter().map(depth_of).max().unwrap_or(0),
            }
        }
        depth_of(&self.root)
    }

    fn grow_to(&mut self, p: Point) {
        let mut bounds = self
            .bounds
            .unwrap_or_else(|| Rect::from_center_size(p, Size::new(1.0, 1.0)));
        while !rect_contains(bounds, p) {
            let w = bounds.width();
            let h = bounds.height();
            let x0 = if p.x < bounds.x0 { bounds.x0 - w } else { bounds.x0 };
            let y0 = if p.y < bounds.y0 { bounds.y0 - h } else { bounds.y0 };
            bounds = Rect::new(x0, y0, x0 + 2.0 * w, y0 + 2.0 * h);
        }
        self.bounds = Some(bounds);
        log::trace!("quadtree bounds now {bounds:?}, rebuilding");
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.root = Node::default();
        let Some(bounds) = self.bounds else {
            return;
        };
        for (slot, p) in self.points.iter().enumerate() {
            if let Some(p) = p {
                insert_into(&mut self.root, bounds, 0, slot, *p, &self.points);
            }
        }
    }
}

fn square_around(rect: Rect) -> Rect {
    let side = rect.width().max(rect.height()).max(1.0);
    Rect::from_center_size(rect.center(), Size::new(side, side))
}

fn insert_into(
    node: &mut Node,
    rect: Rect,
    depth: usize,
    slot: usize,
    p: Point,
    points: &[Option<Point>],
) {
    match node {
        Node::Branch(children) => {
            let q = quadrant(rect, p);
            insert_into(&mut children[q], child_rect(rect, q), depth + 1, slot, p, points);
        }
        Node::Leaf(bucket) => {
            bucket.push(slot);
            if bucket.len() <= LEAF_CAPACITY || depth >= MAX_DEPTH {
                return;
            }
            let items = core::mem::take(bucket);
            let mut children: Box<[Node; 4]> = Box::default();
            for s in items {
                if let Some(Some(sp)) = points.get(s) {
                    let q = quadrant(rect, *sp);
                    insert_into(&mut children[q], child_rect(rect, q), depth + 1, s, *sp, points);
                }
            }
            *node = Node::Branch(children);
        }
    }
}

fn remove_from(node: &mut Node, rect: Rect, slot: usize, p: Point) {
    match node {
        Node::Branch(children) => {
            let q = quadrant(rect, p);
            remove_from(&mut children[q], child_rect(rect, q), slot, p);
            if children
                .iter()
                .all(|c| matches!(c, Node::Leaf(b) if b.is_empty()))
            {
                *node = Node::default();
            }
        }
        Node::Leaf(bucket) => bucket.retain(|s| *s != slot),
    }
}

fn visit_node<F: FnMut(usize)>(
    node: &Node,
    rect: Rect,
    query: Rect,
    points: &[Option<Point>],
    f: &mut F,
) {
    if rect.x0 > query.x1 || rect.x1 < query.x0 || rect.y0 > query.y1 || rect.y1 < query.y0 {
        return;
    }
    match node {
        Node::Leaf(bucket) => {
            for &slot in bucket {
                if let Some(Some(p)) = points.get(slot)
                    && rect_contains(query, *p)
                {
                    f(slot);
                }
            }
        }
        Node::Branch(children) => {
            for (q, child) in children.iter().enumerate() {
                visit_node(child, child_rect(rect, q), query, points, f);
            }
        }
    }
}

fn nearest_in(
    node: &Node,
    rect: Rect,
    target: Point,
    points: &[Option<Point>],
    limit_sq: f64,
    best: &mut Option<(usize, f64)>,
) {
    let bound = best.map_or(limit_sq, |(_, d)| d);
    if rect_distance_sq(rect, target) > bound {
        return;
    }
    match node {
        Node::Leaf(bucket) => {
            for &slot in bucket {
                if let Some(Some(p)) = points.get(slot) {
                    let d = p.distance_squared(target);
                    if d <= limit_sq && closer(*best, (slot, d)) {
                        *best = Some((slot, d));
                    }
                }
            }
        }
        Node::Branch(children) => {
            // Visit the quadrant holding the target first to tighten the bound early.
            let mut order: [(f64, usize); 4] =
                core::array::from_fn(|q| (rect_distance_sq(child_rect(rect, q), target), q));
            order.sort_by(|a, b| a.0.total_cmp(&b.0));
            for (_, q) in order {
                nearest_in(&children[q], child_rect(rect, q), target, points, limit_sq, best);
            }
        }
    }
}

impl Backend for QuadTree {
    fn insert(&mut self, slot: usize, point: Point) {
        if !point.is_finite() {
            log::warn!("ignoring non-finite point {point:?} for slot {slot}");
            self.remove(slot);
            return;
        }
        if slot >= self.points.len() {
            self.points.resize(slot + 1, None);
        }
        if let Some(old) = self.points[slot].take()
            && let Some(bounds) = self.bounds
        {
            remove_from(&mut self.root, bounds, slot, old);
        }
        self.points[slot] = Some(point);
        match self.bounds {
            Some(bounds) if rect_contains(bounds, point) => {
                insert_into(&mut self.root, bounds, 0, slot, point, &self.points);
            }
            _ => self.grow_to(point),
        }
    }

    fn remove(&mut self, slot: usize) {
        let Some(p) = self.points.get_mut(slot).and_then(Option::take) else {
            return;
        };
        if let Some(bounds) = self.bounds {
            remove_from(&mut self.root, bounds, slot, p);
        }
    }

    fn clear(&mut self) {
        self.root = Node::default();
        self.points.clear();
        self.bounds = None;
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if let Some(bounds) = self.bounds {
            visit_node(&self.root, bounds, rect, &self.points, &mut f);
        }
    }

    fn nearest(&self, point: Point, max_distance_sq: f64) -> Option<(usize, f64)> {
        let bounds = self.bounds?;
        let mut best = None;
        nearest_in(&self.root, bounds, point, &self.points, max_distance_sq, &mut best);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;

    /// Deterministic scatter without pulling in an RNG.
    fn scatter(n: usize) -> Vec<Point> {
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        (0..n)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let x = (state % 10_000) as f64 / 10.0;
                let y = ((state >> 20) % 10_000) as f64 / 10.0;
                Point::new(x, y)
            })
            .collect()
    }

    #[test]
    fn splits_and_finds_nearest() {
        let mut qt = QuadTree::default();
        let pts = scatter(200);
        for (i, p) in pts.iter().enumerate() {
            qt.insert(i, *p);
        }
        assert!(qt.depth() > 0);
        let mut flat = FlatVec::default();
        for (i, p) in pts.iter().enumerate() {
            flat.insert(i, *p);
        }
        for q in scatter(50).into_iter().map(|p| Point::new(p.y, p.x)) {
            assert_eq!(
                qt.nearest(q, f64::INFINITY),
                flat.nearest(q, f64::INFINITY)
            );
        }
    }

    #[test]
    fn grows_in_every_direction() {
        let mut qt = QuadTree::default();
        qt.insert(0, Point::new(0.0, 0.0));
        qt.insert(1, Point::new(-500.0, 20.0));
        qt.insert(2, Point::new(300.0, -900.0));
        qt.insert(3, Point::new(1e4, 1e4));
        let bounds = qt.bounds().unwrap();
        for p in [(0.0, 0.0), (-500.0, 20.0), (300.0, -900.0), (1e4, 1e4)] {
            assert!(rect_contains(bounds, Point::new(p.0, p.1)));
        }
        assert_eq!(qt.nearest(Point::new(-480.0, 0.0), f64::INFINITY).map(|(s, _)| s), Some(1));
    }

    #[test]
    fn remove_then_query() {
        let mut qt = QuadTree::with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        for i in 0..20 {
            qt.insert(i, Point::new(i as f64 * 5.0, 50.0));
        }
        qt.remove(10);
        let (slot, _) = qt.nearest(Point::new(50.0, 50.0), f64::INFINITY).unwrap();
        assert!(slot == 9 || slot == 11);
        // Equal distances: the lower slot wins.
        assert_eq!(slot, 9);

        let mut hits = Vec::new();
        qt.visit_rect(Rect::new(0.0, 0.0, 20.0, 100.0), |s| hits.push(s));
        hits.sort_unstable();
        assert_eq!(hits, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn radius_limits_results() {
        let mut qt = QuadTree::default();
        qt.insert(0, Point::new(0.0, 0.0));
        assert_eq!(qt.nearest(Point::new(3.0, 4.0), 24.0), None);
        assert_eq!(qt.nearest(Point::new(3.0, 4.0), 25.0), Some((0, 25.0)));
    }

    #[test]
    fn reinserting_a_slot_moves_it() {
        let mut qt = QuadTree::default();
        qt.insert(0, Point::new(0.0, 0.0));
        qt.insert(1, Point::new(10.0, 0.0));
        qt.insert(0, Point::new(20.0, 0.0));
        let mut hits = Vec::new();
        qt.visit_rect(Rect::new(-1.0, -1.0, 1.0, 1.0), |s| hits.push(s));
        assert!(hits.is_empty());
        assert_eq!(qt.nearest(Point::new(19.0, 0.0), f64::INFINITY), Some((0, 1.0)));
    }

    #[test]
    fn clear_forgets_bounds() {
        let mut qt = QuadTree::default();
        qt.insert(0, Point::new(5.0, 5.0));
        qt.clear();
        assert!(qt.bounds().is_none());
        assert!(qt.nearest(Point::ZERO, f64::INFINITY).is_none());
    }
}
