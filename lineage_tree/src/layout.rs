// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tidy top-down layout of the visible tree.
//!
//! Subtrees are laid out bottom-up and packed left to right against the
//! contour of their earlier siblings. A subtree pushed away from a distant
//! sibling drags the siblings in between along proportionally, then each
//! parent is centered over its first and last child. Adjacent siblings are
//! kept [`TidyLayout::sibling_separation`] apart and adjacent cousins
//! [`TidyLayout::cousin_separation`] apart, in abstract units. The result is
//! then fitted into the layout size: depth maps linearly onto height, and the
//! leftmost and rightmost nodes are inset by half their separation.

use kurbo::{Point, Size};
use smallvec::SmallVec;

use crate::{NodeFlags, NodeId, Tree};

/// Nodes that appeared in or dropped out of the visible tree in one layout pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutDamage {
    /// Placed now, not placed by the previous pass.
    pub entered: Vec<NodeId>,
    /// Placed by the previous pass, hidden now.
    pub exited: Vec<NodeId>,
}

impl LayoutDamage {
    /// Whether visibility did not change.
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Tidy tree layout parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TidyLayout {
    /// Extent the tree is fitted into.
    pub size: Size,
    /// Separation between adjacent nodes sharing a parent.
    pub sibling_separation: f64,
    /// Separation between adjacent nodes with different parents.
    pub cousin_separation: f64,
}

impl TidyLayout {
    /// A layout fitted into `size` with separations 1 and 2.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            sibling_separation: 1.0,
            cousin_separation: 2.0,
        }
    }

    /// Lay out the visible tree, storing positions on the nodes.
    ///
    /// Hidden nodes keep their old positions. Returns which nodes became
    /// visible or hidden relative to the previous pass.
    ///
    /// ```
    /// use kurbo::{Point, Size};
    /// use lineage_tree::{NodeData, TidyLayout, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(None, NodeData::named("root")).unwrap();
    /// let a = tree.insert(Some(root), NodeData::named("a")).unwrap();
    /// let b = tree.insert(Some(root), NodeData::named("b")).unwrap();
    ///
    /// let damage = TidyLayout::new(Size::new(300.0, 100.0)).apply(&mut tree);
    /// assert_eq!(damage.entered, [root, a, b]);
    /// assert_eq!(tree.position(root), Some(Point::new(150.0, 0.0)));
    /// assert_eq!(tree.position(a), Some(Point::new(75.0, 100.0)));
    /// assert_eq!(tree.position(b), Some(Point::new(225.0, 100.0)));
    /// ```
    pub fn apply(&self, tree: &mut Tree) -> LayoutDamage {
        let visible = tree.root().map(|r| tree.visible_descendants(r)).unwrap_or_default();

        let mut damage = LayoutDamage::default();
        let mut now_visible = vec![false; tree.len()];
        for &id in &visible {
            now_visible[id.idx()] = true;
            if !tree.flags(id).unwrap_or_default().contains(NodeFlags::VISIBLE) {
                damage.entered.push(id);
            }
        }
        for id in tree.ids().collect::<Vec<_>>() {
            let was = tree.flags(id).unwrap_or_default().contains(NodeFlags::VISIBLE);
            if was && !now_visible[id.idx()] {
                damage.exited.push(id);
            }
            tree.set_flags(id, NodeFlags::VISIBLE, now_visible[id.idx()]);
        }

        let Some(root) = tree.root() else {
            return damage;
        };
        let mut rel = vec![0.0; tree.len()];
        self.place(tree, root, &mut rel);

        // Resolve relative offsets top-down; `visible` is in pre-order.
        let mut abs = vec![0.0; tree.len()];
        let mut depth = vec![0_usize; tree.len()];
        for &id in &visible {
            if let Some(p) = tree.parent(id) {
                abs[id.idx()] = abs[p.idx()] + rel[id.idx()];
                depth[id.idx()] = depth[p.idx()] + 1;
            }
        }

        let (mut left, mut right, mut bottom) = (root, root, 0_usize);
        for &id in &visible {
            if abs[id.idx()] < abs[left.idx()] {
                left = id;
            }
            if abs[id.idx()] > abs[right.idx()] {
                right = id;
            }
            bottom = bottom.max(depth[id.idx()]);
        }
        let s = if left == right {
            1.0
        } else {
            self.separation(tree, left, right) / 2.0
        };
        let tx = s - abs[left.idx()];
        let kx = self.size.width / (abs[right.idx()] + s + tx);
        let ky = self.size.height / bottom.max(1) as f64;

        for &id in &visible {
            let y = depth[id.idx()] as f64 * ky;
            tree.set_position(id, Point::new((abs[id.idx()] + tx) * kx, y));
        }
        log::debug!(
            "layout placed {} nodes ({} entered, {} exited)",
            visible.len(),
            damage.entered.len(),
            damage.exited.len()
        );
        damage
    }

    fn separation(&self, tree: &Tree, a: NodeId, b: NodeId) -> f64 {
        if tree.parent(a) == tree.parent(b) {
            self.sibling_separation
        } else {
            self.cousin_separation
        }
    }

    /// Lay out the subtree at `id` with `id` at 0, writing each visible
    /// child's offset from its parent into `rel`. Returns the subtree's
    /// `(min, max)` extent per depth, starting with `id`'s own row.
    ///
    /// When a child is pushed right by a conflict with a non-adjacent earlier
    /// sibling, the push is spread evenly over the siblings in between.
    fn place(&self, tree: &Tree, id: NodeId, rel: &mut [f64]) -> Vec<(f64, f64)> {
        let children = tree
            .children(id)
            .map(|c| c.visible().to_vec())
            .unwrap_or_default();
        if children.is_empty() {
            return vec![(0.0, 0.0)];
        }

        let mut offsets: SmallVec<[f64; 8]> = SmallVec::new();
        let mut contours: Vec<Vec<(f64, f64)>> = Vec::with_capacity(children.len());
        for &child in &children {
            let contour = self.place(tree, child, rel);
            let i = offsets.len();
            let mut x = offsets.last().map_or(0.0, |&prev| prev + self.sibling_separation);
            for (d, &(lo, _)) in contour.iter().enumerate().skip(1) {
                let Some((owner, right)) = rightmost(&contours, &offsets, d) else {
                    break;
                };
                let push = right + self.cousin_separation - lo - x;
                if push <= 0.0 {
                    continue;
                }
                x += push;
                let span = (i - owner) as f64;
                for (k, offset) in offsets.iter_mut().enumerate().skip(owner + 1) {
                    *offset += push * (k - owner) as f64 / span;
                }
            }
            offsets.push(x);
            contours.push(contour);
        }

        let mid = (offsets[0] + offsets[offsets.len() - 1]) / 2.0;
        let mut extent: Vec<(f64, f64)> = vec![(0.0, 0.0)];
        for ((&child, contour), &x) in children.iter().zip(&contours).zip(&offsets) {
            rel[child.idx()] = x - mid;
            for (d, &(lo, hi)) in contour.iter().enumerate() {
                let (lo, hi) = (lo + x - mid, hi + x - mid);
                match extent.get_mut(d + 1) {
                    Some(row) => *row = (row.0.min(lo), row.1.max(hi)),
                    None => extent.push((lo, hi)),
                }
            }
        }
        extent
    }
}

/// The earlier sibling reaching furthest right at `depth`, with that extent.
fn rightmost(contours: &[Vec<(f64, f64)>], offsets: &[f64], depth: usize) -> Option<(usize, f64)> {
    contours
        .iter()
        .zip(offsets)
        .enumerate()
        .filter_map(|(k, (contour, &x))| contour.get(depth).map(|&(_, hi)| (k, x + hi)))
        .fold(None, |best, (k, hi)| match best {
            Some((_, right)) if right > hi => best,
            _ => Some((k, hi)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeData;

    fn chain(tree: &mut Tree, parent: NodeId, names: &[&str]) -> Vec<NodeId> {
        names
            .iter()
            .map(|n| tree.insert(Some(parent), NodeData::named(*n)).unwrap())
            .collect()
    }

    #[test]
    fn single_node_is_centered() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        TidyLayout::new(Size::new(200.0, 100.0)).apply(&mut tree);
        assert_eq!(tree.position(root), Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn cousins_sit_further_apart_than_siblings() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let ab = chain(&mut tree, root, &["a", "b"]);
        let a_kids = chain(&mut tree, ab[0], &["a1", "a2"]);
        let b_kids = chain(&mut tree, ab[1], &["b1", "b2"]);
        TidyLayout::new(Size::new(600.0, 200.0)).apply(&mut tree);

        let x = |id: NodeId| tree.position(id).unwrap().x;
        let sibling_gap = x(a_kids[1]) - x(a_kids[0]);
        let cousin_gap = x(b_kids[0]) - x(a_kids[1]);
        assert!((cousin_gap - 2.0 * sibling_gap).abs() < 1e-9);
        // Parents are centered over their children.
        assert!((x(ab[0]) - (x(a_kids[0]) + x(a_kids[1])) / 2.0).abs() < 1e-9);
        assert!((x(root) - (x(ab[0]) + x(ab[1])) / 2.0).abs() < 1e-9);
        // Leaves span the width with half-separation insets.
        assert!((x(a_kids[0]) - 100.0).abs() < 1e-9);
        assert!((x(b_kids[1]) - 500.0).abs() < 1e-9);
        assert_eq!(tree.position(a_kids[0]).unwrap().y, 200.0);
        assert_eq!(tree.position(ab[0]).unwrap().y, 100.0);
    }

    #[test]
    fn subtrees_do_not_overlap() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let top = chain(&mut tree, root, &["a", "b", "c"]);
        // A wide subtree under `a` and a deep one under `c`.
        chain(&mut tree, top[0], &["a1", "a2", "a3", "a4"]);
        let c1 = chain(&mut tree, top[2], &["c1"])[0];
        chain(&mut tree, c1, &["c11", "c12", "c13"]);
        TidyLayout::new(Size::new(1000.0, 300.0)).apply(&mut tree);

        let visible = tree.visible_descendants(root);
        for &a in &visible {
            for &b in &visible {
                if a != b && tree.depth(a) == tree.depth(b) {
                    let (pa, pb) = (tree.position(a).unwrap(), tree.position(b).unwrap());
                    assert!((pa.x - pb.x).abs() > 1e-6, "{a} and {b} overlap");
                }
            }
        }
    }

    #[test]
    fn narrow_middle_sibling_is_spread_between_wide_neighbours() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let top = chain(&mut tree, root, &["a", "b", "c"]);
        chain(&mut tree, top[0], &["a1", "a2", "a3", "a4"]);
        chain(&mut tree, top[2], &["c1", "c2", "c3", "c4"]);
        TidyLayout::new(Size::new(1000.0, 100.0)).apply(&mut tree);

        let x = |id: NodeId| tree.position(id).unwrap().x;
        let (a, b, c) = (x(top[0]), x(top[1]), x(top[2]));
        assert!((b - 500.0).abs() < 1e-9, "b at {b}");
        assert!(((b - a) - (c - b)).abs() < 1e-9, "a={a} b={b} c={c}");
        assert!((x(root) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn damage_tracks_visibility() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let kids = chain(&mut tree, root, &["a", "b"]);
        let layout = TidyLayout::new(Size::new(100.0, 100.0));
        assert_eq!(layout.apply(&mut tree).entered.len(), 3);
        assert!(layout.apply(&mut tree).is_empty());

        tree.collapse(root).unwrap();
        let damage = layout.apply(&mut tree);
        assert_eq!(damage.exited, kids);
        assert!(damage.entered.is_empty());

        tree.expand(root).unwrap();
        assert_eq!(layout.apply(&mut tree).entered, kids);
    }

    #[test]
    fn commit_snapshots_previous_positions() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let layout = TidyLayout::new(Size::new(100.0, 100.0));
        layout.apply(&mut tree);
        assert_eq!(tree.previous_position(root), Some(Point::ZERO));
        tree.commit_positions();
        assert_eq!(tree.previous_position(root), tree.position(root));
    }
}
