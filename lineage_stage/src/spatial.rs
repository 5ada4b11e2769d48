// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-node lookup for drop targets.

use hashbrown::HashMap;
use kurbo::Point;
use lineage_index::{Index, Key};
use lineage_tree::NodeId;

/// Spatial index of drawn node centers, keyed by [`NodeId`].
#[derive(Debug, Default)]
pub struct NodeIndex {
    index: Index<NodeId>,
    keys: HashMap<NodeId, Key>,
}

impl NodeIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `nodes`.
    pub fn rebuild<I: IntoIterator<Item = (NodeId, Point)>>(&mut self, nodes: I) {
        self.index.clear();
        self.keys.clear();
        for (id, p) in nodes {
            self.insert(id, p);
        }
        log::trace!("node index rebuilt with {} entries", self.keys.len());
    }

    /// Insert or move `id`.
    pub fn insert(&mut self, id: NodeId, point: Point) {
        match self.keys.get(&id) {
            Some(&key) => self.index.update(key, point),
            None => {
                let key = self.index.insert(point, id);
                self.keys.insert(id, key);
            }
        }
    }

    /// Remove `id`; returns whether it was present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.keys
            .remove(&id)
            .is_some_and(|key| self.index.remove(key).is_some())
    }

    /// Remove every id in `ids`.
    pub fn remove_all<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        for id in ids {
            self.remove(id);
        }
    }

    /// Whether `id` is indexed.
    pub fn contains(&self, id: NodeId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Indexed node nearest to `point`, optionally no farther than `radius`.
    pub fn nearest(&self, point: Point, radius: Option<f64>) -> Option<NodeId> {
        let hit = match radius {
            Some(r) => self.index.nearest_within(point, r),
            None => self.index.nearest(point),
        };
        hit.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use lineage_tree::{NodeData, Tree};

    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("r")).unwrap();
        let mut out = vec![root];
        for i in 1..n {
            out.push(tree.insert(Some(root), NodeData::named(format!("{i}"))).unwrap());
        }
        out
    }

    #[test]
    fn nearest_respects_removal_and_radius() {
        let ids = ids(3);
        let mut index = NodeIndex::new();
        index.rebuild([
            (ids[0], Point::new(0.0, 0.0)),
            (ids[1], Point::new(10.0, 0.0)),
            (ids[2], Point::new(100.0, 0.0)),
        ]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.nearest(Point::new(9.0, 0.0), None), Some(ids[1]));

        assert!(index.remove(ids[1]));
        assert!(!index.remove(ids[1]));
        assert_eq!(index.nearest(Point::new(9.0, 0.0), None), Some(ids[0]));
        assert_eq!(index.nearest(Point::new(50.0, 0.0), Some(5.0)), None);
    }

    #[test]
    fn insert_moves_existing_entries() {
        let ids = ids(2);
        let mut index = NodeIndex::new();
        index.insert(ids[0], Point::new(0.0, 0.0));
        index.insert(ids[1], Point::new(50.0, 0.0));
        index.insert(ids[0], Point::new(100.0, 0.0));
        assert_eq!(index.len(), 2);
        assert_eq!(index.nearest(Point::new(90.0, 0.0), None), Some(ids[0]));
    }
}
