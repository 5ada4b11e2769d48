// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived geometry: where nodes sit and how edges are shaped in each mode.

use kurbo::{Point, Vec2};
use lineage_path::{ControlPoints, PathData, PathError, ancient_path, elbow_path};
use lineage_tree::{NodeId, Tree};

use crate::{Mode, NodePlacement};

/// Borrowed view over the tree and the render-scaled control points.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scene<'a> {
    pub(crate) tree: &'a Tree,
    pub(crate) points: &'a ControlPoints,
    pub(crate) offset: Vec2,
}

impl Scene<'_> {
    /// Placement of `id` from the latest layout pass.
    pub(crate) fn placement(&self, id: NodeId, mode: Mode) -> Option<NodePlacement> {
        let center = match mode {
            Mode::Ancient => self.tree.ancient_center(id)?,
            Mode::Modern => self.tree.position(id)? + self.offset,
        };
        self.place_at(id, center)
    }

    /// Placement of `id` before the latest layout pass.
    pub(crate) fn previous_placement(&self, id: NodeId, mode: Mode) -> Option<NodePlacement> {
        let center = match mode {
            Mode::Ancient => self.tree.ancient_center(id)?,
            Mode::Modern => self.tree.previous_position(id)? + self.offset,
        };
        self.place_at(id, center)
    }

    /// `id`'s image centered on `center`.
    pub(crate) fn place_at(&self, id: NodeId, center: Point) -> Option<NodePlacement> {
        let size = self.tree.ancient_box(id)?.size();
        Some(NodePlacement { center, size })
    }

    /// Shape of the edge from `parent` into `child`.
    pub(crate) fn edge_path(
        &self,
        parent: NodeId,
        child: NodeId,
        mode: Mode,
    ) -> Result<PathData, PathError> {
        match mode {
            Mode::Ancient => {
                let ids = self
                    .tree
                    .data(child)
                    .map(|d| d.control_points.as_slice())
                    .unwrap_or_default();
                ancient_path(ids, self.points, true)
            }
            Mode::Modern => {
                let (Some(s), Some(t)) = (
                    self.placement(parent, Mode::Modern),
                    self.placement(child, Mode::Modern),
                ) else {
                    return Err(PathError::TooShort { len: 0 });
                };
                Ok(elbow_path(s.center, t.center))
            }
        }
    }

    /// Number of control points authored for the edge into `child`.
    pub(crate) fn control_point_count(&self, child: NodeId) -> usize {
        self.tree
            .data(child)
            .map_or(0, |d| d.control_points.len())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use lineage_tree::NodeData;

    use super::*;

    #[test]
    fn modern_placements_are_offset_layout_positions() {
        let mut tree = Tree::new();
        let root = tree
            .insert(
                None,
                NodeData {
                    position: Rect::new(0.0, 0.0, 20.0, 10.0),
                    ..NodeData::named("root")
                },
            )
            .unwrap();
        let points = ControlPoints::new();
        let scene = Scene {
            tree: &tree,
            points: &points,
            offset: Vec2::new(5.0, 7.0),
        };
        let modern = scene.placement(root, Mode::Modern).unwrap();
        assert_eq!(modern.center, Point::new(5.0, 7.0));
        let ancient = scene.placement(root, Mode::Ancient).unwrap();
        assert_eq!(ancient.center, Point::new(10.0, 5.0));
        assert_eq!(ancient.size, modern.size);
    }

    #[test]
    fn missing_control_point_is_reported() {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeData::named("root")).unwrap();
        let child = tree
            .insert(
                Some(root),
                NodeData {
                    control_points: vec!["1".into(), "2".into()],
                    ..NodeData::named("child")
                },
            )
            .unwrap();
        let points = ControlPoints::new();
        let scene = Scene {
            tree: &tree,
            points: &points,
            offset: Vec2::ZERO,
        };
        assert!(matches!(
            scene.edge_path(root, child, Mode::Ancient),
            Err(PathError::MissingControlPoint { .. })
        ));
        assert!(scene.edge_path(root, child, Mode::Modern).is_ok());
    }
}
