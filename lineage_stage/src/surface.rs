// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering surfaces that receive node placements and edge paths.
//!
//! The session never draws anything itself. Every frame it pushes node
//! placements and edge paths through [`Surface`]; a retained scene graph, an
//! immediate-mode canvas, or a test recorder implement it. [`Fanout`] feeds
//! several surfaces from one session so they stay in lockstep.

use kurbo::{Point, Rect, Size};
use lineage_path::PathData;
use lineage_tree::NodeId;

/// Where a node is drawn: its box center and size in render coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePlacement {
    /// Center of the node's image.
    pub center: Point,
    /// Size of the node's image.
    pub size: Size,
}

impl NodePlacement {
    /// The drawn rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    /// Interpolate center and size.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            center: self.center.lerp(other.center, t),
            size: self.size.to_vec2().lerp(other.size.to_vec2(), t).to_size(),
        }
    }
}

/// A sink for node placements and edge shapes.
///
/// Edges are identified by their child node.
pub trait Surface {
    /// Show `id` at `placement`.
    fn place_node(&mut self, id: NodeId, placement: NodePlacement);

    /// Stop showing `id`.
    fn hide_node(&mut self, id: NodeId);

    /// Show the edge into `child` with shape `path`.
    fn draw_edge(&mut self, child: NodeId, path: &PathData);

    /// Stop showing the edge into `child`.
    fn hide_edge(&mut self, child: NodeId);

    /// Show the drag connector, or remove it with `None`.
    fn show_connector(&mut self, path: Option<&PathData>);

    /// Emphasize the nodes in `path` and the edges into them.
    ///
    /// An empty slice clears emphasis.
    fn set_highlight(&mut self, path: &[NodeId]) {
        let _ = path;
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn place_node(&mut self, id: NodeId, placement: NodePlacement) {
        (**self).place_node(id, placement);
    }

    fn hide_node(&mut self, id: NodeId) {
        (**self).hide_node(id);
    }

    fn draw_edge(&mut self, child: NodeId, path: &PathData) {
        (**self).draw_edge(child, path);
    }

    fn hide_edge(&mut self, child: NodeId) {
        (**self).hide_edge(child);
    }

    fn show_connector(&mut self, path: Option<&PathData>) {
        (**self).show_connector(path);
    }

    fn set_highlight(&mut self, path: &[NodeId]) {
        (**self).set_highlight(path);
    }
}

/// Forwards every call to each of its surfaces, in order.
#[derive(Default)]
pub struct Fanout<'a> {
    surfaces: Vec<&'a mut dyn Surface>,
}

impl core::fmt::Debug for Fanout<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fanout")
            .field("surfaces", &self.surfaces.len())
            .finish()
    }
}

impl<'a> Fanout<'a> {
    /// An empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface.
    pub fn with(mut self, surface: &'a mut dyn Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Number of surfaces fed.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surfaces are attached.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl Surface for Fanout<'_> {
    fn place_node(&mut self, id: NodeId, placement: NodePlacement) {
        for s in &mut self.surfaces {
            s.place_node(id, placement);
        }
    }

    fn hide_node(&mut self, id: NodeId) {
        for s in &mut self.surfaces {
            s.hide_node(id);
        }
    }

    fn draw_edge(&mut self, child: NodeId, path: &PathData) {
        for s in &mut self.surfaces {
            s.draw_edge(child, path);
        }
    }

    fn hide_edge(&mut self, child: NodeId) {
        for s in &mut self.surfaces {
            s.hide_edge(child);
        }
    }

    fn show_connector(&mut self, path: Option<&PathData>) {
        for s in &mut self.surfaces {
            s.show_connector(path);
        }
    }

    fn set_highlight(&mut self, path: &[NodeId]) {
        for s in &mut self.surfaces {
            s.set_highlight(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Count {
        placed: usize,
        edges: usize,
        connector: Option<bool>,
    }

    impl Surface for Count {
        fn place_node(&mut self, _: NodeId, _: NodePlacement) {
            self.placed += 1;
        }
        fn hide_node(&mut self, _: NodeId) {}
        fn draw_edge(&mut self, _: NodeId, _: &PathData) {
            self.edges += 1;
        }
        fn hide_edge(&mut self, _: NodeId) {}
        fn show_connector(&mut self, path: Option<&PathData>) {
            self.connector = Some(path.is_some());
        }
    }

    #[test]
    fn fanout_feeds_every_surface() {
        let mut a = Count::default();
        let mut b = Count::default();
        let mut tree = lineage_tree::Tree::new();
        let root = tree
            .insert(None, lineage_tree::NodeData::named("r"))
            .unwrap();
        {
            let mut fan = Fanout::new().with(&mut a).with(&mut b);
            assert_eq!(fan.len(), 2);
            let p = NodePlacement {
                center: Point::new(1.0, 2.0),
                size: Size::new(4.0, 4.0),
            };
            fan.place_node(root, p);
            fan.draw_edge(root, &PathData::from_points([Point::ZERO]));
            fan.show_connector(None);
        }
        for s in [&a, &b] {
            assert_eq!(s.placed, 1);
            assert_eq!(s.edges, 1);
            assert_eq!(s.connector, Some(false));
        }
    }

    #[test]
    fn placement_lerp_moves_center_and_size() {
        let a = NodePlacement {
            center: Point::new(0.0, 0.0),
            size: Size::new(10.0, 10.0),
        };
        let b = NodePlacement {
            center: Point::new(100.0, 50.0),
            size: Size::new(20.0, 30.0),
        };
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.center, Point::new(50.0, 25.0));
        assert_eq!(mid.size, Size::new(15.0, 20.0));
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
