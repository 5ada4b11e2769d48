// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What was last pushed to the surfaces, so the next animation starts there.

use hashbrown::HashMap;
use lineage_path::PathData;
use lineage_tree::NodeId;

use crate::{NodePlacement, Surface};

/// Last placement of every shown node and last shape of every shown edge.
#[derive(Clone, Debug, Default)]
pub(crate) struct Rendered {
    nodes: HashMap<NodeId, NodePlacement>,
    edges: HashMap<NodeId, PathData>,
}

impl Rendered {
    pub(crate) fn node(&self, id: NodeId) -> Option<NodePlacement> {
        self.nodes.get(&id).copied()
    }

    pub(crate) fn edge(&self, child: NodeId) -> Option<&PathData> {
        self.edges.get(&child)
    }

    /// Shown nodes, sorted by id.
    pub(crate) fn nodes(&self) -> Vec<(NodeId, NodePlacement)> {
        let mut out: Vec<_> = self.nodes.iter().map(|(&id, &p)| (id, p)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Shown edges, sorted by child id.
    pub(crate) fn edges(&self) -> Vec<(NodeId, &PathData)> {
        let mut out: Vec<_> = self.edges.iter().map(|(&id, p)| (id, p)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Wrap `surface` so every call is also recorded here.
    pub(crate) fn track<'a, S: Surface + ?Sized>(
        &'a mut self,
        surface: &'a mut S,
    ) -> Tracked<'a, S> {
        Tracked {
            rendered: self,
            inner: surface,
        }
    }
}

/// A surface that forwards to another and remembers what it was told.
pub(crate) struct Tracked<'a, S: ?Sized> {
    rendered: &'a mut Rendered,
    inner: &'a mut S,
}

impl<S: Surface + ?Sized> Surface for Tracked<'_, S> {
    fn place_node(&mut self, id: NodeId, placement: NodePlacement) {
        self.rendered.nodes.insert(id, placement);
        self.inner.place_node(id, placement);
    }

    fn hide_node(&mut self, id: NodeId) {
        self.rendered.nodes.remove(&id);
        self.inner.hide_node(id);
    }

    fn draw_edge(&mut self, child: NodeId, path: &PathData) {
        self.rendered.edges.insert(child, path.clone());
        self.inner.draw_edge(child, path);
    }

    fn hide_edge(&mut self, child: NodeId) {
        self.rendered.edges.remove(&child);
        self.inner.hide_edge(child);
    }

    fn show_connector(&mut self, path: Option<&PathData>) {
        self.inner.show_connector(path);
    }

    fn set_highlight(&mut self, path: &[NodeId]) {
        self.inner.set_highlight(path);
    }
}
