// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop reparenting.
//!
//! A drag moves through [`DragState::Idle`], [`DragState::Armed`] and
//! [`DragState::Dragging`]. Starting a drag pulls the node's subtree out of
//! the spatial index and off the surfaces, so the nearest-node lookup can only
//! ever offer a target outside the subtree. Dropping reparents onto that
//! target; the caller then relayouts and rebuilds the index.

use kurbo::Point;
use lineage_path::elbow_path;
use lineage_tree::{NodeFlags, NodeId, Tree};

use crate::scene::Scene;
use crate::{Mode, NodeIndex, Surface};

/// Where a drag stands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag.
    #[default]
    Idle,
    /// A node was grabbed but has not moved yet.
    Armed {
        /// The grabbed node.
        node: NodeId,
    },
    /// A node is following the pointer.
    Dragging {
        /// The dragged node.
        node: NodeId,
        /// Latest pointer position.
        pointer: Point,
        /// Node it would be dropped onto.
        candidate: Option<NodeId>,
    },
}

impl DragState {
    /// The node being dragged, if any.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Self::Idle => None,
            Self::Armed { node } | Self::Dragging { node, .. } => Some(node),
        }
    }
}

/// How a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The node moved under a new parent, which is now expanded.
    Reparented {
        /// The moved node.
        node: NodeId,
        /// Its old parent.
        from: NodeId,
        /// Its new parent.
        to: NodeId,
    },
    /// No target was selected; the tree is unchanged.
    Cancelled {
        /// The node that was dragged.
        node: NodeId,
    },
    /// The target would have created a cycle; the tree is unchanged.
    Rejected {
        /// The node that was dragged.
        node: NodeId,
        /// The refused target.
        target: NodeId,
    },
    /// There was no matching drag to end.
    Ignored,
}

/// Drives one drag at a time.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
    snap_radius: Option<f64>,
}

impl DragController {
    /// A controller that only offers targets within `snap_radius`, if set.
    pub fn new(snap_radius: Option<f64>) -> Self {
        Self {
            state: DragState::Idle,
            snap_radius,
        }
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Grab `node`. The root cannot be dragged; neither can anything while
    /// another drag is active. Returns whether the drag started.
    pub(crate) fn start<S: Surface + ?Sized>(
        &mut self,
        tree: &mut Tree,
        index: &mut NodeIndex,
        node: NodeId,
        surface: &mut S,
    ) -> bool {
        if self.is_active() {
            log::debug!("ignoring drag of {node}: already dragging");
            return false;
        }
        if tree.parent(node).is_none() {
            log::debug!("ignoring drag of {node}: root or unknown node");
            return false;
        }

        let subtree = tree.descendants(node);
        index.remove_all(subtree.iter().copied());
        for &id in &subtree {
            tree.set_flags(id, NodeFlags::DETACHED, true);
        }
        for id in tree.visible_descendants(node) {
            surface.hide_edge(id);
            if id != node {
                surface.hide_node(id);
            }
        }
        log::debug!("drag started on {node}, {} node(s) detached", subtree.len());
        self.state = DragState::Armed { node };
        true
    }

    /// Move the dragged `node` to `pointer` and pick the nearest target.
    pub(crate) fn move_to<S: Surface + ?Sized>(
        &mut self,
        scene: &Scene<'_>,
        mode: Mode,
        index: &NodeIndex,
        node: NodeId,
        pointer: Point,
        surface: &mut S,
    ) -> Option<NodeId> {
        if self.state.node() != Some(node) {
            return None;
        }
        let candidate = index.nearest(pointer, self.snap_radius);
        if let Some(p) = scene.place_at(node, pointer) {
            surface.place_node(node, p);
        }
        let connector = candidate
            .and_then(|c| scene.placement(c, mode))
            .map(|p| elbow_path(p.center, pointer));
        surface.show_connector(connector.as_ref());
        self.state = DragState::Dragging {
            node,
            pointer,
            candidate,
        };
        candidate
    }

    /// Drop `node` onto the current candidate.
    pub(crate) fn end<S: Surface + ?Sized>(
        &mut self,
        tree: &mut Tree,
        node: NodeId,
        surface: &mut S,
    ) -> DropOutcome {
        if self.state.node() != Some(node) {
            return DropOutcome::Ignored;
        }
        let candidate = match core::mem::take(&mut self.state) {
            DragState::Dragging { candidate, .. } => candidate,
            _ => None,
        };
        for id in tree.descendants(node) {
            tree.set_flags(id, NodeFlags::DETACHED, false);
        }
        surface.show_connector(None);

        let (Some(target), Some(from)) = (candidate, tree.parent(node)) else {
            log::debug!("drag of {node} cancelled");
            return DropOutcome::Cancelled { node };
        };
        if let Err(e) = tree.reparent(node, target) {
            log::warn!("drop of {node} refused: {e}");
            return DropOutcome::Rejected { node, target };
        }
        if let Err(e) = tree.expand(target) {
            log::warn!("could not expand {target} after drop: {e}");
        }
        log::info!("moved {node} from {from} to {target}");
        DropOutcome::Reparented {
            node,
            from,
            to: target,
        }
    }

    /// Abandon the current drag without changing the tree.
    pub(crate) fn cancel<S: Surface + ?Sized>(
        &mut self,
        tree: &mut Tree,
        surface: &mut S,
    ) -> DropOutcome {
        let Some(node) = self.state.node() else {
            return DropOutcome::Ignored;
        };
        self.state = DragState::Idle;
        for id in tree.descendants(node) {
            tree.set_flags(id, NodeFlags::DETACHED, false);
        }
        surface.show_connector(None);
        DropOutcome::Cancelled { node }
    }
}
