// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers, flags, node data, and child lists.

use core::fmt;

use kurbo::Rect;
use serde_json::{Map, Value};

/// Identifier for a node in the tree.
///
/// Assigned once when the node is inserted and never reused, so it stays valid
/// across layout passes and reparenting.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The raw index, for use as an external key.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Per-node presentation state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node was placed by the most recent layout pass.
        const VISIBLE     = 0b0000_0001;
        /// Node, and the edge into it, are currently emphasized.
        const HIGHLIGHTED = 0b0000_0010;
        /// Node belongs to a subtree whose visuals are detached for dragging.
        const DETACHED    = 0b0000_0100;
    }
}

/// Authored data carried by a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeData {
    /// Display label; also the key edges are labelled with.
    pub name: String,
    /// Control-point ids tracing the edge from the parent to this node.
    pub control_points: Vec<String>,
    /// Ancient-mode box at canonical size.
    pub position: Rect,
    /// Any further authored fields, passed through untouched.
    pub extra: Map<String, Value>,
}

impl NodeData {
    /// Data with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Whether a node's children are shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExpansionState {
    /// Children are part of the visible tree.
    Expanded,
    /// Children are hidden; they keep their own state.
    Collapsed,
}

/// A node's ordered children, tagged with its expansion state.
///
/// A leaf is `Expanded` with no children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children {
    /// Visible children.
    Expanded(Vec<NodeId>),
    /// Hidden children.
    Collapsed(Vec<NodeId>),
}

impl Default for Children {
    fn default() -> Self {
        Self::Expanded(Vec::new())
    }
}

impl Children {
    /// The children, regardless of state.
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Self::Expanded(ids) | Self::Collapsed(ids) => ids,
        }
    }

    /// The children that are part of the visible tree.
    pub fn visible(&self) -> &[NodeId] {
        match self {
            Self::Expanded(ids) => ids,
            Self::Collapsed(_) => &[],
        }
    }

    /// The current state.
    pub fn state(&self) -> ExpansionState {
        match self {
            Self::Expanded(_) => ExpansionState::Expanded,
            Self::Collapsed(_) => ExpansionState::Collapsed,
        }
    }

    /// Whether there are no children at all.
    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub(crate) fn ids_mut(&mut self) -> &mut Vec<NodeId> {
        match self {
            Self::Expanded(ids) | Self::Collapsed(ids) => ids,
        }
    }

    /// Switch to `state`, keeping the list. Empty lists stay `Expanded`.
    pub(crate) fn set_state(&mut self, state: ExpansionState) {
        let ids = core::mem::take(self.ids_mut());
        *self = match state {
            _ if ids.is_empty() => Self::Expanded(ids),
            ExpansionState::Expanded => Self::Expanded(ids),
            ExpansionState::Collapsed => Self::Collapsed(ids),
        };
    }
}
