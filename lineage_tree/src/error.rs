// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::NodeId;

/// Errors from loading or restructuring a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Input data does not describe a single well-formed rooted tree.
    #[error("malformed tree input: {0}")]
    MalformedTreeInput(String),
    /// A reparent would detach the root or create a cycle.
    #[error("cannot move {node} under {target}")]
    InvalidReparentTarget {
        /// Node being moved.
        node: NodeId,
        /// Requested new parent.
        target: NodeId,
    },
    /// The id does not name a node in this tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// A node is missing from its parent's child list.
    #[error("{node} is not among the children of its parent {parent}")]
    Inconsistent {
        /// The orphaned node.
        node: NodeId,
        /// Its recorded parent.
        parent: NodeId,
    },
}
