// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lineage_path::PathError;
use lineage_tree::{NodeId, TreeError};
use thiserror::Error;

/// Errors surfaced by a [`Session`](crate::Session).
#[derive(Debug, Error)]
pub enum StageError {
    /// Loading or restructuring the tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Control-point input could not be read.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The node is the root or unknown, so no edge leads into it.
    #[error("no edge leads into {0}")]
    NoEdge(NodeId),
    /// A transition or drag is already in progress.
    #[error("a {0} is already in progress")]
    Busy(&'static str),
}
