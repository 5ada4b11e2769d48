// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors from building or reconciling edge paths.
///
/// All of these are local to one edge: callers skip the edge and carry on.
#[derive(Debug, Error)]
pub enum PathError {
    /// An edge names a control point the dictionary does not contain.
    #[error("control point `{id}` is not in the dictionary")]
    MissingControlPoint {
        /// The unresolved id.
        id: String,
    },
    /// A path has too few commands for the requested operation.
    #[error("path has {len} command(s), too few for this operation")]
    TooShort {
        /// Number of commands or ids supplied.
        len: usize,
    },
    /// Control-point input was not a JSON object of `[x, y]` pairs.
    #[error("invalid control-point JSON: {0}")]
    Json(#[from] serde_json::Error),
}
