// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `quadtree`: bucketed point quadtree whose bounds grow to fit new points.

pub(crate) mod flatvec;
pub(crate) mod quadtree;

pub use flatvec::FlatVec;
pub use quadtree::QuadTree;
