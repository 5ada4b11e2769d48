// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage Index: a 2D point index with nearest-neighbour queries.
//!
//! - Insert, move, and remove points with small `Copy` payloads.
//! - Find the nearest entry to a position, optionally within a radius.
//! - Query the entries inside a rectangle.
//!
//! Keys are generational: a key whose entry was removed never aliases a later
//! entry that reuses the same slot.
//!
//! Backends are pluggable via the [`Backend`] trait. The default is a bucketed
//! [`QuadTree`](backends::QuadTree) that grows to fit whatever is inserted;
//! [`FlatVec`](backends::FlatVec) scans linearly and suits tiny sets.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use lineage_index::Index;
//!
//! let mut idx: Index<u32> = Index::new();
//! let root = idx.insert(Point::new(100.0, 0.0), 0);
//! let child = idx.insert(Point::new(40.0, 80.0), 1);
//!
//! let (key, payload) = idx.nearest(Point::new(45.0, 70.0)).unwrap();
//! assert_eq!((key, payload), (child, 1));
//!
//! // Removed entries drop out of queries.
//! idx.remove(child);
//! assert_eq!(idx.nearest(Point::new(45.0, 70.0)).map(|(k, _)| k), Some(root));
//! assert!(idx.nearest_within(Point::new(45.0, 70.0), 10.0).is_none());
//! ```
//!
//! ### Float semantics
//!
//! Positions must be finite. The quadtree backend ignores non-finite points.

mod backend;
pub mod backends;
mod index;

pub use backend::Backend;
pub use index::{Index, IndexGeneric, Key};
