// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage Tree: the rooted hierarchy behind a genealogy chart.
//!
//! Each node carries two positions: one computed by [`TidyLayout`] for the
//! modern chart, and an authored ancient box scaled onto the render canvas
//! with [`Tree::scale_boxes`]. Nodes are expanded or collapsed individually;
//! collapsing never touches the state of deeper nodes.
//!
//! - Build a tree with [`Tree::insert`] or load one with [`Tree::from_json_str`].
//! - Move subtrees with [`Tree::reparent`], which refuses to create cycles.
//! - Lay out the visible tree with [`TidyLayout::apply`], which reports entering
//!   and exiting nodes as [`LayoutDamage`]; then [`Tree::commit_positions`]
//!   once the old positions have been consumed.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Size;
//! use lineage_tree::{TidyLayout, Tree};
//!
//! let mut tree = Tree::from_json_str(r#"{
//!     "name": "founder",
//!     "children": [
//!         { "name": "elder", "controlPoints": [1, 2, 3, 4] },
//!         { "name": "younger", "_children": [{ "name": "heir" }] }
//!     ]
//! }"#).unwrap();
//!
//! let layout = TidyLayout::new(Size::new(400.0, 300.0));
//! let damage = layout.apply(&mut tree);
//! assert_eq!(damage.entered.len(), 3);
//! tree.commit_positions();
//!
//! let root = tree.root().unwrap();
//! let younger = tree.children(root).unwrap().ids()[1];
//! tree.toggle(younger).unwrap();
//! let damage = layout.apply(&mut tree);
//! assert_eq!(damage.entered.len(), 1);
//! ```

mod error;
mod input;
mod layout;
mod tree;
mod types;

pub use error::TreeError;
pub use input::{ControlPointId, TreeInput};
pub use layout::{LayoutDamage, TidyLayout};
pub use tree::Tree;
pub use types::{Children, ExpansionState, NodeData, NodeFlags, NodeId};
