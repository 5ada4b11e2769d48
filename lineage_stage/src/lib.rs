// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage Stage: animated mode switching and drag-and-drop for lineage charts.
//!
//! A [`Session`] owns a [`lineage_tree::Tree`] and its control points and
//! drives everything that moves:
//!
//! - [`Session::begin_mode_switch`] morphs every edge between its traced
//!   ancient shape and its modern elbow, and moves every node between its
//!   authored box and its layout position.
//! - [`Session::toggle`] and friends relayout the tree and animate entering
//!   and exiting subtrees out of and into the clicked node.
//! - [`Session::drag_start`], [`Session::drag_move`] and [`Session::drag_end`]
//!   reparent a subtree onto the nearest node, with a connector shown while
//!   dragging.
//! - [`Session::tick`] advances the running [`Transition`] and pushes the frame.
//!
//! Drawing happens through the [`Surface`] trait. Several surfaces can be fed
//! from one session with [`Fanout`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//!
//! use lineage_path::PathData;
//! use lineage_stage::{Mode, NodePlacement, Progress, Session, StageConfig, Surface};
//! use lineage_tree::NodeId;
//!
//! #[derive(Default)]
//! struct Count(usize);
//!
//! impl Surface for Count {
//!     fn place_node(&mut self, _: NodeId, _: NodePlacement) { self.0 += 1; }
//!     fn hide_node(&mut self, _: NodeId) {}
//!     fn draw_edge(&mut self, _: NodeId, _: &PathData) {}
//!     fn hide_edge(&mut self, _: NodeId) {}
//!     fn show_connector(&mut self, _: Option<&PathData>) {}
//! }
//!
//! let tree = r#"{
//!     "name": "founder",
//!     "position": [[100, 100], [40, 20]],
//!     "children": [{
//!         "name": "heir",
//!         "position": [[100, 400], [40, 20]],
//!         "controlPoints": ["a", "b"]
//!     }]
//! }"#;
//! let points = r#"{ "a": [120, 120], "b": [120, 400] }"#;
//!
//! let mut session = Session::load(tree, points, StageConfig::default()).unwrap();
//! let mut surface = Count::default();
//! session.render(&mut surface);
//!
//! assert_eq!(session.begin_mode_switch().unwrap(), Mode::Modern);
//! assert!(session.begin_mode_switch().is_err());
//! let mut done = false;
//! for _ in 0..20 {
//!     if let Progress::Finished(_) = session.tick(Duration::from_millis(100), &mut surface) {
//!         done = true;
//!         break;
//!     }
//! }
//! assert!(done);
//! assert!(!session.is_busy());
//! ```

mod config;
mod drag;
mod error;
mod mode;
mod rendered;
mod scene;
mod session;
mod spatial;
mod surface;
mod transition;
mod tween;

pub use config::{Padding, StageConfig};
pub use drag::{DragController, DragState, DropOutcome};
pub use error::StageError;
pub use mode::Mode;
pub use session::{Progress, Session};
pub use spatial::NodeIndex;
pub use surface::{Fanout, NodePlacement, Surface};
pub use transition::{Transition, TransitionKind};
pub use tween::{Easing, Tween};
