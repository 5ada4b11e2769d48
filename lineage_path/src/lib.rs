// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path geometry for morphing tree edges between two drawing styles.
//!
//! A tree edge can be drawn either as an orthogonal *elbow* connector or as an
//! *ancient* path traced through hand-authored control points. This crate
//! computes both shapes and makes them morphable into one another:
//!
//! - [`elbow_path`] builds the 4-point connector between two layout positions.
//! - [`ancient_path`] resolves control-point ids against a [`ControlPoints`]
//!   dictionary, optionally pruning redundant points on straight rails.
//! - [`reconcile`] inserts synthetic points into an elbow so that it has the same
//!   number of commands as a traced path, placing them where the traced path's
//!   interior points sit.
//! - [`PathMorph`] resamples a pair of paths and interpolates between them,
//!   ending on the exact target shape.
//! - [`cluster`] and [`cluster_with`] collapse near-duplicate coordinates.
//! - [`CanvasScale`] maps authored canonical coordinates to the render size.
//!
//! Paths are plain [`PathData`] values: ordered [`PathCommand`]s that can be
//! formatted as SVG path data or converted to a [`kurbo::BezPath`].
//!
//! # Example
//!
//! ```
//! use kurbo::Point;
//! use lineage_path::{ControlPoints, PathMorph, ancient_path, elbow_path, reconcile};
//!
//! let mut points = ControlPoints::new();
//! points.insert("a", Point::new(0.0, 0.0));
//! points.insert("b", Point::new(0.0, 30.0));
//! points.insert("c", Point::new(40.0, 50.0));
//! points.insert("d", Point::new(80.0, 70.0));
//! points.insert("e", Point::new(80.0, 100.0));
//!
//! let ancient = ancient_path(&["a", "b", "c", "d", "e"], &points, true).unwrap();
//! let elbow = elbow_path(Point::new(0.0, 0.0), Point::new(80.0, 100.0));
//!
//! // Equalize command counts, then morph from the traced path to the elbow.
//! let elbow = reconcile(&elbow, &ancient, 5).unwrap();
//! assert_eq!(elbow.len(), ancient.len());
//!
//! let morph = PathMorph::new(&ancient, &elbow, 4.0);
//! assert_eq!(morph.at(0.0).first_point(), Some(Point::new(0.0, 0.0)));
//! assert_eq!(morph.at(1.0), elbow);
//! ```

mod cluster;
mod command;
mod control_points;
mod error;
mod geometry;
mod morph;
mod reconcile;
mod scale;

pub use cluster::{MeanRounding, cluster, cluster_with};
pub use command::{PathCommand, PathData};
pub use control_points::ControlPoints;
pub use error::PathError;
pub use geometry::{COLLINEAR_TOLERANCE, ancient_path, elbow_path};
pub use morph::{DEFAULT_PRECISION, PathMorph};
pub use reconcile::{PIN_TOLERANCE, RAIL_TOLERANCE, reconcile};
pub use scale::{BoxScaling, CANONICAL_SIZE, CanvasScale};
