// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use core::time::Duration;

use kurbo::{Size, Vec2};
use lineage_path::{BoxScaling, CANONICAL_SIZE, CanvasScale, DEFAULT_PRECISION};

use crate::{Easing, Mode};

/// Fractions of the render size left empty around the modern chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 0.1,
            right: 0.05,
            bottom: 0.1,
            left: 0.05,
        }
    }
}

/// Everything a [`Session`](crate::Session) needs to know up front.
#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    /// Size authored boxes and control points refer to.
    pub canonical_size: Size,
    /// Size being rendered.
    pub render_size: Size,
    /// Insets of the modern chart.
    pub padding: Padding,
    /// Length of every transition.
    pub duration: Duration,
    /// Spacing of samples when morphing paths.
    pub sample_precision: f64,
    /// Easing applied to transition progress.
    pub easing: Easing,
    /// How ancient boxes are scaled.
    pub box_scaling: BoxScaling,
    /// Drop targets farther than this from the pointer are ignored.
    pub snap_radius: Option<f64>,
    /// Mode the session starts in.
    pub initial_mode: Mode,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            canonical_size: CANONICAL_SIZE,
            render_size: Size::new(400.0, 595.0),
            padding: Padding::default(),
            duration: Duration::from_millis(1000),
            sample_precision: DEFAULT_PRECISION,
            easing: Easing::default(),
            box_scaling: BoxScaling::default(),
            snap_radius: None,
            initial_mode: Mode::Ancient,
        }
    }
}

impl StageConfig {
    /// Canonical-to-render mapping.
    pub fn canvas_scale(&self) -> CanvasScale {
        CanvasScale::new(self.canonical_size, self.render_size).with_box_scaling(self.box_scaling)
    }

    /// Extent the modern chart is laid out in.
    pub fn layout_size(&self) -> Size {
        let p = self.padding;
        Size::new(
            self.render_size.width * (1.0 - p.left - p.right),
            self.render_size.height * (1.0 - p.top - p.bottom),
        )
    }

    /// Translation from layout coordinates to render coordinates.
    pub fn modern_offset(&self) -> Vec2 {
        Vec2::new(
            self.render_size.width * self.padding.left,
            self.render_size.height * self.padding.top,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_layout_area() {
        let config = StageConfig {
            render_size: Size::new(400.0, 600.0),
            ..StageConfig::default()
        };
        let size = config.layout_size();
        assert!((size.width - 360.0).abs() < 1e-9);
        assert!((size.height - 480.0).abs() < 1e-9);
        let offset = config.modern_offset();
        assert!((offset.x - 20.0).abs() < 1e-9);
        assert!((offset.y - 60.0).abs() < 1e-9);
    }
}
