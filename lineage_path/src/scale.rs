// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping authored canonical coordinates onto the render canvas.

use kurbo::{Point, Rect, Size, Vec2};

/// Size of the reference portrait that authored coordinates refer to.
pub const CANONICAL_SIZE: Size = Size::new(968.0, 1441.0);

/// How ancient boxes are scaled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxScaling {
    /// The historical behavior: the box origin's y is scaled by the x ratio.
    #[default]
    Legacy,
    /// Every y component is scaled by the y ratio.
    PerAxis,
}

/// A canonical-to-render coordinate mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasScale {
    /// Size the authored data refers to.
    pub canonical: Size,
    /// Size being rendered.
    pub render: Size,
    /// Box scaling behavior.
    pub box_scaling: BoxScaling,
}

impl CanvasScale {
    /// A mapping with [`BoxScaling::Legacy`] box scaling.
    pub fn new(canonical: Size, render: Size) -> Self {
        Self {
            canonical,
            render,
            box_scaling: BoxScaling::Legacy,
        }
    }

    /// The same mapping with a different box scaling.
    pub fn with_box_scaling(mut self, box_scaling: BoxScaling) -> Self {
        self.box_scaling = box_scaling;
        self
    }

    /// Per-axis ratios, `render / canonical`.
    ///
    /// A zero canonical dimension yields a ratio of 1 on that axis.
    pub fn ratios(&self) -> Vec2 {
        let ratio = |render: f64, canonical: f64| {
            if canonical == 0.0 {
                1.0
            } else {
                render / canonical
            }
        };
        Vec2::new(
            ratio(self.render.width, self.canonical.width),
            ratio(self.render.height, self.canonical.height),
        )
    }

    /// Scale a control point, each axis by its own ratio.
    pub fn scale_point(&self, p: Point) -> Point {
        let r = self.ratios();
        Point::new(p.x * r.x, p.y * r.y)
    }

    /// Scale an authored `(origin, size)` box.
    ///
    /// ```
    /// use kurbo::{Rect, Size};
    /// use lineage_path::{BoxScaling, CanvasScale};
    ///
    /// let scale = CanvasScale::new(Size::new(100.0, 100.0), Size::new(200.0, 50.0));
    /// let authored = Rect::new(10.0, 10.0, 20.0, 30.0);
    /// // Legacy: the origin's y follows the x ratio.
    /// assert_eq!(scale.scale_box(authored), Rect::new(20.0, 20.0, 40.0, 30.0));
    /// let fixed = scale.with_box_scaling(BoxScaling::PerAxis);
    /// assert_eq!(fixed.scale_box(authored), Rect::new(20.0, 5.0, 40.0, 15.0));
    /// ```
    pub fn scale_box(&self, rect: Rect) -> Rect {
        let r = self.ratios();
        let origin_y_ratio = match self.box_scaling {
            BoxScaling::Legacy => r.x,
            BoxScaling::PerAxis => r.y,
        };
        let origin = Point::new(rect.x0 * r.x, rect.y0 * origin_y_ratio);
        let size = Size::new(rect.width() * r.x, rect.height() * r.y);
        Rect::from_origin_size(origin, size)
    }
}

impl Default for CanvasScale {
    fn default() -> Self {
        Self::new(CANONICAL_SIZE, CANONICAL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_by_default() {
        let scale = CanvasScale::default();
        let p = Point::new(12.5, 99.0);
        assert_eq!(scale.scale_point(p), p);
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(scale.scale_box(r), r);
    }

    #[test]
    fn degenerate_canonical_size_does_not_divide_by_zero() {
        let scale = CanvasScale::new(Size::ZERO, Size::new(10.0, 10.0));
        assert_eq!(scale.ratios(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn points_use_per_axis_ratios() {
        let scale = CanvasScale::new(Size::new(968.0, 1441.0), Size::new(484.0, 2882.0));
        assert_eq!(
            scale.scale_point(Point::new(100.0, 100.0)),
            Point::new(50.0, 200.0)
        );
    }
}
