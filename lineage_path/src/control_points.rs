// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared dictionary of authored control points.

use hashbrown::HashMap;
use kurbo::Point;

use crate::{CanvasScale, PathError};

/// Mapping from control-point id to coordinate.
///
/// Authored once at a canonical size and never edited; rendering works on a
/// [`scaled`](Self::scaled) copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlPoints {
    points: HashMap<String, Point>,
}

impl ControlPoints {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of `id: [x, y]` entries.
    ///
    /// ```
    /// use lineage_path::ControlPoints;
    ///
    /// let points = ControlPoints::from_json_str(r#"{"1": [10, 20], "b": [0.5, 3]}"#).unwrap();
    /// assert_eq!(points.get("1"), Some(kurbo::Point::new(10.0, 20.0)));
    /// assert_eq!(points.len(), 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, PathError> {
        let raw: HashMap<String, [f64; 2]> = serde_json::from_str(json)?;
        Ok(raw
            .into_iter()
            .map(|(id, [x, y])| (id, Point::new(x, y)))
            .collect())
    }

    /// Coordinate of the control point `id`.
    pub fn get(&self, id: &str) -> Option<Point> {
        self.points.get(id).copied()
    }

    /// Add or replace a control point.
    pub fn insert(&mut self, id: impl Into<String>, point: Point) -> Option<Point> {
        self.points.insert(id.into(), point)
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(id, point)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.points.iter().map(|(id, p)| (id.as_str(), *p))
    }

    /// A copy with every point mapped through `scale`.
    pub fn scaled(&self, scale: &CanvasScale) -> Self {
        self.points
            .iter()
            .map(|(id, p)| (id.clone(), scale.scale_point(*p)))
            .collect()
    }
}

impl FromIterator<(String, Point)> for ControlPoints {
    fn from_iter<I: IntoIterator<Item = (String, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ControlPoints::from_json_str(r#"{"1": [1]}"#),
            Err(PathError::Json(_))
        ));
    }

    #[test]
    fn scaled_copy_leaves_original_untouched() {
        let mut points = ControlPoints::new();
        points.insert("a", Point::new(100.0, 200.0));
        let scale = CanvasScale::new(Size::new(200.0, 400.0), Size::new(100.0, 100.0));
        let scaled = points.scaled(&scale);
        assert_eq!(scaled.get("a"), Some(Point::new(50.0, 50.0)));
        assert_eq!(points.get("a"), Some(Point::new(100.0, 200.0)));
    }
}
