// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path commands and the command sequence they form.

use core::fmt;

use kurbo::{BezPath, Line, ParamCurve, Point};

/// A single path command.
///
/// Only straight polyline commands exist: every edge shape this crate produces
/// is a polyline, and curves are approximated by sampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Draw a straight line from the current point to the point.
    LineTo(Point),
}

impl PathCommand {
    /// The point this command moves or draws to.
    #[inline]
    pub fn point(self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }

    /// The same kind of command, targeting a different point.
    #[inline]
    pub fn with_point(self, p: Point) -> Self {
        match self {
            Self::MoveTo(_) => Self::MoveTo(p),
            Self::LineTo(_) => Self::LineTo(p),
        }
    }

    fn letter(self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
        }
    }
}

/// An ordered sequence of [`PathCommand`]s.
///
/// Built fresh for every render or transition frame and never mutated after it
/// has been handed out; consumers only read points from it or format it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a polyline: a `MoveTo` for the first point and a `LineTo` for each following point.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let commands = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    PathCommand::MoveTo(p)
                } else {
                    PathCommand::LineTo(p)
                }
            })
            .collect();
        Self { commands }
    }

    /// The commands of this path, in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Point of the command at `index`.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.commands.get(index).map(|c| c.point())
    }

    /// Points of every command, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().map(|c| c.point())
    }

    /// First point of the path.
    pub fn first_point(&self) -> Option<Point> {
        self.commands.first().map(|c| c.point())
    }

    /// Last point of the path.
    pub fn last_point(&self) -> Option<Point> {
        self.commands.last().map(|c| c.point())
    }

    /// Insert `points` as `LineTo` commands before the command at `index`.
    ///
    /// `index` is clamped to `1..=len` so the leading `MoveTo` always stays first.
    pub fn insert_points<I: IntoIterator<Item = Point>>(&mut self, index: usize, points: I) {
        let index = index.clamp(1.min(self.commands.len()), self.commands.len());
        let tail = self.commands.split_off(index);
        self.commands.extend(points.into_iter().map(PathCommand::LineTo));
        self.commands.extend(tail);
    }

    /// Straight segments drawn by the path; `MoveTo` commands break the chain.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.commands.windows(2).filter_map(|w| match w[1] {
            PathCommand::LineTo(p) => Some(Line::new(w[0].point(), p)),
            PathCommand::MoveTo(_) => None,
        })
    }

    /// Total drawn length.
    pub fn length(&self) -> f64 {
        self.segments().map(|l| l.p0.distance(l.p1)).sum()
    }

    /// The point at arc length `distance` from the start.
    ///
    /// Distances outside `0..=length` are clamped to the endpoints. Returns
    /// `None` for an empty path.
    pub fn point_at_length(&self, distance: f64) -> Option<Point> {
        let first = self.first_point()?;
        if distance <= 0.0 {
            return Some(first);
        }
        let mut remaining = distance;
        for line in self.segments() {
            let len = line.p0.distance(line.p1);
            if remaining <= len {
                if len == 0.0 {
                    return Some(line.p1);
                }
                return Some(line.eval(remaining / len));
            }
            remaining -= len;
        }
        self.last_point()
    }

    /// Format as SVG path data (`M0,0L0,50...`).
    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Convert into a `kurbo` path for renderers that draw `BezPath`s.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::LineTo(p) => path.line_to(p),
            }
        }
        path
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            let p = command.point();
            write!(f, "{}{},{}", command.letter(), p.x, p.y)?;
        }
        Ok(())
    }
}

impl FromIterator<PathCommand> for PathData {
    fn from_iter<I: IntoIterator<Item = PathCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PathData {
        PathData::from_points([
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
    }

    #[test]
    fn from_points_starts_with_move_to() {
        let path = square();
        assert!(matches!(path.commands()[0], PathCommand::MoveTo(_)));
        assert!(
            path.commands()[1..]
                .iter()
                .all(|c| matches!(c, PathCommand::LineTo(_)))
        );
    }

    #[test]
    fn svg_output_matches_line_generator_format() {
        assert_eq!(square().to_svg(), "M0,0L10,0L10,10");
        let half = PathData::from_points([Point::new(0.5, 1.25)]);
        assert_eq!(half.to_svg(), "M0.5,1.25");
    }

    #[test]
    fn length_and_point_at_length() {
        let path = square();
        assert_eq!(path.length(), 20.0);
        assert_eq!(path.point_at_length(5.0), Some(Point::new(5.0, 0.0)));
        assert_eq!(path.point_at_length(15.0), Some(Point::new(10.0, 5.0)));
        assert_eq!(path.point_at_length(-1.0), Some(Point::new(0.0, 0.0)));
        assert_eq!(path.point_at_length(99.0), Some(Point::new(10.0, 10.0)));
        assert_eq!(PathData::new().point_at_length(1.0), None);
    }

    #[test]
    fn insert_points_keeps_move_to_first() {
        let mut path = square();
        path.insert_points(0, [Point::new(3.0, 3.0)]);
        assert!(matches!(path.commands()[0], PathCommand::MoveTo(_)));
        assert_eq!(path.point(1), Some(Point::new(3.0, 3.0)));

        let mut path = square();
        path.insert_points(2, [Point::new(7.0, 0.0), Point::new(8.0, 0.0)]);
        let xs: Vec<f64> = path.points().map(|p| p.x).collect();
        assert_eq!(xs, [0.0, 10.0, 7.0, 8.0, 10.0]);
    }

    #[test]
    fn bez_path_has_one_element_per_command() {
        assert_eq!(square().to_bez_path().elements().len(), 3);
    }
}
