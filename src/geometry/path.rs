//! SVG path data construction

use std::fmt::Write as _;

use super::{clamp_x, clamp_y, DEFAULT_PRECISION};
use crate::types::NormalizedPoint;

/// A single path-data command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Ordered list of path commands, rendered lazily to SVG syntax
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render as SVG path data with `precision` decimals
    pub fn to_svg(&self, precision: usize) -> String {
        let mut out = String::with_capacity(self.commands.len() * 16);
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(x, y) => write!(out, "M {x:.precision$} {y:.precision$}"),
                PathCommand::LineTo(x, y) => write!(out, "L {x:.precision$} {y:.precision$}"),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

impl std::fmt::Display for PathData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_svg(DEFAULT_PRECISION))
    }
}

/// Straight segments through every point, in input order
pub fn line_path(points: &[NormalizedPoint]) -> PathData {
    let mut path = PathData::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p.x, p.y);
        } else {
            path.line_to(p.x, p.y);
        }
    }
    path
}

/// Vertices of a right-continuous step function through `points`.
///
/// Between consecutive points the y of point `i` is held until the x of
/// point `i + 1`, then the line jumps vertically. Every coordinate is
/// clamped into the chart space.
pub fn step_vertices(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len().saturating_mul(2));
    let mut prev_y: Option<f64> = None;

    for &(x, y) in points {
        let (x, y) = (clamp_x(x), clamp_y(y));
        if let Some(held) = prev_y {
            out.push((x, held));
        }
        out.push((x, y));
        prev_y = Some(y);
    }
    out
}

/// Step path built from [`step_vertices`]
pub fn step_path(points: &[(f64, f64)]) -> PathData {
    let vertices = step_vertices(points);
    let mut path = PathData::with_capacity(vertices.len());
    for (i, &(x, y)) in vertices.iter().enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path
}

/// `x,y x,y ...` string for an SVG `<polyline points=...>`
pub fn polyline_points(points: &[NormalizedPoint], precision: usize) -> String {
    let mut out = String::with_capacity(points.len() * 12);
    for p in points {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{:.precision$},{:.precision$}", p.x, p.y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> NormalizedPoint {
        NormalizedPoint {
            source_index: 0,
            label: String::new(),
            value: y,
            x,
            y,
        }
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(PathData::new().to_svg(2), "");
        assert!(line_path(&[]).is_empty());
        assert!(step_path(&[]).is_empty());
    }

    #[test]
    fn test_line_path_format() {
        let path = line_path(&[point(0.0, 8.333333), point(100.0, 91.666667)]);
        assert_eq!(path.to_string(), "M 0.00 8.33 L 100.00 91.67");
        assert_eq!(path.to_svg(1), "M 0.0 8.3 L 100.0 91.7");
    }

    #[test]
    fn test_close_command() {
        let mut path = PathData::new();
        path.move_to(0.0, 0.0).line_to(10.0, 0.0).close();
        assert_eq!(path.to_svg(0), "M 0 0 L 10 0 Z");
    }

    #[test]
    fn test_step_vertices_hold_then_jump() {
        let vertices = step_vertices(&[(0.0, 10.0), (50.0, 20.0), (100.0, 30.0)]);
        assert_eq!(
            vertices,
            vec![
                (0.0, 10.0),
                (50.0, 10.0),
                (50.0, 20.0),
                (100.0, 20.0),
                (100.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_step_vertices_clamp_nan() {
        let vertices = step_vertices(&[(f64::NAN, f64::NAN)]);
        assert_eq!(vertices, vec![(0.0, 50.0)]);
    }

    #[test]
    fn test_polyline_points() {
        let s = polyline_points(&[point(0.0, 1.0), point(50.0, 2.5)], 1);
        assert_eq!(s, "0.0,1.0 50.0,2.5");
    }
}
