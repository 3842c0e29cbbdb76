//! Chart geometry output
//!
//! Turns normalized points into renderable forms:
//!
//! - [`PathData`] - SVG path data (`M x y L x y ...`) built from commands
//! - [`step_vertices`] - Vertex list of a right-continuous step function
//! - [`polyline_points`] - `x,y x,y ...` strings for `<polyline>`
//! - [`svg`] - Self-contained SVG documents for exported charts
//!
//! All coordinates are in the 0–100 chart space described in [`crate::types`].

pub mod path;
pub mod svg;

pub use path::{line_path, polyline_points, step_path, step_vertices, PathCommand, PathData};
pub use svg::{SvgStyle, bar_document, line_document, step_document, write_svg};

use crate::types::{COORD_CENTER, COORD_MAX, COORD_MIN};

/// Default number of decimals in emitted path data
pub const DEFAULT_PRECISION: usize = 2;

/// Clamp an x coordinate into the chart space; NaN maps to the left edge
pub fn clamp_x(x: f64) -> f64 {
    if x.is_nan() {
        COORD_MIN
    } else {
        x.clamp(COORD_MIN, COORD_MAX)
    }
}

/// Clamp a y coordinate into the chart space; NaN maps to the vertical center
pub fn clamp_y(y: f64) -> f64 {
    if y.is_nan() {
        COORD_CENTER
    } else {
        y.clamp(COORD_MIN, COORD_MAX)
    }
}
