//! Core data types for trace-charts
//!
//! This module contains the input sample type and the derived geometry
//! structures produced by the normalizer.
//!
//! # Main Types
//!
//! - [`Sample`] - One labeled observation with an optional status code
//! - [`NormalizedPoint`] - A sample mapped into the 0–100 chart space
//! - [`ValueRange`] - Padded display range used for axis labels
//! - [`LineGeometry`], [`StepGeometry`], [`BarGeometry`] - Per-mode results
//! - [`ChartKind`] - Which geometry mode a chart renders with
//!
//! # Coordinate Space
//!
//! Every coordinate lives in a fixed `0..=100` square. `x` grows left to
//! right by sample position and `y` grows with the value (0 is the bottom
//! of the plot). Renderers scale this square into their own surface.
//!
//! Derived structures are pure functions of the input slice and carry no
//! identity of their own.

use crate::status::{Rgba, StatusLevel};
use serde::{Deserialize, Serialize};

/// Lower bound of the normalized coordinate space
pub const COORD_MIN: f64 = 0.0;

/// Upper bound of the normalized coordinate space
pub const COORD_MAX: f64 = 100.0;

/// Vertical center used for flat or degenerate series
pub const COORD_CENTER: f64 = 50.0;

/// A single observation in a historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Opaque time/category key. Never parsed or sorted.
    pub label: String,
    /// Reading value; non-finite values mark invalid readings
    pub value: f64,
    /// Optional status code (0 = normal, 10 = warning, 20 = critical)
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<i32>,
}

impl Sample {
    /// Create a sample without a status code
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            status_code: None,
        }
    }

    /// Create an invalid reading (NaN value)
    pub fn invalid(label: impl Into<String>) -> Self {
        Self::new(label, f64::NAN)
    }

    /// Set the status code
    pub fn with_status(mut self, code: i32) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Whether the value takes part in geometry
    pub fn is_valid(&self) -> bool {
        self.value.is_finite()
    }

    /// Status level resolved from the raw code
    pub fn status(&self) -> StatusLevel {
        StatusLevel::from_code(self.status_code)
    }
}

/// A sample mapped into the normalized chart space
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPoint {
    /// Position of the originating sample in the input slice
    pub source_index: usize,
    /// Label of the originating sample
    pub label: String,
    /// Raw value of the originating sample
    pub value: f64,
    /// Horizontal position in `0..=100`
    pub x: f64,
    /// Vertical position in `0..=100`
    pub y: f64,
}

/// Display range of a series after padding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range reported when a series has no valid values
    pub const EMPTY: ValueRange = ValueRange {
        min: 0.0,
        max: 100.0,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Value shown at a normalized height, for axis labels and tooltips
    pub fn value_at(&self, y: f64) -> f64 {
        self.min + self.span() * (y / COORD_MAX)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Result of line-mode normalization
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub points: Vec<NormalizedPoint>,
    pub value_range: ValueRange,
}

impl LineGeometry {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            value_range: ValueRange::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A step-chart vertex with its status color
#[derive(Debug, Clone, PartialEq)]
pub struct StepPoint {
    pub point: NormalizedPoint,
    pub status: StatusLevel,
    pub color: Rgba,
}

/// Result of step-mode normalization
#[derive(Debug, Clone, PartialEq)]
pub struct StepGeometry {
    pub points: Vec<StepPoint>,
    /// SVG path data tracing the right-continuous step function
    pub path: String,
    pub value_range: ValueRange,
}

impl StepGeometry {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            path: String::new(),
            value_range: ValueRange::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub status: StatusLevel,
    pub color: Rgba,
    /// Left edge of the bar's slot in `0..=100`
    pub x: f64,
    /// Drawn width, already scaled by the occupancy factor
    pub width: f64,
    /// Height above the zero baseline in `0..=100`
    pub height: f64,
}

/// Result of bar-mode normalization
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub bars: Vec<Bar>,
    /// Largest finite value; bars are scaled against it with no padding
    pub max_y: f64,
}

impl BarGeometry {
    pub fn empty() -> Self {
        Self {
            bars: Vec::new(),
            max_y: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Visual mode a series is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartKind {
    /// Continuous line (default)
    #[default]
    Line,
    /// Step plot with horizontal-then-vertical transitions
    Step,
    /// Discrete bars on a zero baseline
    Bar,
}

impl ChartKind {
    /// Get all available chart kinds
    pub fn all() -> &'static [ChartKind] {
        &[ChartKind::Line, ChartKind::Step, ChartKind::Bar]
    }

    /// Get display name for this chart kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Step => "Step",
            ChartKind::Bar => "Bar",
        }
    }

    /// Get icon character for this chart kind
    pub fn icon(&self) -> &'static str {
        match self {
            ChartKind::Line => "─",
            ChartKind::Step => "⌐",
            ChartKind::Bar => "▄",
        }
    }

    /// Get the next chart kind (for cycling)
    pub fn next(&self) -> ChartKind {
        match self {
            ChartKind::Line => ChartKind::Step,
            ChartKind::Step => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_validity() {
        assert!(Sample::new("t1", 1.5).is_valid());
        assert!(!Sample::invalid("t2").is_valid());
        assert!(!Sample::new("t3", f64::INFINITY).is_valid());
    }

    #[test]
    fn test_sample_status() {
        let sample = Sample::new("t1", 3.0).with_status(20);
        assert_eq!(sample.status_code, Some(20));
        assert_eq!(sample.status(), StatusLevel::Critical);
        assert_eq!(Sample::new("t2", 3.0).status(), StatusLevel::Unknown);
    }

    #[test]
    fn test_value_range_helpers() {
        let range = ValueRange::new(8.0, 32.0);
        assert_eq!(range.span(), 24.0);
        assert_eq!(range.mid(), 20.0);
        assert_eq!(range.value_at(50.0), 20.0);
        assert_eq!(ValueRange::default(), ValueRange::EMPTY);
    }

    #[test]
    fn test_chart_kind_cycle() {
        let mut kind = ChartKind::default();
        for _ in 0..ChartKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ChartKind::Line);
        assert_eq!(ChartKind::Step.to_string(), "Step");
    }

    #[test]
    fn test_sample_deserializes_status_code() {
        let sample: Sample =
            serde_json::from_str(r#"{"label":"t1","value":4.0,"statusCode":10}"#).unwrap();
        assert_eq!(sample.status(), StatusLevel::Warning);
    }
}
