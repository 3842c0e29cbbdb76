//! # trace-charts: Sensor Series Charts
//!
//! Turns ordered sensor readings into chart geometry in a fixed
//! `0..=100 × 0..=100` space, and ships a small desktop viewer that draws
//! that geometry as line, step or bar charts.
//!
//! ## Architecture
//!
//! - **Normalize**: pure line/step/bar transforms that never fail
//! - **Geometry**: SVG path data, clamps and standalone SVG export
//! - **Cache**: memoized geometry keyed on a content fingerprint
//! - **Source**: JSON and CSV series loaders
//! - **Frontend**: eframe/egui viewer built on the modules above
//!
//! ## Configuration
//!
//! App state and chart settings live in the platform data directory under
//! `dev.ptrace.trace-charts` (see [`config`]).
//!
//! ## Example
//!
//! ```
//! use trace_charts::{normalize_line, Sample};
//!
//! let samples = vec![
//!     Sample::new("t1", 10.0),
//!     Sample::new("t2", 20.0),
//!     Sample::new("t3", 30.0),
//! ];
//! let geometry = normalize_line(&samples);
//!
//! assert_eq!(geometry.points[1].y, 50.0);
//! assert_eq!(geometry.value_range.min, 8.0);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod frontend;
pub mod geometry;
pub mod normalize;
pub mod source;
pub mod status;
pub mod types;

// Re-export commonly used types
pub use cache::{GeometryCache, Memoized, SeriesFingerprint};
pub use config::{AppState, ChartSettings};
pub use error::{Result, TraceChartsError};
pub use normalize::{
    normalize_bar, normalize_line, normalize_step, NormalizerSettings, SeriesNormalizer,
};
pub use source::{load_series, SensorSeries};
pub use status::{StatusLevel, StatusPalette};
pub use types::{
    Bar, BarGeometry, ChartKind, LineGeometry, NormalizedPoint, Sample, StepGeometry, StepPoint,
    ValueRange,
};
