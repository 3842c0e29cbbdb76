//! Series normalization into chart geometry
//!
//! Converts an ordered slice of [`Sample`]s into geometry in the fixed
//! 0–100 × 0–100 chart space, in three modes:
//!
//! - **Line** ([`normalize_line`]) - evenly spaced points on a padded value scale
//! - **Step** ([`normalize_step`]) - right-continuous step path with status colors
//! - **Bar** ([`normalize_bar`]) - bars on a zero baseline scaled against the max
//!
//! # Degenerate Input
//!
//! Normalization never fails. Empty series, series with no finite values,
//! flat series and single-sample series all produce well-defined, finite
//! geometry:
//!
//! | Input | Line / Step | Bar |
//! |---|---|---|
//! | empty or all invalid | no points, range `0..100` | no bars (bar: zero-height slots when invalid) |
//! | single valid sample | one point at `x = 50`, `y = 50` | one bar |
//! | all values equal | every `y = 50` | full-height bars (zero-height if all 0) |
//!
//! The functions are pure: identical input gives bit-identical output. Use
//! [`crate::cache::GeometryCache`] to skip recomputation for unchanged input.

mod bar;
mod line;
mod scale;
mod step;

pub use bar::normalize_bar_with;
pub use line::normalize_line_with;
pub use scale::{index_x, ValueScale};
pub use step::normalize_step_with;

use crate::status::StatusPalette;
use crate::types::{BarGeometry, LineGeometry, Sample, StepGeometry};
use serde::{Deserialize, Serialize};

/// Share of the raw value range added above and below the extrema
pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// Padding used when every valid value is identical
pub const DEFAULT_FLAT_MARGIN: f64 = 1.0;

/// Share of each bar slot covered by the bar (the rest is the gap)
pub const DEFAULT_BAR_OCCUPANCY: f64 = 0.8;

/// Numeric knobs of the normalizer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizerSettings {
    #[serde(default = "default_padding_ratio")]
    pub padding_ratio: f64,
    #[serde(default = "default_flat_margin")]
    pub flat_margin: f64,
    #[serde(default = "default_bar_occupancy")]
    pub bar_occupancy: f64,
    /// Decimals used when emitting SVG path data
    #[serde(default = "default_path_precision")]
    pub path_precision: usize,
}

fn default_padding_ratio() -> f64 {
    DEFAULT_PADDING_RATIO
}

fn default_flat_margin() -> f64 {
    DEFAULT_FLAT_MARGIN
}

fn default_bar_occupancy() -> f64 {
    DEFAULT_BAR_OCCUPANCY
}

fn default_path_precision() -> usize {
    crate::geometry::DEFAULT_PRECISION
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            padding_ratio: DEFAULT_PADDING_RATIO,
            flat_margin: DEFAULT_FLAT_MARGIN,
            bar_occupancy: DEFAULT_BAR_OCCUPANCY,
            path_precision: crate::geometry::DEFAULT_PRECISION,
        }
    }
}

impl NormalizerSettings {
    /// Replace out-of-range values with the defaults.
    ///
    /// Returns the names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            self.padding_ratio = DEFAULT_PADDING_RATIO;
            reset.push("padding_ratio");
        }
        if !self.flat_margin.is_finite() || self.flat_margin <= 0.0 {
            self.flat_margin = DEFAULT_FLAT_MARGIN;
            reset.push("flat_margin");
        }
        if !self.bar_occupancy.is_finite()
            || self.bar_occupancy <= 0.0
            || self.bar_occupancy > 1.0
        {
            self.bar_occupancy = DEFAULT_BAR_OCCUPANCY;
            reset.push("bar_occupancy");
        }
        if self.path_precision > 6 {
            self.path_precision = crate::geometry::DEFAULT_PRECISION;
            reset.push("path_precision");
        }
        reset
    }
}

/// Normalizer bundling numeric settings with a status palette
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesNormalizer {
    pub settings: NormalizerSettings,
    pub palette: StatusPalette,
}

impl SeriesNormalizer {
    pub fn new(settings: NormalizerSettings, palette: StatusPalette) -> Self {
        Self { settings, palette }
    }

    pub fn line(&self, samples: &[Sample]) -> LineGeometry {
        normalize_line_with(samples, &self.settings)
    }

    pub fn step(&self, samples: &[Sample]) -> StepGeometry {
        normalize_step_with(samples, &self.settings, &self.palette)
    }

    pub fn bar(&self, samples: &[Sample]) -> BarGeometry {
        normalize_bar_with(samples, &self.settings, &self.palette)
    }
}

/// Line-mode normalization with default settings
pub fn normalize_line(samples: &[Sample]) -> LineGeometry {
    normalize_line_with(samples, &NormalizerSettings::default())
}

/// Step-mode normalization with default settings and palette
pub fn normalize_step(samples: &[Sample]) -> StepGeometry {
    normalize_step_with(
        samples,
        &NormalizerSettings::default(),
        &StatusPalette::default(),
    )
}

/// Bar-mode normalization with default settings and palette
pub fn normalize_bar(samples: &[Sample]) -> BarGeometry {
    normalize_bar_with(
        samples,
        &NormalizerSettings::default(),
        &StatusPalette::default(),
    )
}

/// Samples with finite values, paired with their input index
pub(crate) fn valid_samples(samples: &[Sample]) -> Vec<(usize, &Sample)> {
    samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_valid())
        .collect()
}
