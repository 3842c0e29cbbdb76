//! Padded value scale shared by line and step modes

use super::NormalizerSettings;
use crate::types::{ValueRange, COORD_CENTER, COORD_MAX};

/// Linear map from values into the 0–100 vertical space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub min: f64,
    pub max: f64,
    pub padding: f64,
    pub denominator: f64,
}

impl ValueScale {
    /// Build the scale from finite values. Returns `None` when there are none.
    pub fn from_values(
        values: impl IntoIterator<Item = f64>,
        settings: &NormalizerSettings,
    ) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((mn, mx)) => Some((mn.min(v), mx.max(v))),
            })?;

        let range = max - min;
        let padding = if range > 0.0 {
            range * settings.padding_ratio
        } else {
            settings.flat_margin
        };
        let denominator = range + 2.0 * padding;

        Some(Self {
            min,
            max,
            padding,
            denominator,
        })
    }

    /// Whether values can be divided into the scale
    pub fn is_degenerate(&self) -> bool {
        !(self.denominator > 0.0) || !self.denominator.is_finite()
    }

    /// Normalized height of a value; degenerate scales center everything
    pub fn map(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return COORD_CENTER;
        }
        let y = ((value - self.min + self.padding) / self.denominator) * COORD_MAX;
        if y.is_finite() {
            y
        } else {
            COORD_CENTER
        }
    }

    /// Padded range for axis labels; raw extrema when the scale is degenerate
    pub fn display_range(&self) -> ValueRange {
        let lo = self.min - self.padding;
        let hi = self.max + self.padding;
        if !self.is_degenerate() && lo.is_finite() && hi.is_finite() {
            ValueRange::new(lo, hi)
        } else {
            ValueRange::new(self.min, self.max)
        }
    }
}

/// Horizontal position of valid sample `index` out of `count`.
///
/// A lone sample sits in the middle of the chart.
pub fn index_x(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return COORD_CENTER;
    }
    (index as f64 / (count - 1) as f64) * COORD_MAX
}
