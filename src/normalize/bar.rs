//! Bar-mode normalization

use super::NormalizerSettings;
use crate::status::StatusPalette;
use crate::types::{Bar, BarGeometry, Sample, COORD_MAX};

/// Lay out one bar per sample against a zero baseline.
///
/// Bars are scaled against the largest finite value with no padding. Every
/// sample keeps its slot; invalid or non-positive values, and any series
/// whose max is not positive, give zero-height bars.
pub fn normalize_bar_with(
    samples: &[Sample],
    settings: &NormalizerSettings,
    palette: &StatusPalette,
) -> BarGeometry {
    let n = samples.len();
    if n == 0 {
        return BarGeometry::empty();
    }

    let max_y = samples
        .iter()
        .filter(|s| s.is_valid())
        .map(|s| s.value)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0);

    let slot = COORD_MAX / n as f64;
    let width = slot * settings.bar_occupancy;

    if max_y <= 0.0 {
        tracing::trace!(bars = n, max_y, "bar series has no positive values");
    }

    let bars = samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let status = sample.status();
            let height = if max_y > 0.0 && sample.is_valid() && sample.value > 0.0 {
                ((sample.value / max_y) * COORD_MAX).clamp(0.0, COORD_MAX)
            } else {
                0.0
            };
            Bar {
                label: sample.label.clone(),
                value: sample.value,
                status,
                color: palette.color(status),
                x: (i as f64 / n as f64) * COORD_MAX,
                width,
                height,
            }
        })
        .collect();

    BarGeometry { bars, max_y }
}
