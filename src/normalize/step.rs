//! Step-mode normalization

use super::{index_x, valid_samples, NormalizerSettings, ValueScale};
use crate::geometry::{clamp_x, clamp_y, step_path};
use crate::status::StatusPalette;
use crate::types::{NormalizedPoint, Sample, StepGeometry, StepPoint};

/// Build a right-continuous step path over the valid samples.
///
/// Uses the same scale as line mode. Coordinates are clamped before they
/// reach the path builder, and every point gets a color from `palette`.
pub fn normalize_step_with(
    samples: &[Sample],
    settings: &NormalizerSettings,
    palette: &StatusPalette,
) -> StepGeometry {
    let valid = valid_samples(samples);
    let Some(scale) = ValueScale::from_values(valid.iter().map(|(_, s)| s.value), settings) else {
        tracing::trace!(total = samples.len(), "step series has no valid samples");
        return StepGeometry::empty();
    };

    let n = valid.len();
    let points: Vec<StepPoint> = valid
        .into_iter()
        .enumerate()
        .map(|(i, (source_index, sample))| {
            let status = sample.status();
            StepPoint {
                point: NormalizedPoint {
                    source_index,
                    label: sample.label.clone(),
                    value: sample.value,
                    x: clamp_x(index_x(i, n)),
                    y: clamp_y(scale.map(sample.value)),
                },
                status,
                color: palette.color(status),
            }
        })
        .collect();

    let coords: Vec<(f64, f64)> = points.iter().map(|sp| (sp.point.x, sp.point.y)).collect();
    let path = step_path(&coords).to_svg(settings.path_precision);

    StepGeometry {
        points,
        path,
        value_range: scale.display_range(),
    }
}
