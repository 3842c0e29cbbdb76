//! Line-mode normalization

use super::{index_x, valid_samples, NormalizerSettings, ValueScale};
use crate::types::{LineGeometry, NormalizedPoint, Sample};

/// Map valid samples onto evenly spaced points on a padded value scale.
///
/// Invalid (non-finite) samples are dropped before spacing, so `x` reflects
/// the position among valid samples only. Output `y` is not clamped; the
/// padding keeps it inside `0..=100` by construction.
pub fn normalize_line_with(samples: &[Sample], settings: &NormalizerSettings) -> LineGeometry {
    let valid = valid_samples(samples);
    let Some(scale) = ValueScale::from_values(valid.iter().map(|(_, s)| s.value), settings) else {
        tracing::trace!(total = samples.len(), "line series has no valid samples");
        return LineGeometry::empty();
    };

    let n = valid.len();
    let points = valid
        .into_iter()
        .enumerate()
        .map(|(i, (source_index, sample))| NormalizedPoint {
            source_index,
            label: sample.label.clone(),
            value: sample.value,
            x: index_x(i, n),
            y: scale.map(sample.value),
        })
        .collect();

    LineGeometry {
        points,
        value_range: scale.display_range(),
    }
}
