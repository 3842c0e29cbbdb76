//! Memoized chart geometry
//!
//! Charts are redrawn every frame while their data rarely changes. This
//! module keeps the last computed geometry together with a fingerprint of
//! the input series and only recomputes when the fingerprint changes.
//!
//! The fingerprint covers every label, the exact bit pattern of every value
//! and every status code, so any edit to the series (including reordering)
//! invalidates the cached result. Results are identical with or without the
//! cache.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::normalize::SeriesNormalizer;
use crate::types::{BarGeometry, LineGeometry, Sample, StepGeometry};

/// Content hash of a sample series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesFingerprint(u64);

impl SeriesFingerprint {
    pub fn of(samples: &[Sample]) -> Self {
        let mut hasher = DefaultHasher::new();
        samples.len().hash(&mut hasher);
        for sample in samples {
            sample.label.hash(&mut hasher);
            sample.value.to_bits().hash(&mut hasher);
            sample.status_code.hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Single-entry memo keyed on a series fingerprint
#[derive(Debug, Clone)]
pub struct Memoized<T> {
    key: Option<SeriesFingerprint>,
    value: Option<T>,
    hits: u64,
    misses: u64,
}

impl<T> Default for Memoized<T> {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> Memoized<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `samples`, computing it on a fingerprint change
    pub fn get_or_compute<F>(&mut self, samples: &[Sample], compute: F) -> &T
    where
        F: FnOnce(&[Sample]) -> T,
    {
        let key = SeriesFingerprint::of(samples);
        match self.value.take() {
            Some(value) if self.key == Some(key) => {
                self.hits += 1;
                self.value.insert(value)
            }
            _ => {
                self.misses += 1;
                tracing::trace!(fingerprint = key.value(), "recomputing chart geometry");
                self.key = Some(key);
                self.value.insert(compute(samples))
            }
        }
    }

    /// Drop the cached value so the next lookup recomputes
    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }

    pub fn is_cached(&self) -> bool {
        self.value.is_some()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Aggregate hit/miss counters across all chart modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Per-chart geometry cache for all three modes
#[derive(Debug, Clone, Default)]
pub struct GeometryCache {
    normalizer: SeriesNormalizer,
    line: Memoized<LineGeometry>,
    step: Memoized<StepGeometry>,
    bar: Memoized<BarGeometry>,
}

impl GeometryCache {
    pub fn new(normalizer: SeriesNormalizer) -> Self {
        Self {
            normalizer,
            ..Default::default()
        }
    }

    pub fn normalizer(&self) -> &SeriesNormalizer {
        &self.normalizer
    }

    /// Swap the normalizer; cached geometry is dropped if it changed
    pub fn set_normalizer(&mut self, normalizer: SeriesNormalizer) {
        if self.normalizer != normalizer {
            self.normalizer = normalizer;
            self.invalidate();
        }
    }

    pub fn line(&mut self, samples: &[Sample]) -> &LineGeometry {
        let normalizer = &self.normalizer;
        self.line.get_or_compute(samples, |s| normalizer.line(s))
    }

    pub fn step(&mut self, samples: &[Sample]) -> &StepGeometry {
        let normalizer = &self.normalizer;
        self.step.get_or_compute(samples, |s| normalizer.step(s))
    }

    pub fn bar(&mut self, samples: &[Sample]) -> &BarGeometry {
        let normalizer = &self.normalizer;
        self.bar.get_or_compute(samples, |s| normalizer.bar(s))
    }

    pub fn invalidate(&mut self) {
        self.line.invalidate();
        self.step.invalidate();
        self.bar.invalidate();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.line.hits() + self.step.hits() + self.bar.hits(),
            misses: self.line.misses() + self.step.misses() + self.bar.misses(),
        }
    }
}
