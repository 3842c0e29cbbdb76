//! Loading sample series from files
//!
//! Historical readings arrive either as JSON payloads shaped like the
//! monitoring platform's REST responses or as simple CSV exports. Both
//! loaders keep input order exactly and turn unreadable values into NaN
//! (invalid readings) instead of failing the whole file.
//!
//! # Main Types
//!
//! - [`SensorSeries`] - A named, ordered list of samples
//! - [`SeriesFormat`] - File format chosen by extension
//!
//! # Example
//!
//! ```ignore
//! use trace_charts::source::load_series;
//!
//! for series in load_series("readings.json")? {
//!     println!("{}: {} samples", series.name, series.samples.len());
//! }
//! ```

mod csv;
mod json;

pub use csv::parse_csv_str;
pub use json::parse_json_str;

use crate::error::{Result, ResultExt, TraceChartsError};
use crate::types::Sample;
use std::path::Path;

/// A named series of samples from one sensor
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSeries {
    pub name: String,
    pub unit: Option<String>,
    pub samples: Vec<Sample>,
}

impl SensorSeries {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            samples,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Number of samples with a finite value
    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_valid()).count()
    }

    /// Name with the unit appended, e.g. `Boiler temp (°C)`
    pub fn display_name(&self) -> String {
        match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{} ({})", self.name, unit),
            _ => self.name.clone(),
        }
    }
}

/// Supported series file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Json,
    Csv,
}

impl SeriesFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SeriesFormat::Json),
            "csv" => Some(SeriesFormat::Csv),
            _ => None,
        }
    }

    pub fn extensions() -> &'static [&'static str] {
        &["json", "csv"]
    }
}

/// Load every series contained in a file.
///
/// The file stem is used as the series name when the payload does not
/// carry one.
pub fn load_series(path: impl AsRef<Path>) -> Result<Vec<SensorSeries>> {
    let path = path.as_ref();
    let format = SeriesFormat::from_path(path)
        .ok_or_else(|| TraceChartsError::UnsupportedFormat(path.to_path_buf()))?;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read series file {}", path.display()))?;

    let default_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("series");

    let series = match format {
        SeriesFormat::Json => parse_json_str(&text, default_name),
        SeriesFormat::Csv => parse_csv_str(&text, default_name).map(|s| vec![s]),
    }
    .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        series = series.len(),
        samples = series.iter().map(|s| s.samples.len()).sum::<usize>(),
        "Loaded series file"
    );
    Ok(series)
}
