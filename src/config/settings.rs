//! Chart settings stored as TOML
//!
//! Settings are meant to be edited by hand, so every field has a serde
//! default: a file containing only the keys a user cares about is valid.
//!
//! # Main Types
//!
//! - [`ChartSettings`] - Top-level settings file
//! - [`ViewSettings`] - How the viewer draws charts
//!
//! # Example File
//!
//! ```toml
//! [normalizer]
//! padding_ratio = 0.05
//!
//! [palette]
//! warning = [250, 204, 21, 255]
//!
//! [view]
//! default_kind = "Step"
//! show_markers = false
//! ```

use super::{ensure_app_data_dir, settings_path, SETTINGS_FILE};
use crate::error::{Result, TraceChartsError};
use crate::geometry::SvgStyle;
use crate::normalize::{NormalizerSettings, SeriesNormalizer};
use crate::status::{Rgba, StatusPalette};
use crate::types::ChartKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All chart settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub normalizer: NormalizerSettings,
    #[serde(default)]
    pub palette: StatusPalette,
    #[serde(default)]
    pub view: ViewSettings,
}

impl ChartSettings {
    /// Load settings from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        let path = settings_path().ok_or_else(|| {
            TraceChartsError::Config("Could not determine settings path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load settings from a specific TOML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TraceChartsError::Config(format!("Failed to read settings: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse settings and reset any out-of-range values
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(content)
            .map_err(|e| TraceChartsError::Config(format!("Failed to parse settings: {}", e)))?;

        let reset = settings.sanitize();
        if !reset.is_empty() {
            tracing::warn!(fields = ?reset, "Out-of-range settings replaced with defaults");
        }
        Ok(settings)
    }

    /// Load settings, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load chart settings, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(SETTINGS_FILE))
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            TraceChartsError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| TraceChartsError::Config(format!("Failed to write settings: {}", e)))
    }

    /// Replace out-of-range values with defaults, returning the reset fields
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = self.normalizer.sanitize();
        reset.extend(self.view.sanitize());
        reset
    }

    /// Normalizer configured from these settings
    pub fn normalizer(&self) -> SeriesNormalizer {
        SeriesNormalizer::new(self.normalizer, self.palette)
    }

    /// SVG export style matching the on-screen view
    pub fn svg_style(&self, title: Option<String>) -> SvgStyle {
        SvgStyle {
            title,
            stroke: self.view.line_color,
            stroke_width: self.view.line_width as f64,
            marker_radius: if self.view.show_markers { 0.8 } else { 0.0 },
            precision: self.normalizer.path_precision,
            ..SvgStyle::default()
        }
    }
}

/// Viewer display options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Stroke color for line charts
    #[serde(default = "default_line_color")]
    pub line_color: Rgba,

    /// Stroke width in points
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Draw a marker at every sample
    #[serde(default = "default_true")]
    pub show_markers: bool,

    /// Chart kind for newly loaded series
    #[serde(default)]
    pub default_kind: ChartKind,

    /// Decimals shown on axis labels and tooltips
    #[serde(default = "default_axis_decimals")]
    pub axis_decimals: usize,

    /// Horizontal grid lines between min and max
    #[serde(default = "default_grid_lines")]
    pub grid_lines: usize,

    /// Minimum chart height in points
    #[serde(default = "default_chart_height")]
    pub chart_height: f32,
}

fn default_line_color() -> Rgba {
    [56, 189, 248, 255]
}

fn default_line_width() -> f32 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_axis_decimals() -> usize {
    2
}

fn default_grid_lines() -> usize {
    4
}

fn default_chart_height() -> f32 {
    240.0
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            line_color: default_line_color(),
            line_width: default_line_width(),
            show_markers: true,
            default_kind: ChartKind::default(),
            axis_decimals: default_axis_decimals(),
            grid_lines: default_grid_lines(),
            chart_height: default_chart_height(),
        }
    }
}

impl ViewSettings {
    fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            self.line_width = default_line_width();
            reset.push("line_width");
        }
        if self.axis_decimals > 6 {
            self.axis_decimals = default_axis_decimals();
            reset.push("axis_decimals");
        }
        if self.grid_lines > 20 {
            self.grid_lines = default_grid_lines();
            reset.push("grid_lines");
        }
        if !self.chart_height.is_finite() || self.chart_height < 80.0 {
            self.chart_height = default_chart_height();
            reset.push("chart_height");
        }
        reset
    }
}
