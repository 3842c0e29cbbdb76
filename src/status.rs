//! Sensor status levels and their display colors
//!
//! Status codes arrive as bare integers from the readings API. They are
//! resolved into a closed [`StatusLevel`] and then into a color through a
//! [`StatusPalette`]. Both steps are total: an unknown or missing code maps
//! to [`StatusLevel::Unknown`], which always has a color.
//!
//! Status never influences geometry, only color.

use serde::{Deserialize, Serialize};

/// RGBA color, matching the `[u8; 4]` layout used across the crate
pub type Rgba = [u8; 4];

/// Status code for a normal reading
pub const STATUS_NORMAL: i32 = 0;
/// Status code for a warning reading
pub const STATUS_WARNING: i32 = 10;
/// Status code for a critical reading
pub const STATUS_CRITICAL: i32 = 20;

/// Closed set of status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StatusLevel {
    Normal,
    Warning,
    Critical,
    /// Missing or unrecognized code
    #[default]
    Unknown,
}

impl StatusLevel {
    /// Resolve a raw status code
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(STATUS_NORMAL) => StatusLevel::Normal,
            Some(STATUS_WARNING) => StatusLevel::Warning,
            Some(STATUS_CRITICAL) => StatusLevel::Critical,
            _ => StatusLevel::Unknown,
        }
    }

    /// Get display name for this level
    pub fn display_name(&self) -> &'static str {
        match self {
            StatusLevel::Normal => "Normal",
            StatusLevel::Warning => "Warning",
            StatusLevel::Critical => "Critical",
            StatusLevel::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Colors used for each status level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPalette {
    #[serde(default = "default_normal")]
    pub normal: Rgba,
    #[serde(default = "default_warning")]
    pub warning: Rgba,
    #[serde(default = "default_critical")]
    pub critical: Rgba,
    /// Fallback for unknown or missing codes
    #[serde(default = "default_unknown")]
    pub unknown: Rgba,
}

fn default_normal() -> Rgba {
    [34, 197, 94, 255]
}

fn default_warning() -> Rgba {
    [245, 158, 11, 255]
}

fn default_critical() -> Rgba {
    [239, 68, 68, 255]
}

fn default_unknown() -> Rgba {
    [100, 116, 139, 255]
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            normal: default_normal(),
            warning: default_warning(),
            critical: default_critical(),
            unknown: default_unknown(),
        }
    }
}

impl StatusPalette {
    /// Color for a status level
    pub fn color(&self, level: StatusLevel) -> Rgba {
        match level {
            StatusLevel::Normal => self.normal,
            StatusLevel::Warning => self.warning,
            StatusLevel::Critical => self.critical,
            StatusLevel::Unknown => self.unknown,
        }
    }

    /// Color for a raw status code
    pub fn color_for_code(&self, code: Option<i32>) -> Rgba {
        self.color(StatusLevel::from_code(code))
    }
}

/// Format a color as `#rrggbb` for SVG attributes (alpha is dropped)
pub fn to_hex(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}
