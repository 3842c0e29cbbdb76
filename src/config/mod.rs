//! Configuration module for trace-charts
//!
//! This module handles:
//! - Application state persistence (recent series files, last session)
//! - Chart settings (normalizer knobs, status palette, view options)
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.ptrace.trace-charts/`
//! - **macOS**: `~/Library/Application Support/dev.ptrace.trace-charts/`
//! - **Windows**: `%APPDATA%\dev.ptrace.trace-charts\`
//!
//! # Files
//!
//! - `app_state.json` - Recent files and UI preferences
//! - `settings.toml` - Chart settings, hand-editable
//! - `logs/` - Daily rolling log files
//!
//! # Example
//!
//! ```ignore
//! use trace_charts::config::{AppState, ChartSettings};
//!
//! let mut state = AppState::load_or_default();
//! let settings = ChartSettings::load_or_default();
//!
//! state.add_recent_file("readings.json", "Boiler");
//! state.save()?;
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, TraceChartsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.ptrace.trace-charts";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Chart settings filename
pub const SETTINGS_FILE: &str = "settings.toml";

/// Log directory name inside the app data dir
pub const LOG_DIR: &str = "logs";

/// Maximum number of recent files to remember
pub const MAX_RECENT_FILES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        TraceChartsError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            TraceChartsError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

/// Get the path to the chart settings file
pub fn settings_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(SETTINGS_FILE))
}

/// Get the log directory path
pub fn log_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOG_DIR))
}

// ==================== Recent File Entry ====================

/// A recently opened series file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentFile {
    /// Path to the series file
    pub path: PathBuf,

    /// Display name (first series name or file stem)
    pub name: String,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: i64,
}

impl RecentFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            last_opened: chrono::Utc::now().timestamp(),
        }
    }

    /// Check if the file still exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Human-readable local time of the last open
    pub fn last_opened_display(&self) -> String {
        chrono::DateTime::<chrono::Utc>::from_timestamp(self.last_opened, 0)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_default()
    }
}

// ==================== App State ====================

/// Persistent application state
///
/// History and preferences that survive restarts, stored as JSON in the
/// app data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    /// Recently opened series files, most recent first
    #[serde(default)]
    pub recent_files: Vec<RecentFile>,

    /// Path to the last opened series file
    #[serde(default)]
    pub last_series_path: Option<PathBuf>,

    /// UI preferences
    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_files: Vec::new(),
            last_series_path: None,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            TraceChartsError::Config("Could not determine app state path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load app state from a specific file; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TraceChartsError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| TraceChartsError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }

    /// Save app state to a specific file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            TraceChartsError::Config(format!("Failed to serialize app state: {}", e))
        })?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| TraceChartsError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or update a recent file and mark it as the last opened
    pub fn add_recent_file(&mut self, path: impl AsRef<Path>, name: &str) {
        let path = path.as_ref().to_path_buf();

        self.recent_files.retain(|f| f.path != path);
        self.recent_files.insert(0, RecentFile::new(path.clone(), name));
        self.recent_files.truncate(MAX_RECENT_FILES);

        self.last_series_path = Some(path);
    }

    /// Remove a file from recents (e.g. if it was deleted)
    pub fn remove_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_files.retain(|f| f.path != path);

        if self.last_series_path.as_deref() == Some(path) {
            self.last_series_path = None;
        }
    }

    /// Drop recent files that no longer exist
    pub fn cleanup_missing_files(&mut self) {
        self.recent_files.retain(|f| f.exists());

        if let Some(ref last) = self.last_series_path {
            if !last.exists() {
                self.last_series_path = None;
            }
        }
    }

    /// Get the most recent series path if it still exists
    pub fn get_last_file(&self) -> Option<&Path> {
        self.last_series_path
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| p.as_path())
    }
}

/// UI preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Font scale factor
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,

    /// Show the series side panel
    #[serde(default = "default_true")]
    pub show_series_panel: bool,
}

fn default_true() -> bool {
    true
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
            show_series_panel: true,
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert!(state.recent_files.is_empty());
        assert!(state.last_series_path.is_none());
        assert_eq!(state.version, 1);
        assert!(state.ui_preferences.dark_mode);
    }

    #[test]
    fn test_add_recent_file() {
        let mut state = AppState::default();

        state.add_recent_file("/data/boiler.json", "Boiler");
        assert_eq!(state.recent_files.len(), 1);
        assert_eq!(state.recent_files[0].name, "Boiler");

        state.add_recent_file("/data/pump.csv", "Pump");
        assert_eq!(state.recent_files.len(), 2);
        assert_eq!(state.recent_files[0].name, "Pump"); // Most recent first

        // Re-adding moves to the front without duplicating
        state.add_recent_file("/data/boiler.json", "Boiler 2");
        assert_eq!(state.recent_files.len(), 2);
        assert_eq!(state.recent_files[0].name, "Boiler 2");
        assert_eq!(
            state.last_series_path,
            Some(PathBuf::from("/data/boiler.json"))
        );
    }

    #[test]
    fn test_recent_files_max_limit() {
        let mut state = AppState::default();

        for i in 0..15 {
            state.add_recent_file(format!("/data/series{}.json", i), &format!("Series {}", i));
        }

        assert_eq!(state.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(state.recent_files[0].name, "Series 14");
    }

    #[test]
    fn test_remove_recent_file() {
        let mut state = AppState::default();
        state.add_recent_file("/data/a.json", "A");
        state.add_recent_file("/data/b.json", "B");

        state.remove_recent_file("/data/b.json");
        assert_eq!(state.recent_files.len(), 1);
        assert!(state.last_series_path.is_none());
    }

    #[test]
    fn test_cleanup_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("kept.csv");
        std::fs::write(&existing, "label,value\n").unwrap();

        let mut state = AppState::default();
        state.add_recent_file(dir.path().join("gone.csv"), "Gone");
        state.add_recent_file(&existing, "Kept");

        state.cleanup_missing_files();
        assert_eq!(state.recent_files.len(), 1);
        assert_eq!(state.get_last_file(), Some(existing.as_path()));
    }

    #[test]
    fn test_app_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.add_recent_file("/data/boiler.json", "Boiler");
        state.ui_preferences.font_scale = 1.25;
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.recent_files, state.recent_files);
        assert_eq!(loaded.ui_preferences.font_scale, 1.25);
    }

    #[test]
    fn test_load_missing_and_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);
        assert!(AppState::load_from(&path).unwrap().recent_files.is_empty());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppState::load_from(&path),
            Err(TraceChartsError::Config(_))
        ));
    }

    #[test]
    fn test_partial_state_uses_defaults() {
        let parsed: AppState = serde_json::from_str(r#"{"recent_files": []}"#).unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.ui_preferences, UiPreferences::default());
    }
}
