//! Frontend module for the trace-charts viewer
//!
//! An eframe application that loads series files and renders them as line,
//! step or bar charts from the normalizer's geometry.
//!
//! # Layout
//!
//! - Menu bar: open, recent files, SVG export, chart mode
//! - Left side panel: loaded series with sparklines
//! - Central panel: the selected series' chart with axis labels and tooltips
//! - Bottom status bar: sample counts, cache counters, last error
//!
//! # Keyboard Shortcuts
//!
//! - `Ctrl+O` - Open a series file
//! - `Ctrl+E` - Export the current chart as SVG
//! - `M` - Cycle chart mode

pub mod chart;
pub mod status_bar;
pub mod widgets;

use std::path::{Path, PathBuf};

use egui::RichText;

use crate::cache::{CacheStats, GeometryCache};
use crate::config::{AppState, ChartSettings};
use crate::error::Result;
use crate::geometry::{bar_document, line_document, step_document, write_svg};
use crate::source::{load_series, SensorSeries, SeriesFormat};
use crate::types::ChartKind;

use chart::SeriesChart;
use status_bar::{render_status_bar, StatusBarContext};
use widgets::{ColorSwatch, Sparkline, StatusBadge, ValueDisplay};

/// A series loaded into the viewer together with its chart state
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: SensorSeries,
    pub source: PathBuf,
    pub kind: ChartKind,
    pub cache: GeometryCache,
}

/// Actions raised by the UI and applied after rendering
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    OpenFile(PathBuf),
    Select(usize),
    SetKind(ChartKind),
    CycleKind,
    Remove(usize),
    ExportSvg(PathBuf),
    ReloadSettings,
}

/// Main chart viewer application
pub struct ChartViewerApp {
    app_state: AppState,
    settings: ChartSettings,
    series: Vec<LoadedSeries>,
    selected: Option<usize>,
    last_error: Option<String>,
}

impl ChartViewerApp {
    pub fn new(app_state: AppState, settings: ChartSettings) -> Self {
        Self {
            app_state,
            settings,
            series: Vec::new(),
            selected: None,
            last_error: None,
        }
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn series(&self) -> &[LoadedSeries] {
        &self.series
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&LoadedSeries> {
        self.selected.and_then(|i| self.series.get(i))
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Load every series in `path`, replacing series previously loaded from it
    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let loaded = load_series(path)?;

        self.series.retain(|s| s.source != path);
        let first_new = self.series.len();
        let normalizer = self.settings.normalizer();
        let kind = self.settings.view.default_kind;

        let name = loaded
            .first()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| path.display().to_string());

        self.series.extend(loaded.into_iter().map(|series| LoadedSeries {
            series,
            source: path.to_path_buf(),
            kind,
            cache: GeometryCache::new(normalizer.clone()),
        }));
        let count = self.series.len();
        self.selected = if first_new < count {
            Some(first_new)
        } else {
            // Nothing new; keep what was selected if it survived the reload
            self.selected
                .filter(|&i| i < count)
                .or_else(|| count.checked_sub(1))
        };

        self.app_state.add_recent_file(path, &name);
        self.last_error = None;
        Ok(())
    }

    /// Change the mode of the selected chart
    pub fn set_kind(&mut self, kind: ChartKind) {
        if let Some(loaded) = self.selected.and_then(|i| self.series.get_mut(i)) {
            tracing::debug!(series = %loaded.series.name, %kind, "chart mode changed");
            loaded.kind = kind;
        }
    }

    /// Swap in new settings; cached geometry is dropped where it changes
    pub fn apply_settings(&mut self, settings: ChartSettings) {
        let normalizer = settings.normalizer();
        for loaded in &mut self.series {
            loaded.cache.set_normalizer(normalizer.clone());
        }
        self.settings = settings;
    }

    /// Write the selected chart as a standalone SVG document
    pub fn export_svg(&mut self, path: &Path) -> Result<()> {
        let Some(loaded) = self.selected.and_then(|i| self.series.get_mut(i)) else {
            return Err(crate::error::TraceChartsError::Export(
                "No series selected".to_string(),
            ));
        };

        let style = self.settings.svg_style(Some(loaded.series.display_name()));
        let samples = &loaded.series.samples;
        let document = match loaded.kind {
            ChartKind::Line => line_document(loaded.cache.line(samples), &style),
            ChartKind::Step => step_document(loaded.cache.step(samples), &style),
            ChartKind::Bar => bar_document(loaded.cache.bar(samples), &style),
        };
        write_svg(path, &document)
    }

    /// Aggregate cache counters over all loaded series
    pub fn cache_stats(&self) -> CacheStats {
        self.series.iter().fold(CacheStats::default(), |acc, s| {
            let stats = s.cache.stats();
            CacheStats {
                hits: acc.hits + stats.hits,
                misses: acc.misses + stats.misses,
            }
        })
    }

    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::OpenFile(path) => {
                if let Err(e) = self.open_file(&path) {
                    tracing::warn!("Failed to open {}: {}", path.display(), e);
                    if !path.exists() {
                        self.app_state.remove_recent_file(&path);
                    }
                    self.last_error = Some(format!("Failed to open file: {}", e));
                }
            }
            AppAction::Select(index) => {
                if index < self.series.len() {
                    self.selected = Some(index);
                }
            }
            AppAction::SetKind(kind) => self.set_kind(kind),
            AppAction::CycleKind => {
                if let Some(kind) = self.selected().map(|s| s.kind.next()) {
                    self.set_kind(kind);
                }
            }
            AppAction::Remove(index) => {
                if index < self.series.len() {
                    self.series.remove(index);
                    self.selected = match self.selected {
                        _ if self.series.is_empty() => None,
                        Some(sel) if sel > index => Some(sel - 1),
                        Some(sel) => Some(sel.min(self.series.len() - 1)),
                        None => None,
                    };
                }
            }
            AppAction::ExportSvg(path) => match self.export_svg(&path) {
                Ok(()) => self.last_error = None,
                Err(e) => {
                    tracing::warn!("SVG export failed: {}", e);
                    self.last_error = Some(format!("Export failed: {}", e));
                }
            },
            AppAction::ReloadSettings => match ChartSettings::load() {
                Ok(settings) => {
                    tracing::info!("Chart settings reloaded");
                    self.apply_settings(settings);
                }
                Err(e) => self.last_error = Some(format!("Failed to reload settings: {}", e)),
            },
        }
    }

    fn pick_series_file() -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open Series")
            .add_filter("Series", SeriesFormat::extensions())
            .pick_file()
    }

    fn pick_export_file(&self) -> Option<PathBuf> {
        let name = self
            .selected()
            .map(|s| format!("{}.svg", s.series.name))
            .unwrap_or_else(|| "chart.svg".to_string());
        rfd::FileDialog::new()
            .set_title("Export SVG")
            .set_file_name(name)
            .add_filter("SVG", &["svg"])
            .save_file()
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        use egui::Key;

        let mut open = false;
        let mut export = false;
        let mut cycle = false;

        ctx.input(|i| {
            if i.key_pressed(Key::O) && i.modifiers.command_only() {
                open = true;
            }
            if i.key_pressed(Key::E) && i.modifiers.command_only() {
                export = true;
            }
            if i.key_pressed(Key::M) && !i.modifiers.any() {
                cycle = true;
            }
        });

        let mut actions = Vec::new();
        if open {
            if let Some(path) = Self::pick_series_file() {
                actions.push(AppAction::OpenFile(path));
            }
        }
        if export && self.selected.is_some() {
            if let Some(path) = self.pick_export_file() {
                actions.push(AppAction::ExportSvg(path));
            }
        }
        if cycle && ctx.memory(|m| m.focused().is_none()) {
            actions.push(AppAction::CycleKind);
        }
        actions
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context, actions: &mut Vec<AppAction>) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Series...").clicked() {
                        if let Some(path) = Self::pick_series_file() {
                            actions.push(AppAction::OpenFile(path));
                        }
                        ui.close();
                    }

                    ui.menu_button("Open Recent", |ui| {
                        if self.app_state.recent_files.is_empty() {
                            ui.label(RichText::new("No recent files").weak());
                        }
                        for recent in &self.app_state.recent_files {
                            let response = ui
                                .button(recent.name.as_str())
                                .on_hover_text(format!(
                                    "{}\n{}",
                                    recent.path.display(),
                                    recent.last_opened_display()
                                ));
                            if response.clicked() {
                                actions.push(AppAction::OpenFile(recent.path.clone()));
                                ui.close();
                            }
                        }
                    });

                    ui.separator();

                    let can_export = self.selected.is_some();
                    if ui
                        .add_enabled(can_export, egui::Button::new("Export SVG..."))
                        .clicked()
                    {
                        if let Some(path) = self.pick_export_file() {
                            actions.push(AppAction::ExportSvg(path));
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Reload Settings").clicked() {
                        actions.push(AppAction::ReloadSettings);
                        ui.close();
                    }

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    let current = self.selected().map(|s| s.kind);
                    ui.add_enabled_ui(current.is_some(), |ui| {
                        for &kind in ChartKind::all() {
                            let label = format!("{} {}", kind.icon(), kind.display_name());
                            if ui.selectable_label(current == Some(kind), label).clicked() {
                                actions.push(AppAction::SetKind(kind));
                                ui.close();
                            }
                        }
                    });

                    ui.separator();

                    ui.checkbox(
                        &mut self.app_state.ui_preferences.show_series_panel,
                        "Series Panel",
                    );
                    if ui
                        .checkbox(&mut self.app_state.ui_preferences.dark_mode, "Dark Mode")
                        .changed()
                    {
                        apply_theme(ctx, self.app_state.ui_preferences.dark_mode);
                    }
                });
            });
        });
    }

    fn render_series_panel(&mut self, ctx: &egui::Context, actions: &mut Vec<AppAction>) {
        egui::SidePanel::left("series_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Series");
                ui.separator();

                if self.series.is_empty() {
                    ui.label(RichText::new("Open or drop a .json / .csv file").weak());
                    return;
                }

                let line_color = chart::to_color32(self.settings.view.line_color);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (i, loaded) in self.series.iter_mut().enumerate() {
                        ui.horizontal(|ui| {
                            let selected = self.selected == Some(i);
                            if ui
                                .selectable_label(selected, loaded.series.display_name())
                                .clicked()
                            {
                                actions.push(AppAction::Select(i));
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                                        actions.push(AppAction::Remove(i));
                                    }
                                    let geometry = loaded.cache.line(&loaded.series.samples);
                                    ui.add(
                                        Sparkline::new(geometry)
                                            .with_size(60.0, 16.0)
                                            .with_color(line_color),
                                    );
                                },
                            );
                        });
                    }
                });
            });
    }

    fn render_chart_panel(&mut self, ctx: &egui::Context, actions: &mut Vec<AppAction>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(loaded) = self.selected.and_then(|i| self.series.get_mut(i)) else {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No series loaded").weak());
                });
                return;
            };

            ui.horizontal(|ui| {
                ui.heading(loaded.series.display_name());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for &kind in ChartKind::all().iter().rev() {
                        if ui
                            .selectable_label(loaded.kind == kind, kind.display_name())
                            .clicked()
                        {
                            actions.push(AppAction::SetKind(kind));
                        }
                    }
                });
            });

            let decimals = self.settings.view.axis_decimals;
            let unit = loaded.series.unit.as_deref();
            ui.horizontal(|ui| {
                let finite = loaded.series.samples.iter().filter(|s| s.is_valid());
                let (min, max) = finite.fold((f64::NAN, f64::NAN), |(lo, hi), s| {
                    (lo.min(s.value), hi.max(s.value))
                });
                ui.add(ValueDisplay::from_f64("Min", min, decimals).with_unit(unit));
                ui.separator();
                ui.add(ValueDisplay::from_f64("Max", max, decimals).with_unit(unit));

                if let Some(last) = loaded.series.samples.last() {
                    ui.separator();
                    ui.add(ValueDisplay::from_f64("Last", last.value, decimals).with_unit(unit));
                    ui.add(StatusBadge::new(last.status(), &self.settings.palette));
                }

                if loaded.kind != ChartKind::Line {
                    ui.separator();
                    let palette = &self.settings.palette;
                    for (color, name) in [
                        (palette.normal, "Normal"),
                        (palette.warning, "Warning"),
                        (palette.critical, "Critical"),
                    ] {
                        ui.add(ColorSwatch::new(chart::to_color32(color)));
                        ui.label(RichText::new(name).small());
                    }
                }
            });

            ui.separator();

            ui.add(
                SeriesChart::new(
                    &loaded.series.samples,
                    &mut loaded.cache,
                    loaded.kind,
                    &self.settings.view,
                )
                .with_unit(unit),
            );
        });
    }
}

/// Apply the light or dark theme
pub fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = self.handle_keyboard_shortcuts(ctx);

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        actions.extend(dropped.into_iter().map(AppAction::OpenFile));

        self.render_menu_bar(ctx, &mut actions);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status_ctx = StatusBarContext {
                series: self.selected().map(|s| &s.series),
                series_count: self.series.len(),
                kind: self.selected().map(|s| s.kind).unwrap_or_default(),
                cache: self.cache_stats(),
                last_error: self.last_error.as_deref(),
            };
            render_status_bar(ui, &status_ctx);
        });

        if self.app_state.ui_preferences.show_series_panel {
            self.render_series_panel(ctx, &mut actions);
        }

        self.render_chart_panel(ctx, &mut actions);

        for action in actions {
            self.handle_action(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_app_is_empty() {
        let app = ChartViewerApp::new(AppState::default(), ChartSettings::default());
        assert!(app.series().is_empty());
        assert!(app.selected().is_none());
        assert_eq!(app.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_remove_adjusts_selection() {
        let mut app = ChartViewerApp::new(AppState::default(), ChartSettings::default());
        for name in ["a", "b", "c"] {
            app.series.push(LoadedSeries {
                series: SensorSeries::new(name, Vec::new()),
                source: PathBuf::from(format!("{}.csv", name)),
                kind: ChartKind::Line,
                cache: GeometryCache::default(),
            });
        }
        app.selected = Some(2);

        app.handle_action(AppAction::Remove(0));
        assert_eq!(app.selected_index(), Some(1));
        assert_eq!(app.selected().unwrap().series.name, "c");

        app.handle_action(AppAction::Remove(1));
        assert_eq!(app.selected_index(), Some(0));

        app.handle_action(AppAction::Remove(0));
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn test_opening_empty_file_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{"series": []}"#).unwrap();

        let mut app = ChartViewerApp::new(AppState::default(), ChartSettings::default());
        for name in ["a", "b"] {
            app.series.push(LoadedSeries {
                series: SensorSeries::new(name, Vec::new()),
                source: PathBuf::from(format!("{}.csv", name)),
                kind: ChartKind::Line,
                cache: GeometryCache::default(),
            });
        }
        app.selected = Some(1);

        app.open_file(&empty).unwrap();
        assert_eq!(app.series().len(), 2);
        assert_eq!(app.selected_index(), Some(1));
    }

    #[test]
    fn test_export_without_selection_fails() {
        let mut app = ChartViewerApp::new(AppState::default(), ChartSettings::default());
        assert!(app.export_svg(Path::new("out.svg")).is_err());
    }
}
