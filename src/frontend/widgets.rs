//! Small reusable widgets for the chart viewer
//!
//! # Widgets
//!
//! - [`StatusBadge`] - Colored dot with the status level name
//! - [`ValueDisplay`] - Formatted value with label and optional unit
//! - [`ColorSwatch`] - Small colored square for palette previews
//! - [`Sparkline`] - Mini line chart of a series for the side panel

use egui::{Color32, Response, Ui, Widget};

use super::chart::{chart_to_screen, format_value, to_color32};
use crate::status::{StatusLevel, StatusPalette};
use crate::types::LineGeometry;

/// Status level shown as a colored dot and its name
pub struct StatusBadge {
    level: StatusLevel,
    color: Color32,
}

impl StatusBadge {
    pub fn new(level: StatusLevel, palette: &StatusPalette) -> Self {
        Self {
            level,
            color: to_color32(palette.color(level)),
        }
    }
}

impl Widget for StatusBadge {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(self.level.display_name());
        })
        .response
    }
}

/// A labeled value with an optional unit
pub struct ValueDisplay {
    label: String,
    value: String,
    unit: Option<String>,
}

impl ValueDisplay {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: None,
        }
    }

    /// Numeric value; non-finite readings show as `n/a`
    pub fn from_f64(label: impl Into<String>, value: f64, decimals: usize) -> Self {
        Self::new(label, format_value(value, decimals))
    }

    pub fn with_unit(mut self, unit: Option<&str>) -> Self {
        self.unit = unit.map(str::to_string);
        self
    }
}

impl Widget for ValueDisplay {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.label(format!("{}:", self.label));
            match self.unit {
                Some(unit) => ui.strong(format!("{} {}", self.value, unit)),
                None => ui.strong(self.value),
            };
        })
        .response
    }
}

/// A color swatch
pub struct ColorSwatch {
    color: Color32,
    size: f32,
}

impl ColorSwatch {
    pub fn new(color: Color32) -> Self {
        Self { color, size: 12.0 }
    }
}

impl Widget for ColorSwatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(self.size, self.size), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 2.0, self.color);
            ui.painter().rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, Color32::GRAY),
                egui::StrokeKind::Outside,
            );
        }

        response
    }
}

/// Mini line chart drawn from line-mode geometry
pub struct Sparkline<'a> {
    geometry: &'a LineGeometry,
    width: f32,
    height: f32,
    color: Color32,
}

impl<'a> Sparkline<'a> {
    pub fn new(geometry: &'a LineGeometry) -> Self {
        Self {
            geometry,
            width: 80.0,
            height: 20.0,
            color: Color32::WHITE,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    fn screen_points(&self, rect: egui::Rect) -> Vec<egui::Pos2> {
        self.geometry
            .points
            .iter()
            .map(|p| chart_to_screen(rect, p.x, p.y))
            .collect()
    }
}

impl Widget for Sparkline<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(self.width, self.height), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let points = self.screen_points(rect);
            match points.len() {
                0 => {}
                1 => {
                    ui.painter().circle_filled(points[0], 1.5, self.color);
                }
                _ => {
                    ui.painter()
                        .add(egui::Shape::line(points, egui::Stroke::new(1.0, self.color)));
                }
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_line;
    use crate::types::Sample;

    #[test]
    fn test_status_badge_uses_palette() {
        let palette = StatusPalette::default();
        let badge = StatusBadge::new(StatusLevel::Warning, &palette);
        assert_eq!(badge.color, to_color32(palette.warning));
    }

    #[test]
    fn test_value_display() {
        let display = ValueDisplay::from_f64("Max", 25.456, 1).with_unit(Some("°C"));
        assert_eq!(display.label, "Max");
        assert_eq!(display.value, "25.5");
        assert_eq!(display.unit.as_deref(), Some("°C"));

        let invalid = ValueDisplay::from_f64("Last", f64::NAN, 2);
        assert_eq!(invalid.value, "n/a");
    }

    #[test]
    fn test_sparkline_maps_geometry_into_rect() {
        let geom = normalize_line(&[Sample::new("a", 1.0), Sample::new("b", 3.0)]);
        let sparkline = Sparkline::new(&geom).with_size(60.0, 16.0);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(60.0, 16.0));

        let points = sparkline.screen_points(rect);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].x, 60.0);
        assert!(points[0].y > points[1].y);
    }
}
