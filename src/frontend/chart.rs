//! Chart widget drawing normalized geometry with egui
//!
//! The widget asks a [`GeometryCache`] for the geometry of the current
//! mode and scales the 0–100 chart space into its plot rect, flipping the
//! y axis so larger values sit higher. Axis labels come from the geometry's
//! value range; hovering shows the nearest sample in a tooltip.

use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Widget};

use crate::cache::GeometryCache;
use crate::config::ViewSettings;
use crate::geometry::step_vertices;
use crate::status::{Rgba, StatusLevel};
use crate::types::{
    Bar, BarGeometry, ChartKind, LineGeometry, NormalizedPoint, Sample, StepGeometry, ValueRange,
    COORD_CENTER, COORD_MAX, COORD_MIN,
};

/// Space reserved left of the plot for value labels
const AXIS_GUTTER: f32 = 64.0;

const PLOT_MARGIN: f32 = 8.0;

const MARKER_RADIUS: f32 = 3.0;

/// Convert a palette color to an egui color
pub fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}

/// Map a chart-space coordinate into `rect`
pub fn chart_to_screen(rect: Rect, x: f64, y: f64) -> Pos2 {
    let fx = (x / COORD_MAX) as f32;
    let fy = (y / COORD_MAX) as f32;
    egui::pos2(
        rect.left() + fx * rect.width(),
        rect.bottom() - fy * rect.height(),
    )
}

/// Horizontal chart-space coordinate under a screen x, clamped to the plot
pub fn screen_to_chart_x(rect: Rect, screen_x: f32) -> f64 {
    if rect.width() <= 0.0 {
        return COORD_CENTER;
    }
    let t = ((screen_x - rect.left()) / rect.width()) as f64;
    (t * COORD_MAX).clamp(COORD_MIN, COORD_MAX)
}

/// Index of the position closest to `x`
pub fn nearest_x(xs: impl IntoIterator<Item = f64>, x: f64) -> Option<usize> {
    xs.into_iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a - x).abs().total_cmp(&(b - x).abs()))
        .map(|(i, _)| i)
}

/// Index of the point whose x is closest to `x`
pub fn nearest_point(points: &[NormalizedPoint], x: f64) -> Option<usize> {
    nearest_x(points.iter().map(|p| p.x), x)
}

/// Index of the bar whose slot contains `x`
pub fn bar_at(bars: &[Bar], x: f64) -> Option<usize> {
    if bars.is_empty() {
        return None;
    }
    let slot = COORD_MAX / bars.len() as f64;
    let idx = (x / slot).floor();
    if !idx.is_finite() {
        return None;
    }
    Some((idx.max(0.0) as usize).min(bars.len() - 1))
}

/// Format a reading for labels; invalid values read as `n/a`
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.decimals$}", value)
    } else {
        "n/a".to_string()
    }
}

/// What the tooltip shows for the hovered sample
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    pub label: String,
    pub value: f64,
    pub status: StatusLevel,
    /// Chart-space anchor for the hover guide
    pub x: f64,
    pub y: f64,
}

/// A chart of one series in the given mode
pub struct SeriesChart<'a> {
    samples: &'a [Sample],
    cache: &'a mut GeometryCache,
    kind: ChartKind,
    view: &'a ViewSettings,
    unit: Option<&'a str>,
}

impl<'a> SeriesChart<'a> {
    pub fn new(
        samples: &'a [Sample],
        cache: &'a mut GeometryCache,
        kind: ChartKind,
        view: &'a ViewSettings,
    ) -> Self {
        Self {
            samples,
            cache,
            kind,
            view,
            unit: None,
        }
    }

    /// Unit appended to tooltip values
    pub fn with_unit(mut self, unit: Option<&'a str>) -> Self {
        self.unit = unit;
        self
    }
}

impl Widget for SeriesChart<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(
            ui.available_width(),
            ui.available_height().max(self.view.chart_height),
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let plot = Rect::from_min_max(
            egui::pos2(response.rect.left() + AXIS_GUTTER, response.rect.top() + PLOT_MARGIN),
            egui::pos2(
                response.rect.right() - PLOT_MARGIN,
                response.rect.bottom() - PLOT_MARGIN,
            ),
        );

        painter.rect_filled(plot, 2.0, ui.visuals().extreme_bg_color);

        let hover_x = response
            .hover_pos()
            .filter(|p| plot.contains(*p))
            .map(|p| screen_to_chart_x(plot, p.x));

        let view = self.view;
        let (range, hover, empty) = match self.kind {
            ChartKind::Line => {
                let geom = self.cache.line(self.samples);
                paint_line(&painter, plot, geom, view);
                (
                    geom.value_range,
                    hover_x.and_then(|x| hover_line(geom, self.samples, x)),
                    geom.is_empty(),
                )
            }
            ChartKind::Step => {
                let geom = self.cache.step(self.samples);
                paint_step(&painter, plot, geom, view);
                (
                    geom.value_range,
                    hover_x.and_then(|x| hover_step(geom, x)),
                    geom.is_empty(),
                )
            }
            ChartKind::Bar => {
                let geom = self.cache.bar(self.samples);
                paint_bars(&painter, plot, geom);
                (
                    ValueRange::new(0.0, geom.max_y),
                    hover_x.and_then(|x| hover_bar(geom, x)),
                    geom.is_empty(),
                )
            }
        };

        paint_axis(&painter, plot, range, view, ui.visuals().weak_text_color());

        if empty {
            painter.text(
                plot.center(),
                Align2::CENTER_CENTER,
                "No valid samples",
                FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        }

        let Some(info) = hover else {
            return response;
        };

        let anchor = chart_to_screen(plot, info.x, info.y);
        painter.line_segment(
            [
                egui::pos2(anchor.x, plot.top()),
                egui::pos2(anchor.x, plot.bottom()),
            ],
            Stroke::new(1.0, ui.visuals().weak_text_color()),
        );
        painter.circle_stroke(anchor, MARKER_RADIUS + 2.0, Stroke::new(1.5, Color32::WHITE));

        let decimals = view.axis_decimals;
        let unit = self.unit;
        response.on_hover_ui_at_pointer(|ui| {
            ui.strong(info.label.as_str());
            let value = match unit {
                Some(u) if info.value.is_finite() => {
                    format!("{} {}", format_value(info.value, decimals), u)
                }
                _ => format_value(info.value, decimals),
            };
            ui.label(value);
            ui.label(format!("Status: {}", info.status));
        })
    }
}

fn paint_axis(
    painter: &egui::Painter,
    plot: Rect,
    range: ValueRange,
    view: &ViewSettings,
    color: Color32,
) {
    let grid = Stroke::new(1.0, color.gamma_multiply(0.25));
    let divisions = view.grid_lines.max(1);
    for k in 0..=divisions {
        let y = k as f64 / divisions as f64 * COORD_MAX;
        let left = chart_to_screen(plot, COORD_MIN, y);
        let right = chart_to_screen(plot, COORD_MAX, y);
        painter.line_segment([left, right], grid);
    }

    let font = FontId::monospace(10.0);
    for y in [COORD_MIN, COORD_CENTER, COORD_MAX] {
        let pos = chart_to_screen(plot, COORD_MIN, y);
        painter.text(
            egui::pos2(pos.x - 6.0, pos.y),
            Align2::RIGHT_CENTER,
            format_value(range.value_at(y), view.axis_decimals),
            font.clone(),
            color,
        );
    }
}

fn paint_line(painter: &egui::Painter, plot: Rect, geom: &LineGeometry, view: &ViewSettings) {
    let color = to_color32(view.line_color);
    let points: Vec<Pos2> = geom
        .points
        .iter()
        .map(|p| chart_to_screen(plot, p.x, p.y))
        .collect();

    if points.len() >= 2 {
        painter.add(Shape::line(points.clone(), Stroke::new(view.line_width, color)));
    }
    if view.show_markers || points.len() == 1 {
        for p in points {
            painter.circle_filled(p, MARKER_RADIUS, color);
        }
    }
}

fn paint_step(painter: &egui::Painter, plot: Rect, geom: &StepGeometry, view: &ViewSettings) {
    let coords: Vec<(f64, f64)> = geom.points.iter().map(|p| (p.point.x, p.point.y)).collect();
    let vertices: Vec<Pos2> = step_vertices(&coords)
        .into_iter()
        .map(|(x, y)| chart_to_screen(plot, x, y))
        .collect();

    if vertices.len() >= 2 {
        painter.add(Shape::line(
            vertices,
            Stroke::new(view.line_width, to_color32(view.line_color)),
        ));
    }
    if view.show_markers || geom.points.len() == 1 {
        for sp in &geom.points {
            painter.circle_filled(
                chart_to_screen(plot, sp.point.x, sp.point.y),
                MARKER_RADIUS,
                to_color32(sp.color),
            );
        }
    }
}

fn paint_bars(painter: &egui::Painter, plot: Rect, geom: &BarGeometry) {
    for bar in &geom.bars {
        if bar.height <= 0.0 {
            continue;
        }
        let rect = Rect::from_two_pos(
            chart_to_screen(plot, bar.x, bar.height),
            chart_to_screen(plot, bar.x + bar.width, COORD_MIN),
        );
        painter.rect_filled(rect, 1.0, to_color32(bar.color));
    }
}

/// Line points carry no status; it is looked up on the source sample
fn hover_line(geom: &LineGeometry, samples: &[Sample], x: f64) -> Option<HoverInfo> {
    let p = &geom.points[nearest_point(&geom.points, x)?];
    Some(HoverInfo {
        label: p.label.clone(),
        value: p.value,
        status: samples
            .get(p.source_index)
            .map(Sample::status)
            .unwrap_or_default(),
        x: p.x,
        y: p.y,
    })
}

fn hover_step(geom: &StepGeometry, x: f64) -> Option<HoverInfo> {
    let sp = &geom.points[nearest_x(geom.points.iter().map(|sp| sp.point.x), x)?];
    Some(HoverInfo {
        label: sp.point.label.clone(),
        value: sp.point.value,
        status: sp.status,
        x: sp.point.x,
        y: sp.point.y,
    })
}

fn hover_bar(geom: &BarGeometry, x: f64) -> Option<HoverInfo> {
    let bar = &geom.bars[bar_at(&geom.bars, x)?];
    Some(HoverInfo {
        label: bar.label.clone(),
        value: bar.value,
        status: bar.status,
        x: bar.x + bar.width / 2.0,
        y: bar.height,
    })
}
