//! Standalone SVG documents for exported charts
//!
//! Documents use a `0 0 100 100` viewBox and flip the y axis inside a group,
//! so the normalized coordinates (and the path data) are emitted unchanged
//! while larger values still render higher on screen.

use std::fmt::Write as _;
use std::path::Path;

use super::{line_path, DEFAULT_PRECISION};
use crate::error::{Result, TraceChartsError};
use crate::status::{to_hex, Rgba};
use crate::types::{BarGeometry, LineGeometry, StepGeometry};

/// Presentation options for exported documents
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStyle {
    pub title: Option<String>,
    pub stroke: Rgba,
    /// Stroke width in screen pixels (non-scaling)
    pub stroke_width: f64,
    /// Radius of point markers in chart units; 0 disables markers
    pub marker_radius: f64,
    pub background: Option<Rgba>,
    pub precision: usize,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            title: None,
            stroke: [56, 189, 248, 255],
            stroke_width: 2.0,
            marker_radius: 0.8,
            background: Some([2, 6, 23, 255]),
            precision: DEFAULT_PRECISION,
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn open_document(style: &SvgStyle) -> String {
    let mut doc = String::from(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" preserveAspectRatio="none">"#,
    );
    if let Some(title) = &style.title {
        let _ = write!(doc, "<title>{}</title>", escape_xml(title));
    }
    if let Some(bg) = style.background {
        let _ = write!(doc, r#"<rect width="100" height="100" fill="{}"/>"#, to_hex(bg));
    }
    doc.push_str(r#"<g transform="translate(0 100) scale(1 -1)">"#);
    doc
}

fn close_document(mut doc: String) -> String {
    doc.push_str("</g></svg>\n");
    doc
}

fn push_stroke_path(doc: &mut String, data: &str, style: &SvgStyle) {
    if data.is_empty() {
        return;
    }
    let _ = write!(
        doc,
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" vector-effect="non-scaling-stroke"/>"#,
        data,
        to_hex(style.stroke),
        style.stroke_width
    );
}

fn push_marker(doc: &mut String, x: f64, y: f64, color: Rgba, style: &SvgStyle) {
    if style.marker_radius <= 0.0 {
        return;
    }
    let p = style.precision;
    let _ = write!(
        doc,
        r#"<circle cx="{x:.p$}" cy="{y:.p$}" r="{}" fill="{}"/>"#,
        style.marker_radius,
        to_hex(color)
    );
}

/// Render a line chart document
pub fn line_document(geometry: &LineGeometry, style: &SvgStyle) -> String {
    let mut doc = open_document(style);
    push_stroke_path(&mut doc, &line_path(&geometry.points).to_svg(style.precision), style);
    for p in &geometry.points {
        push_marker(&mut doc, p.x, p.y, style.stroke, style);
    }
    close_document(doc)
}

/// Render a step chart document; markers carry the status colors
pub fn step_document(geometry: &StepGeometry, style: &SvgStyle) -> String {
    let mut doc = open_document(style);
    push_stroke_path(&mut doc, &geometry.path, style);
    for sp in &geometry.points {
        push_marker(&mut doc, sp.point.x, sp.point.y, sp.color, style);
    }
    close_document(doc)
}

/// Render a bar chart document anchored to the zero baseline
pub fn bar_document(geometry: &BarGeometry, style: &SvgStyle) -> String {
    let mut doc = open_document(style);
    let p = style.precision;
    for bar in &geometry.bars {
        let _ = write!(
            doc,
            r#"<rect x="{:.p$}" y="0" width="{:.p$}" height="{:.p$}" fill="{}"/>"#,
            bar.x,
            bar.width,
            bar.height,
            to_hex(bar.color)
        );
    }
    close_document(doc)
}

/// Write a rendered document to disk
pub fn write_svg(path: impl AsRef<Path>, document: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, document).map_err(|e| {
        TraceChartsError::Export(format!("Failed to write SVG {:?}: {}", path, e))
    })?;
    tracing::info!("Exported chart to {:?}", path);
    Ok(())
}
