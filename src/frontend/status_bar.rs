//! Status bar panel: bottom bar with series stats, cache counters and errors.

use egui::{Color32, RichText, Ui};

use crate::cache::CacheStats;
use crate::source::SensorSeries;
use crate::types::ChartKind;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub series: Option<&'a SensorSeries>,
    pub series_count: usize,
    pub kind: ChartKind,
    pub cache: CacheStats,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label(RichText::new(format!("Series: {}", ctx.series_count)).small());

        if let Some(series) = ctx.series {
            ui.separator();
            let total = series.samples.len();
            let valid = series.valid_count();
            ui.label(RichText::new(format!("Samples: {}", total)).small());

            let invalid = total - valid;
            let invalid_color = if invalid > 0 {
                Color32::LIGHT_RED
            } else {
                Color32::GRAY
            };
            ui.colored_label(
                invalid_color,
                RichText::new(format!("Invalid: {}", invalid)).small(),
            );
        }

        ui.separator();
        ui.label(RichText::new(format!("{} {}", ctx.kind.icon(), ctx.kind)).small());

        ui.separator();
        ui.label(
            RichText::new(format!("Cache: {} hit / {} miss", ctx.cache.hits, ctx.cache.misses))
                .small(),
        );

        if let Some(error) = ctx.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
