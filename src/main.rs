//! trace-charts viewer entry point
//!
//! Usage: `trace-charts [SERIES_FILE]`. Without an argument the last opened
//! file is restored.

use std::path::PathBuf;

use trace_charts::{
    config::{self, AppState, ChartSettings},
    frontend::{apply_theme, AppAction, ChartViewerApp},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging();

    tracing::info!("Starting trace-charts {}", env!("CARGO_PKG_VERSION"));

    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_files();

    let settings = ChartSettings::load_or_default();

    let initial_file = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| app_state.get_last_file().map(|p| p.to_path_buf()));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 680.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("trace-charts"),
        ..Default::default()
    };

    eframe::run_native(
        "trace-charts",
        native_options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, app_state.ui_preferences.dark_mode);
            cc.egui_ctx
                .set_zoom_factor(app_state.ui_preferences.font_scale);

            let mut app = ChartViewerApp::new(app_state, settings);
            if let Some(path) = initial_file {
                tracing::info!("Opening {}", path.display());
                app.handle_action(AppAction::OpenFile(path));
            }
            Ok(Box::new(app))
        }),
    )
}

/// Console logging plus a daily rolling file in the app data dir
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let file_writer = config::ensure_app_data_dir()
        .ok()
        .map(|dir| dir.join(config::LOG_DIR))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "trace-charts.log");
            tracing_appender::non_blocking(appender)
        });

    let (file_layer, guard) = match file_writer {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,trace_charts=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if guard.is_none() {
        tracing::warn!("Log directory unavailable, logging to console only");
    }
    guard
}
