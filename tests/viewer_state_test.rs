//! Integration tests for the viewer's state handling, without a window

mod common;

use common::write_fixture;
use tempfile::TempDir;
use trace_charts::config::{AppState, ChartSettings};
use trace_charts::frontend::{AppAction, ChartViewerApp};
use trace_charts::ChartKind;

const PUMP_CSV: &str = "label,value,status\nt1,2.0,0\nt2,2.5,10\nt3,1.5,20\n";

fn viewer() -> ChartViewerApp {
    ChartViewerApp::new(AppState::default(), ChartSettings::default())
}

#[test]
fn test_open_file_selects_and_records_recent() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "pump.csv", PUMP_CSV);

    let mut app = viewer();
    app.open_file(&path).unwrap();

    assert_eq!(app.series().len(), 1);
    assert_eq!(app.selected_index(), Some(0));
    let selected = app.selected().unwrap();
    assert_eq!(selected.series.name, "pump");
    assert_eq!(selected.kind, ChartKind::Line);

    let recents = &app.app_state().recent_files;
    assert_eq!(recents.len(), 1);
    assert_eq!(recents[0].path, path);
    assert_eq!(recents[0].name, "pump");
    assert_eq!(app.app_state().last_series_path.as_deref(), Some(path.as_path()));
}

#[test]
fn test_reopening_replaces_series_from_same_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "pump.csv", PUMP_CSV);

    let mut app = viewer();
    app.open_file(&path).unwrap();
    std::fs::write(&path, "label,value\nt1,9\n").unwrap();
    app.open_file(&path).unwrap();

    assert_eq!(app.series().len(), 1);
    assert_eq!(app.series()[0].series.samples.len(), 1);
    assert_eq!(app.app_state().recent_files.len(), 1);
}

#[test]
fn test_multi_series_file_selects_first_new_series() {
    let dir = TempDir::new().unwrap();
    let csv = write_fixture(&dir, "pump.csv", PUMP_CSV);
    let json = write_fixture(
        &dir,
        "plant.json",
        r#"{"series": [
            {"sensor": "Temp", "readings": [{"label": "a", "value": 1}]},
            {"sensor": "Flow", "readings": [{"label": "a", "value": 2}]}
        ]}"#,
    );

    let mut app = viewer();
    app.open_file(&csv).unwrap();
    app.open_file(&json).unwrap();

    assert_eq!(app.series().len(), 3);
    assert_eq!(app.selected_index(), Some(1));
    assert_eq!(app.selected().unwrap().series.name, "Temp");
    assert_eq!(app.app_state().recent_files[0].name, "Temp");
}

#[test]
fn test_kind_changes_apply_to_selection() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "pump.csv", PUMP_CSV);

    let mut app = viewer();
    app.open_file(&path).unwrap();

    app.handle_action(AppAction::SetKind(ChartKind::Bar));
    assert_eq!(app.selected().unwrap().kind, ChartKind::Bar);

    app.handle_action(AppAction::CycleKind);
    assert_eq!(app.selected().unwrap().kind, ChartKind::Line);
    app.handle_action(AppAction::CycleKind);
    assert_eq!(app.selected().unwrap().kind, ChartKind::Step);
}

#[test]
fn test_export_svg_for_each_kind() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "pump.csv", PUMP_CSV);

    let mut app = viewer();
    app.open_file(&path).unwrap();

    for kind in ChartKind::all() {
        let out = dir.path().join(format!("pump-{}.svg", kind.display_name()));
        app.set_kind(*kind);
        app.handle_action(AppAction::ExportSvg(out.clone()));

        assert!(app.last_error().is_none(), "{:?}", app.last_error());
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    // Exported geometry comes from the chart cache
    assert_eq!(app.cache_stats().misses, 3);
}

#[test]
fn test_open_missing_file_sets_error_and_drops_recent() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.csv");

    let mut state = AppState::default();
    state.add_recent_file(&missing, "gone");
    let mut app = ChartViewerApp::new(state, ChartSettings::default());

    app.handle_action(AppAction::OpenFile(missing));

    assert!(app.series().is_empty());
    assert!(app.last_error().unwrap().starts_with("Failed to open file"));
    assert!(app.app_state().recent_files.is_empty());
}

#[test]
fn test_successful_open_clears_previous_error() {
    let dir = TempDir::new().unwrap();
    let bad = write_fixture(&dir, "bad.csv", "time,reading\n1,2\n");
    let good = write_fixture(&dir, "good.csv", PUMP_CSV);

    let mut app = viewer();
    app.handle_action(AppAction::OpenFile(bad));
    assert!(app.last_error().is_some());

    app.handle_action(AppAction::OpenFile(good));
    assert!(app.last_error().is_none());
    assert_eq!(app.series().len(), 1);
}

#[test]
fn test_apply_settings_keeps_series_and_view_kind() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "pump.csv", PUMP_CSV);

    let mut app = viewer();
    app.open_file(&path).unwrap();
    app.set_kind(ChartKind::Step);

    let mut settings = ChartSettings::default();
    settings.normalizer.padding_ratio = 0.25;
    settings.view.default_kind = ChartKind::Bar;
    app.apply_settings(settings.clone());

    assert_eq!(app.settings(), &settings);
    assert_eq!(app.selected().unwrap().kind, ChartKind::Step);
    assert_eq!(
        app.selected().unwrap().cache.normalizer(),
        &settings.normalizer()
    );
}
