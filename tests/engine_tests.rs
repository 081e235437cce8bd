use approx::assert_relative_eq;
use ohlc_chart::ChartError;
use ohlc_chart::api::{ChartEngine, ChartEngineConfig};
use ohlc_chart::core::{RawOhlcRecord, Viewport, XDomainMode, ZoomEvent, ZoomExtent};
use ohlc_chart::extensions::{AnnotationState, TrendClick, TrendLineBehavior};
use ohlc_chart::interaction::{AnnotationMode, InteractionMode, PointerOutcome};
use ohlc_chart::render::NullRenderer;

const DAY: i64 = 86_400;
const JULY_1_2024: i64 = 1_719_792_000;

fn raw_series(count: usize) -> Vec<RawOhlcRecord> {
    (0..count)
        .map(|i| {
            let open = 100.0 + (i % 7) as f64;
            let close = if i % 2 == 0 { open + 1.5 } else { open - 1.5 };
            RawOhlcRecord::new(
                JULY_1_2024 + i as i64 * DAY,
                open,
                open.max(close) + 2.0,
                open.min(close) - 2.0,
                close,
            )
        })
        .collect()
}

fn engine_with(count: usize) -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(&raw_series(count)).expect("set data");
    engine
}

#[test]
fn zoom_doubles_pitch_and_keeps_record_under_focal_point() {
    let mut engine = engine_with(100);
    let pitch_before = engine.effective_scales().expect("scales").pitch_px();
    let index_before = engine.nearest_record_index(400.0).expect("record under x=400");
    let value_before = engine.map_pixel_to_x(400.0).expect("value");

    engine.zoom(ZoomEvent::new(2.0, 400.0, 200.0));

    let pitch_after = engine.effective_scales().expect("scales").pitch_px();
    assert_relative_eq!(pitch_after, pitch_before * 2.0, epsilon = 1e-9);
    assert_eq!(engine.nearest_record_index(400.0), Some(index_before));
    assert_relative_eq!(
        engine.map_pixel_to_x(400.0).expect("value"),
        value_before,
        epsilon = 1e-9
    );
}

#[test]
fn marker_flow_commits_breakout_on_index_three() {
    let mut engine = engine_with(20);
    engine.set_annotation_mode(AnnotationMode::Marker);

    let x = engine.map_index_to_pixel(3).expect("pixel for index 3");
    let (_, y) = engine.plot_rect().center();
    assert_eq!(
        engine.pointer_click(x, y),
        PointerOutcome::MarkerStarted { record_index: 3 }
    );
    let marker = engine.commit_marker_text("breakout").expect("committed");

    assert_eq!(engine.markers().len(), 1);
    assert_eq!(marker.record_index, 3);
    assert_eq!(marker.text, "breakout");

    engine.zoom(ZoomEvent::new(1.7, 300.0, 150.0));
    assert_eq!(engine.markers(), &[marker]);

    let placed = engine.geometry().markers;
    assert_relative_eq!(
        placed[0].x,
        engine.map_index_to_pixel(3).expect("pixel"),
        epsilon = 1e-9
    );
}

#[test]
fn second_marker_click_is_rejected_while_text_is_pending() {
    let mut engine = engine_with(20);
    engine.set_annotation_mode(AnnotationMode::Marker);
    let (_, y) = engine.plot_rect().center();

    let x3 = engine.map_index_to_pixel(3).expect("pixel");
    let x5 = engine.map_index_to_pixel(5).expect("pixel");
    engine.pointer_click(x3, y);
    assert_eq!(engine.pointer_click(x5, y), PointerOutcome::Ignored);
    assert!(matches!(
        engine.annotation_state(),
        AnnotationState::PlacingMarkerText { record_index: 3, .. }
    ));
}

#[test]
fn clicks_outside_plot_or_in_navigate_mode_are_ignored() {
    let mut engine = engine_with(20);
    assert_eq!(engine.pointer_click(400.0, 200.0), PointerOutcome::Ignored);

    engine.set_annotation_mode(AnnotationMode::Marker);
    assert_eq!(engine.pointer_click(5.0, 200.0), PointerOutcome::Ignored);
    assert_eq!(engine.pointer_click(400.0, 395.0), PointerOutcome::Ignored);
    assert!(engine.annotation_state().is_idle());
}

#[test]
fn single_shot_trend_line_disarms_trend_mode() {
    let mut engine = engine_with(20);
    engine.set_annotation_mode(AnnotationMode::TrendLine);
    let (_, y) = engine.plot_rect().center();

    let x2 = engine.map_index_to_pixel(2).expect("pixel");
    let x6 = engine.map_index_to_pixel(6).expect("pixel");
    engine.pointer_click(x2, y);
    let outcome = engine.pointer_click(x6, y);

    assert!(matches!(
        outcome,
        PointerOutcome::Trend(TrendClick::Committed(_))
    ));
    assert_eq!(engine.trend_lines().len(), 1);
    assert_eq!(engine.annotation_mode(), AnnotationMode::Navigate);
}

#[test]
fn continuous_trend_line_commits_on_request() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400))
        .with_trend_line_behavior(TrendLineBehavior::Continuous);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(&raw_series(20)).expect("set data");
    engine.set_annotation_mode(AnnotationMode::TrendLine);
    let (_, y) = engine.plot_rect().center();

    for index in [1, 4, 9] {
        let x = engine.map_index_to_pixel(index).expect("pixel");
        engine.pointer_click(x, y);
    }
    assert!(engine.trend_lines().is_empty());
    assert!(engine.geometry().trend_preview.is_some());

    let line = engine.commit_trend_line().expect("committed");
    assert_eq!((line.start_index, line.end_index), (1, 9));
    assert_eq!(engine.annotation_mode(), AnnotationMode::TrendLine);
}

#[test]
fn empty_dataset_renders_axes_without_geometry() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");

    let geometry = engine.geometry();
    assert!(geometry.candles.is_empty());
    assert!(geometry.markers.is_empty());
    assert!(engine.effective_scales().is_none());
    assert_eq!(engine.map_x_to_pixel(0.0), Err(ChartError::EmptyDataset));

    engine.render().expect("render without data");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_line_count, 2);
    assert_eq!(renderer.last_rect_count, 0);
}

#[test]
fn dataset_swap_discards_out_of_range_annotations_and_keeps_transform() {
    let mut engine = engine_with(20);
    engine.set_annotation_mode(AnnotationMode::Marker);
    let (_, y) = engine.plot_rect().center();
    for index in [2, 15] {
        let x = engine.map_index_to_pixel(index).expect("pixel");
        engine.pointer_click(x, y);
        engine.commit_marker_text(format!("m{index}"));
    }
    engine.zoom(ZoomEvent::new(1.5, 400.0, 200.0));
    let transform = engine.transform();

    let report = engine.set_data(&raw_series(10)).expect("swap data");

    assert_eq!(report.accepted, 10);
    assert_eq!(report.discarded_annotations, 1);
    assert_eq!(engine.markers().len(), 1);
    assert_eq!(engine.markers()[0].record_index, 2);
    assert_eq!(engine.transform(), transform);
}

#[test]
fn invalid_rows_are_dropped_and_reported() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let mut raw = raw_series(5);
    raw.insert(2, RawOhlcRecord::new("2024-07-03", 120.0, 110.0, 90.0, 100.0));
    raw.push(RawOhlcRecord::new("not a date", 1.0, 2.0, 0.5, 1.5));

    let report = engine.set_data(&raw).expect("set data");

    assert_eq!(report.accepted, 5);
    assert_eq!(report.dropped_count(), 2);
    assert_eq!(report.dropped[0].source_index, 2);
    assert_eq!(engine.records().len(), 5);
    assert!(
        engine
            .records()
            .iter()
            .enumerate()
            .all(|(position, record)| record.index == position)
    );
}

#[test]
fn hover_tracks_candle_under_pointer_and_follows_zoom() {
    let mut engine = engine_with(20);
    let x = engine.map_index_to_pixel(7).expect("pixel");
    let (_, y) = engine.plot_rect().center();

    assert_eq!(engine.pointer_move(x + 1.0, y), Some(7));
    let before = engine.tooltip().expect("tooltip");
    assert_eq!(before.record_index, 7);

    engine.pan_by(-60.0, 0.0);
    let after = engine.tooltip().expect("tooltip after pan");
    assert_relative_eq!(after.anchor_x, before.anchor_x - 60.0, epsilon = 1e-9);

    engine.hover_end();
    assert!(engine.tooltip().is_none());
}

#[test]
fn hover_record_rejects_out_of_range_index() {
    let mut engine = engine_with(5);
    assert_eq!(
        engine.hover_record(9),
        Err(ChartError::OutOfRangeIndex { index: 9, len: 5 })
    );
    engine.hover_record(4).expect("valid hover");
    assert_eq!(engine.hovered_index(), Some(4));
}

#[test]
fn pointer_between_candles_hovers_nothing() {
    let mut engine = engine_with(20);
    let x3 = engine.map_index_to_pixel(3).expect("pixel");
    let x4 = engine.map_index_to_pixel(4).expect("pixel");
    let (_, y) = engine.plot_rect().center();

    // candles take 80% of the pitch, leaving a gap around the midpoint
    assert_eq!(engine.pointer_move((x3 + x4) / 2.0, y), None);
    assert!(engine.tooltip().is_none());
}

#[test]
fn zoom_buttons_step_about_plot_centre_and_reset() {
    let mut engine = engine_with(50);
    let (cx, _) = engine.plot_rect().center();
    let value_at_centre = engine.map_pixel_to_x(cx).expect("value");

    let zoomed = engine.zoom_in();
    assert_relative_eq!(zoomed.k, 1.2, epsilon = 1e-12);
    assert_relative_eq!(
        engine.map_pixel_to_x(cx).expect("value"),
        value_at_centre,
        epsilon = 1e-9
    );

    engine.zoom_out();
    assert_relative_eq!(engine.transform().k, 1.0, epsilon = 1e-12);

    engine.pan_by(33.0, 0.0);
    let reset = engine.reset_zoom();
    assert_eq!(reset.k, 1.0);
    assert_eq!(reset.x, 0.0);
}

#[test]
fn pan_gesture_toggles_interaction_mode() {
    let mut engine = engine_with(5);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    engine.pan_start();
    assert_eq!(engine.interaction_mode(), InteractionMode::Panning);
    engine.pan_end();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn resize_rebuilds_scales_for_new_plot() {
    let mut engine = engine_with(2);
    engine.resize(Viewport::new(1000, 500)).expect("resize");

    assert_relative_eq!(engine.map_index_to_pixel(1).expect("pixel"), 980.0);
    assert!(matches!(
        engine.resize(Viewport::new(0, 500)),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn config_update_reclamps_transform() {
    let mut engine = engine_with(10);
    engine.zoom(ZoomEvent::new(4.0, 400.0, 200.0));

    let config = engine
        .config()
        .with_zoom_extent(ZoomExtent::new(0.5, 2.0).expect("extent"))
        .with_vertical_zoom(false);
    engine.set_config(config).expect("set config");

    assert_eq!(engine.transform().k, 2.0);
    assert_eq!(engine.transform().k_y, 1.0);
}

#[test]
fn engine_rejects_invalid_config() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_zoom_button_factor(1.0);
    assert!(ChartEngine::new(NullRenderer::default(), config).is_err());

    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_min_candle_width(f64::NAN);
    assert!(ChartEngine::new(NullRenderer::default(), config).is_err());
}

#[test]
fn editing_marker_through_engine_updates_text() {
    let mut engine = engine_with(10);
    engine.set_annotation_mode(AnnotationMode::Marker);
    let x = engine.map_index_to_pixel(4).expect("pixel");
    let (_, y) = engine.plot_rect().center();
    engine.pointer_click(x, y);
    let marker = engine.commit_marker_text("draft").expect("committed");

    assert!(engine.edit_marker(marker.id));
    let edited = engine.commit_marker_text("final").expect("edited");
    assert_eq!(edited.id, marker.id);
    assert_eq!(engine.markers()[0].text, "final");

    assert!(engine.remove_marker(marker.id));
    assert!(engine.markers().is_empty());
}

#[test]
fn cancel_annotation_drops_pending_marker() {
    let mut engine = engine_with(10);
    engine.set_annotation_mode(AnnotationMode::Marker);
    let x = engine.map_index_to_pixel(1).expect("pixel");
    let (_, y) = engine.plot_rect().center();
    engine.pointer_click(x, y);
    engine.set_marker_draft("half typed");
    engine.cancel_annotation();

    assert!(engine.annotation_state().is_idle());
    assert!(engine.commit_marker().is_none());
    assert!(engine.markers().is_empty());
}

#[test]
fn failed_data_swap_keeps_previous_series() {
    let config = ChartEngineConfig::new(Viewport::new(800, 400)).with_min_candle_width(1e307);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(&raw_series(3)).expect("three candles still fit");
    engine.hover_record(1).expect("hover");
    let records = engine.records().to_vec();
    let scales = engine.base_scales();
    assert!(scales.is_some());

    let err = engine.set_data(&raw_series(20)).expect_err("pitch overflows");

    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(engine.records(), records.as_slice());
    assert_eq!(engine.base_scales(), scales);
    assert_eq!(engine.hovered_index(), Some(1));
}

#[test]
fn rejected_config_leaves_engine_untouched() {
    let mut engine = engine_with(20);
    engine.set_annotation_mode(AnnotationMode::Marker);
    let x = engine.map_index_to_pixel(3).expect("pixel");
    let (_, y) = engine.plot_rect().center();
    engine.pointer_click(x, y);
    engine.commit_marker_text("kept").expect("committed");
    engine.zoom(ZoomEvent::new(3.0, 400.0, 200.0));

    let config = engine.config();
    let transform = engine.transform();
    let scales = engine.base_scales();

    let oversized = config
        .with_min_candle_width(1e307)
        .with_zoom_extent(ZoomExtent::new(0.5, 2.0).expect("extent"));
    assert!(engine.set_config(oversized).is_err());

    assert_eq!(engine.config(), config);
    assert_eq!(engine.transform(), transform);
    assert_eq!(engine.base_scales(), scales);
    assert_eq!(engine.markers().len(), 1);

    let overflowing = config
        .with_min_candle_width(f64::MAX)
        .with_min_candle_spacing(f64::MAX);
    assert!(engine.set_config(overflowing).is_err());
    assert!(ChartEngine::new(NullRenderer::default(), overflowing).is_err());
}

/// Ten sessions over two weeks with the weekend gap left in.
fn trading_days() -> Vec<RawOhlcRecord> {
    [0, 1, 2, 5, 6, 7, 8, 9, 12, 13]
        .into_iter()
        .enumerate()
        .map(|(i, offset)| {
            let open = 50.0 + i as f64;
            RawOhlcRecord::new(
                JULY_1_2024 + offset * DAY,
                open,
                open + 3.0,
                open - 2.0,
                open + 1.0,
            )
        })
        .collect()
}

#[test]
fn date_axis_hover_and_annotations_follow_calendar_positions() {
    let config =
        ChartEngineConfig::new(Viewport::new(800, 400)).with_x_domain_mode(XDomainMode::Date);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(&trading_days()).expect("set data");
    let (_, y) = engine.plot_rect().center();

    let x2 = engine.map_index_to_pixel(2).expect("pixel");
    let x3 = engine.map_index_to_pixel(3).expect("pixel");
    let x4 = engine.map_index_to_pixel(4).expect("pixel");
    assert!(x3 - x2 > 2.0 * (x4 - x3), "weekend gap is wider than a weekday step");

    assert_eq!(engine.pointer_move(x4 + 1.0, y), Some(4));
    assert_eq!(engine.tooltip().expect("tooltip").record_index, 4);
    assert_eq!(engine.pointer_move((x2 + x3) / 2.0, y), None);
    assert_eq!(engine.nearest_record_index(x3 - 1.0), Some(3));

    engine.set_annotation_mode(AnnotationMode::Marker);
    assert_eq!(
        engine.pointer_click(x3 - 1.0, y),
        PointerOutcome::MarkerStarted { record_index: 3 }
    );
    engine.commit_marker_text("gap").expect("committed");

    engine.set_annotation_mode(AnnotationMode::TrendLine);
    let x0 = engine.map_index_to_pixel(0).expect("pixel");
    let x8 = engine.map_index_to_pixel(8).expect("pixel");
    engine.pointer_click(x0, y);
    let outcome = engine.pointer_click(x8 + 1.0, y);
    assert!(matches!(
        outcome,
        PointerOutcome::Trend(TrendClick::Committed(line))
            if (line.start_index, line.end_index) == (0, 8)
    ));

    engine.zoom(ZoomEvent::new(2.0, 300.0, 200.0));
    engine.pan_by(-40.0, 0.0);
    let geometry = engine.geometry();

    assert_relative_eq!(
        geometry.markers[0].x,
        engine.map_index_to_pixel(3).expect("pixel"),
        epsilon = 1e-9
    );
    let line = geometry.trend_lines[0];
    assert_relative_eq!(line.x1, engine.map_index_to_pixel(0).expect("pixel"), epsilon = 1e-9);
    assert_relative_eq!(line.x2, engine.map_index_to_pixel(8).expect("pixel"), epsilon = 1e-9);
    let x5 = engine.map_index_to_pixel(5).expect("pixel");
    assert_eq!(engine.pointer_move(x5, y), Some(5));
}
