use approx::assert_relative_eq;
use ohlc_chart::core::{
    CandleDirection, OhlcRecord, ScaleBuilderConfig, Transform, Viewport, build_base_scales,
    candle_width, generate_candles, project,
};

fn two_records() -> Vec<OhlcRecord> {
    vec![
        OhlcRecord::new(0, 1_721_347_200.0, 100.0, 115.0, 95.0, 110.0).expect("valid record"),
        OhlcRecord::new(1, 1_721_433_600.0, 110.0, 112.0, 85.0, 90.0).expect("valid record"),
    ]
}

#[test]
fn invalid_ohlc_is_rejected() {
    assert!(OhlcRecord::new(0, 1.0, 120.0, 110.0, 90.0, 100.0).is_err());
    assert!(OhlcRecord::new(0, 1.0, 100.0, 90.0, 110.0, 100.0).is_err());
    assert!(OhlcRecord::new(0, f64::NAN, 100.0, 110.0, 90.0, 100.0).is_err());
}

#[test]
fn two_record_scenario_projects_bodies_and_directions() {
    let records = two_records();
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");
    let scales = project(&base, Transform::IDENTITY);
    let candles = generate_candles(&records, &scales, 5.0);

    assert_eq!(candles.len(), 2);

    let first = candles[0];
    assert_eq!(first.direction, CandleDirection::Bullish);
    assert_relative_eq!(first.body_top, scales.y.apply(110.0));
    assert_relative_eq!(first.body_bottom, scales.y.apply(100.0));
    assert_relative_eq!(first.wick_top, scales.y.apply(115.0));
    assert_relative_eq!(first.wick_bottom, scales.y.apply(95.0));

    let second = candles[1];
    assert_eq!(second.direction, CandleDirection::Bearish);
    assert_relative_eq!(second.body_top, scales.y.apply(110.0));
    assert_relative_eq!(second.body_bottom, scales.y.apply(90.0));

    // y domain niced to [80, 120] over [370, 20]
    assert_relative_eq!(first.body_top, 107.5);
    assert_relative_eq!(first.body_bottom, 195.0);
    assert_relative_eq!(second.body_bottom, 282.5);
}

#[test]
fn candle_is_centred_on_its_wick() {
    let records = two_records();
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");
    let scales = project(&base, Transform::IDENTITY);
    let candles = generate_candles(&records, &scales, 5.0);

    for candle in &candles {
        assert_relative_eq!(candle.x + candle.width / 2.0, candle.wick_x);
    }
    assert_relative_eq!(candles[0].wick_x, 40.0);
    assert_relative_eq!(candles[1].wick_x, 780.0);
    // 80% of the 740 px pitch
    assert_relative_eq!(candles[0].width, 592.0);
}

#[test]
fn width_falls_back_to_minimum_when_pitch_is_tiny() {
    let records = two_records();
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");
    let scales = project(&base, Transform::IDENTITY);

    assert_relative_eq!(candle_width(&scales, 1_000.0), 1_000.0);
}

#[test]
fn equal_open_and_close_is_bullish() {
    let records = vec![
        OhlcRecord::new(0, 0.0, 100.0, 105.0, 95.0, 100.0).expect("valid record"),
        OhlcRecord::new(1, 60.0, 101.0, 105.0, 95.0, 99.0).expect("valid record"),
    ];
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");
    let candles = generate_candles(&records, &project(&base, Transform::IDENTITY), 5.0);

    assert_eq!(candles[0].direction, CandleDirection::Bullish);
    assert_relative_eq!(candles[0].body_height(), 0.0);
}

#[test]
fn empty_input_yields_no_candles() {
    let records = two_records();
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");
    assert!(generate_candles(&[], &project(&base, Transform::IDENTITY), 5.0).is_empty());
}

#[test]
fn zoom_scales_candle_width_with_pitch() {
    let records: Vec<OhlcRecord> = (0..100)
        .map(|i| {
            OhlcRecord::new(i, i as f64 * 60.0, 100.0, 101.0, 99.0, 100.5).expect("valid record")
        })
        .collect();
    let base = build_base_scales(&records, Viewport::new(800, 400), ScaleBuilderConfig::default())
        .expect("base scales");

    let identity = project(&base, Transform::IDENTITY);
    let zoomed = project(
        &base,
        Transform {
            k: 2.0,
            ..Transform::IDENTITY
        },
    );

    let pitch = 2500.0 / 99.0;
    assert_relative_eq!(candle_width(&identity, 5.0), pitch * 0.8, epsilon = 1e-9);
    assert_relative_eq!(candle_width(&zoomed, 5.0), pitch * 1.6, epsilon = 1e-9);
}
