// =============================================================================
// End-to-end: bars file -> store -> indicators -> classification -> report
// =============================================================================

use ashare_quant::indicators::{keys, macd};
use ashare_quant::{
    classify, AnalysisConfig, recent_rows, BarRequest, ClassifierThresholds, DataSource, EngineError,
    IndicatorEngine, IndicatorParams, JsonFileSource, PriceBar, RsiZone, SeriesStore, Summary,
    TrendLabel,
};
use chrono::{Duration, NaiveDate};

/// `n` bars whose closes climb by 0.10 per session and end at 13.90.
fn linear_bars(n: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let first_close = 13.9 - 0.1 * (n as f64 - 1.0);
    (0..n)
        .map(|i| {
            let close = first_close + 0.1 * i as f64;
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close - 0.05,
                high: close + 0.05,
                low: close - 0.10,
                close,
                volume: 500_000,
                amount: close * 500_000.0,
                change_pct: 0.8,
                change_amt: 0.1,
                turnover_rate: 0.4,
                amplitude: 1.2,
            }
        })
        .collect()
}

fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn rising_series_classifies_up_and_overbought() {
    let mut store = SeriesStore::new(linear_bars(30)).unwrap();
    let report = IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();

    assert_eq!(report.skipped.len(), 1, "only MA60 should be skipped");
    assert!(!store.has_column(keys::MA60));

    let ma5 = store.column(keys::MA5).unwrap().last().unwrap();
    let ma20 = store.column(keys::MA20).unwrap().last().unwrap();
    let rsi = store.column(keys::RSI).unwrap().last().unwrap();
    assert!(approx(ma5, 13.70), "MA5 = {ma5}");
    assert!(approx(ma20, 12.95), "MA20 = {ma20}");
    assert_eq!(rsi, 100.0);

    let signal = classify(&store, &ClassifierThresholds::default()).unwrap();
    assert_eq!(signal.trend, TrendLabel::Up);
    assert_eq!(signal.rsi_zone, RsiZone::Overbought);
    assert!(approx(signal.close, 13.90));
    assert!(signal.macd.is_some());
}

#[test]
fn macd_fails_below_slow_period() {
    for n in [20, 25] {
        let closes: Vec<f64> = linear_bars(n).iter().map(|b| b.close).collect();
        assert_eq!(
            macd(&closes, 12, 26, 9).unwrap_err(),
            EngineError::InsufficientData {
                indicator: "MACD(12,26,9)".into(),
                required: 26,
                available: n,
            }
        );
    }
}

#[test]
fn macd_partial_columns_at_thirty_bars() {
    let mut store = SeriesStore::new(linear_bars(30)).unwrap();
    IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();

    let line = store.column(keys::MACD).unwrap();
    let signal = store.column(keys::MACD_SIGNAL).unwrap();
    let hist = store.column(keys::MACD_HIST).unwrap();
    assert_eq!(line.len(), 30);
    assert_eq!(line.first_defined(), Some(25));
    assert_eq!(signal.defined_count(), 0);
    assert_eq!(hist.defined_count(), 0);
}

#[test]
fn short_series_leaves_classifier_incomplete() {
    let mut store = SeriesStore::new(linear_bars(12)).unwrap();
    IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
    assert_eq!(
        classify(&store, &ClassifierThresholds::default()).unwrap_err(),
        EngineError::IncompleteIndicators(keys::MA20.to_string())
    );
}

#[test]
fn recomputation_is_idempotent() {
    let mut store = SeriesStore::new(linear_bars(60)).unwrap();
    IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
    let before = store.clone();
    IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();

    assert_eq!(store.column_names(), before.column_names());
    for name in before.column_names() {
        let a: Vec<_> = before.column(name).unwrap().iter().map(|c| c.map(f64::to_bits)).collect();
        let b: Vec<_> = store.column(name).unwrap().iter().map(|c| c.map(f64::to_bits)).collect();
        assert_eq!(a, b, "{name} drifted");
    }
}

#[test]
fn file_to_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("600519.json");
    std::fs::write(&path, serde_json::to_string(&linear_bars(40)).unwrap()).unwrap();

    let source = JsonFileSource::new(&path).with_name("Kweichow Moutai");
    let request = BarRequest::new("600519")
        .with_range(NaiveDate::from_ymd_opt(2024, 2, 11), None);
    let bars = source.fetch_bars(&request).unwrap();
    assert_eq!(bars.len(), 30);

    let mut store = SeriesStore::new(bars).unwrap();
    IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
    let signal = classify(&store, &ClassifierThresholds::default()).unwrap();
    let name = source.instrument_name("600519");
    let summary = Summary::build(&store, &signal, "600519", name.as_deref());

    let text = summary.to_string();
    assert!(text.starts_with("=== Kweichow Moutai(600519) summary ==="));
    assert!(text.contains("Trading days: 30"));
    assert!(text.contains("500,000"));

    let rows = recent_rows(&store, 5);
    assert_eq!(rows.len(), 5);
    assert!(approx(rows[4].close, 13.90));
}

#[test]
fn configured_name_and_window_reach_summary() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("600519.json");
    std::fs::write(&data, serde_json::to_string(&linear_bars(40)).unwrap()).unwrap();

    let cfg_path = dir.path().join("analysis.json");
    std::fs::write(
        &cfg_path,
        serde_json::json!({
            "symbol": "600519",
            "instrument_name": "贵州茅台",
            "lookback_days": 29,
            "data_path": data,
        })
        .to_string(),
    )
    .unwrap();
    let config = AnalysisConfig::load(&cfg_path).unwrap();

    let mut source = JsonFileSource::new(&config.data_path);
    if let Some(name) = &config.instrument_name {
        source = source.with_name(name);
    }
    let last = linear_bars(40).last().unwrap().date;
    let (start, end) = config.date_range(last);
    let bars = source
        .fetch_bars(&BarRequest::new(&config.symbol).with_range(start, end))
        .unwrap();
    assert_eq!(bars.len(), 30);

    let mut store = SeriesStore::new(bars).unwrap();
    IndicatorEngine::populate(&mut store, &config.indicators).unwrap();
    let signal = classify(&store, &config.thresholds).unwrap();
    let name = source.instrument_name(&config.symbol);
    let summary = Summary::build(&store, &signal, &config.symbol, name.as_deref());
    assert!(summary.to_string().starts_with("=== 贵州茅台(600519) summary ==="));
}
