// =============================================================================
// A-Share Quant — Main Entry Point
// =============================================================================
//
// Loads one instrument's daily bars, computes the standard indicator set,
// classifies the latest session and prints a text summary.
// =============================================================================

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ashare_quant::{
    classify, recent_rows, AnalysisConfig, BarRequest, DataSource, IndicatorEngine,
    JsonFileSource, SeriesStore, Summary,
};

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AnalysisConfig::load("analysis.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    if let Ok(symbol) = std::env::var("ASHARE_SYMBOL") {
        let symbol = symbol.trim();
        if !symbol.is_empty() {
            config.symbol = symbol.to_string();
        }
    }
    if let Ok(path) = std::env::var("ASHARE_DATA") {
        config.data_path = path.into();
    }

    let today = chrono::Local::now().date_naive();
    let (start, end) = config.date_range(today);

    info!(
        symbol = %config.symbol,
        start = ?start,
        end = ?end,
        "analysis starting"
    );

    // ── 2. Load bars ─────────────────────────────────────────────────────
    let mut source = JsonFileSource::new(&config.data_path);
    if let Some(name) = &config.instrument_name {
        source = source.with_name(name);
    }
    info!(path = %source.path().display(), "reading bar file");

    let request = BarRequest::new(&config.symbol).with_range(start, end);
    let bars = source.fetch_bars(&request)?;
    let mut store = SeriesStore::new(bars)?;

    // ── 3. Indicators ────────────────────────────────────────────────────
    let report = IndicatorEngine::populate(&mut store, &config.indicators)?;
    for skipped in &report.skipped {
        warn!(columns = ?skipped.columns, reason = %skipped.reason, "column unavailable");
    }

    // ── 4. Classify & print ──────────────────────────────────────────────
    match classify(&store, &config.thresholds) {
        Ok(signal) => {
            let name = source.instrument_name(&config.symbol);
            let summary = Summary::build(&store, &signal, &config.symbol, name.as_deref());
            println!("{summary}");
        }
        // A short series still gets its recent-data table.
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, bars = store.len(), "latest row not classifiable");
        }
        Err(e) => return Err(e.into()),
    }

    println!(
        "{:<10}  {:>9}  {:>9}  {:>9}  {:>7}  {:>8}",
        "Date", "Close", "MA5", "MA20", "RSI", "Change"
    );
    for row in recent_rows(&store, config.recent_rows) {
        println!("{row}");
    }

    info!("analysis complete");
    Ok(())
}
