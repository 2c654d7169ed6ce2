// =============================================================================
// Data Source — where daily bars come from
// =============================================================================
//
// The analysis core never fetches anything itself. A `DataSource` hands back
// an ordered list of bars for one instrument and an optional date range; the
// caller builds a `SeriesStore` from it.
//
// `JsonFileSource` reads a JSON array of bar records from disk. Records may
// use English keys or the exchange's native column headers.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::types::PriceBar;

/// Instrument and inclusive date range to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRequest {
    pub symbol: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl BarRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            start: None,
            end: None,
        }
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// True when `date` falls inside the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

pub trait DataSource {
    /// Bars for `request.symbol` inside the requested range, oldest first.
    fn fetch_bars(&self, request: &BarRequest) -> Result<Vec<PriceBar>>;

    /// Human-readable instrument name, if the source knows one.
    fn instrument_name(&self, _symbol: &str) -> Option<String> {
        None
    }
}

// =============================================================================
// JsonFileSource
// =============================================================================

pub struct JsonFileSource {
    path: PathBuf,
    name: Option<String>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    /// Attach a display name reported by `instrument_name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn fetch_bars(&self, request: &BarRequest) -> Result<Vec<PriceBar>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read bars from {}", self.path.display()))?;

        let mut bars: Vec<PriceBar> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bars from {}", self.path.display()))?;

        let total = bars.len();
        bars.retain(|bar| request.contains(bar.date));
        debug!(total, kept = bars.len(), "date range applied");

        info!(
            symbol = %request.symbol,
            path = %self.path.display(),
            bars = bars.len(),
            "bars loaded from file"
        );

        Ok(bars)
    }

    fn instrument_name(&self, _symbol: &str) -> Option<String> {
        self.name.clone()
    }
}
