use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::series::column::IndicatorColumn;
use crate::types::PriceBar;

// ---------------------------------------------------------------------------
// SeriesStore -- immutable bar table plus named indicator columns
// ---------------------------------------------------------------------------

/// The validated OHLCV table for one instrument and every indicator column
/// derived from it.
///
/// Bars are fixed at construction. Columns are attached by name and must be
/// exactly as long as the series; attaching under an existing name replaces
/// the previous column.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    bars: Vec<PriceBar>,
    closes: Vec<f64>,
    highs: Vec<f64>,
    lows: Vec<f64>,
    columns: HashMap<String, IndicatorColumn>,
    order: Vec<String>,
}

impl SeriesStore {
    /// Build a store from bars already sorted by date.
    ///
    /// # Errors
    /// `InvalidSeries` when the list is empty, when dates are not strictly
    /// increasing, or when any bar has a non-finite or non-positive price or
    /// `high < low`.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, EngineError> {
        if bars.is_empty() {
            return Err(EngineError::InvalidSeries("series is empty".to_string()));
        }

        for (i, bar) in bars.iter().enumerate() {
            let prices = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ];
            if let Some((field, value)) = prices
                .iter()
                .find(|(_, v)| !v.is_finite() || *v <= 0.0)
            {
                return Err(EngineError::InvalidSeries(format!(
                    "bar {} ({}) has {} price {}",
                    i, bar.date, field, value
                )));
            }
            if bar.high < bar.low {
                return Err(EngineError::InvalidSeries(format!(
                    "bar {} ({}) has high {} below low {}",
                    i, bar.date, bar.high, bar.low
                )));
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(EngineError::InvalidSeries(format!(
                    "date {} at index {} does not follow {}",
                    bar.date,
                    i,
                    bars[i - 1].date
                )));
            }
            let body_in_range = (bar.low..=bar.high).contains(&bar.open)
                && (bar.low..=bar.high).contains(&bar.close);
            if !body_in_range {
                warn!(
                    date = %bar.date,
                    open = bar.open,
                    close = bar.close,
                    "open/close outside the high-low range"
                );
            }
        }

        let closes = bars.iter().map(|b| b.close).collect();
        let highs = bars.iter().map(|b| b.high).collect();
        let lows = bars.iter().map(|b| b.low).collect();

        info!(
            bars = bars.len(),
            first = %bars[0].date,
            last = %bars[bars.len() - 1].date,
            "series loaded"
        );

        Ok(Self {
            bars,
            closes,
            highs,
            lows,
            columns: HashMap::new(),
            order: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bar_at(&self, index: usize) -> Option<&PriceBar> {
        self.bars.get(index)
    }

    /// Position of the bar dated `date`, if the session exists.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by(|b| b.date.cmp(&date)).ok()
    }

    pub fn bar_on(&self, date: NaiveDate) -> Option<&PriceBar> {
        self.index_of(date).map(|i| &self.bars[i])
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Close prices in series order -- the input to most indicators.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// The most recent bar.
    pub fn latest(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    /// Attach a derived column under `name`.
    ///
    /// # Errors
    /// `LengthMismatch` when the column length differs from `len()`.
    pub fn attach_column(
        &mut self,
        name: impl Into<String>,
        column: IndicatorColumn,
    ) -> Result<(), EngineError> {
        let name = name.into();
        if column.len() != self.len() {
            return Err(EngineError::LengthMismatch {
                name,
                expected: self.len(),
                actual: column.len(),
            });
        }

        debug!(
            column = %name,
            defined = column.defined_count(),
            "column attached"
        );

        if self.columns.insert(name.clone(), column).is_none() {
            self.order.push(name);
        }
        Ok(())
    }

    /// # Errors
    /// `NotFound` when no column was attached under `name`.
    pub fn column(&self, name: &str) -> Result<&IndicatorColumn, EngineError> {
        self.columns
            .get(name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in the order they were first attached.
    pub fn column_names(&self) -> &[String] {
        &self.order
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
