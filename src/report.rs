// =============================================================================
// Analysis Report — text summary of a populated, classified series
// =============================================================================

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::classifier::ClassificationResult;
use crate::indicators::keys;
use crate::series::SeriesStore;
use crate::types::{RsiZone, TrendLabel};

/// Everything the text report prints, gathered once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub symbol: String,
    /// Display name; falls back to the symbol.
    pub name: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub trading_days: usize,
    pub change_pct: f64,
    pub volume: u64,
    pub signal: ClassificationResult,
}

impl Summary {
    pub fn build(
        store: &SeriesStore,
        signal: &ClassificationResult,
        symbol: &str,
        name: Option<&str>,
    ) -> Self {
        let latest = store.latest();
        Self {
            symbol: symbol.to_string(),
            name: name.unwrap_or(symbol).to_string(),
            first_date: store.first_date(),
            last_date: store.last_date(),
            trading_days: store.len(),
            change_pct: latest.change_pct,
            volume: latest.volume,
            signal: signal.clone(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.signal;
        writeln!(f, "=== {}({}) summary ===", self.name, self.symbol)?;
        writeln!(f, "Range:        {} to {}", self.first_date, self.last_date)?;
        writeln!(f, "Trading days: {}", self.trading_days)?;
        writeln!(f)?;
        writeln!(f, "Latest ({}):", s.date)?;
        writeln!(f, "  Close:    {:.2}", s.close)?;
        writeln!(f, "  Change:   {:.2}%", self.change_pct)?;
        writeln!(f, "  Volume:   {}", group_thousands(self.volume))?;
        writeln!(f)?;
        writeln!(f, "Indicators:")?;
        writeln!(f, "  MA5:      {:.2}", s.ma5)?;
        writeln!(f, "  MA20:     {:.2}", s.ma20)?;
        writeln!(f, "  RSI:      {:.2}", s.rsi)?;
        match s.macd {
            Some(m) => writeln!(f, "  MACD:     {m:.4}")?,
            None => writeln!(f, "  MACD:     n/a")?,
        }
        writeln!(f)?;
        writeln!(f, "Signals:")?;
        let trend = match s.trend {
            TrendLabel::Up => "price above both averages, short-term trend up",
            TrendLabel::Down => "price below both averages, short-term trend down",
            TrendLabel::Mixed => "price and averages interleaved, no clear trend",
        };
        writeln!(f, "  • {trend}")?;
        match s.rsi_zone {
            RsiZone::Overbought => writeln!(f, "  • RSI overbought, pullback risk"),
            RsiZone::Oversold => writeln!(f, "  • RSI oversold, possible rebound"),
            RsiZone::Normal => writeln!(f, "  • RSI in normal range ({:.1})", s.rsi),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Recent rows
// =============================================================================

/// One line of the recent-data table. Indicator cells stay `None` while
/// warming up or when the column was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRow {
    pub date: NaiveDate,
    pub close: f64,
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub rsi: Option<f64>,
    pub change_pct: f64,
}

impl fmt::Display for RecentRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        write!(
            f,
            "{}  {:>9.2}  {:>9}  {:>9}  {:>7}  {:>7.2}%",
            self.date,
            self.close,
            cell(self.ma5),
            cell(self.ma20),
            cell(self.rsi),
            self.change_pct
        )
    }
}

/// The last `n` rows (oldest first). Returns every row when `n` exceeds the
/// series length.
pub fn recent_rows(store: &SeriesStore, n: usize) -> Vec<RecentRow> {
    let value = |name: &str, i: usize| store.column(name).ok().and_then(|c| c.get(i));
    let start = store.len().saturating_sub(n);
    store.bars()[start..]
        .iter()
        .enumerate()
        .map(|(offset, bar)| {
            let i = start + offset;
            RecentRow {
                date: bar.date,
                close: bar.close,
                ma5: value(keys::MA5, i),
                ma20: value(keys::MA20, i),
                rsi: value(keys::RSI, i),
                change_pct: bar.change_pct,
            }
        })
        .collect()
}
