// =============================================================================
// Signal Classifier
// =============================================================================
//
// Two independent judgments read from the latest row of a populated series:
//
//   Trend:    Up    when close > MA5 > MA20
//             Down  when close < MA5 < MA20
//             Mixed otherwise (equal values included)
//
//   RSI zone: Overbought when RSI > overbought   (default 70)
//             Oversold   when RSI < oversold     (default 30)
//             Normal     otherwise
//
// The result is recomputed on demand and never stored.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::ClassifierThresholds;
use crate::error::EngineError;
use crate::indicators::keys;
use crate::series::SeriesStore;
use crate::types::{RsiZone, TrendLabel};

/// Trend and RSI verdicts plus the values they were read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub date: NaiveDate,
    pub trend: TrendLabel,
    pub rsi_zone: RsiZone,
    pub close: f64,
    pub ma5: f64,
    pub ma20: f64,
    pub rsi: f64,
    /// `None` while the MACD line is still warming up.
    pub macd: Option<f64>,
}

/// Classify the latest row of `store`.
///
/// # Errors
/// `IncompleteIndicators` when MA5, MA20 or RSI is missing from the store or
/// undefined on the latest row.
pub fn classify(
    store: &SeriesStore,
    thresholds: &ClassifierThresholds,
) -> Result<ClassificationResult, EngineError> {
    let last = store.len() - 1;
    let latest_value = |name: &str| -> Result<f64, EngineError> {
        store
            .column(name)
            .ok()
            .and_then(|col| col.get(last))
            .ok_or_else(|| EngineError::IncompleteIndicators(name.to_string()))
    };

    let ma5 = latest_value(keys::MA5)?;
    let ma20 = latest_value(keys::MA20)?;
    let rsi = latest_value(keys::RSI)?;
    let macd = store.column(keys::MACD).ok().and_then(|col| col.get(last));

    let bar = store.latest();
    let result = ClassificationResult {
        date: bar.date,
        trend: classify_trend(bar.close, ma5, ma20),
        rsi_zone: classify_rsi(rsi, thresholds),
        close: bar.close,
        ma5,
        ma20,
        rsi,
        macd,
    };

    info!(
        date = %result.date,
        trend = %result.trend,
        rsi_zone = %result.rsi_zone,
        close = result.close,
        rsi = result.rsi,
        "latest row classified"
    );

    Ok(result)
}

/// Strict-inequality trend chain over close, MA5 and MA20.
pub fn classify_trend(close: f64, ma5: f64, ma20: f64) -> TrendLabel {
    if close > ma5 && ma5 > ma20 {
        TrendLabel::Up
    } else if close < ma5 && ma5 < ma20 {
        TrendLabel::Down
    } else {
        TrendLabel::Mixed
    }
}

pub fn classify_rsi(rsi: f64, thresholds: &ClassifierThresholds) -> RsiZone {
    if rsi > thresholds.overbought {
        RsiZone::Overbought
    } else if rsi < thresholds.oversold {
        RsiZone::Oversold
    } else {
        RsiZone::Normal
    }
}
