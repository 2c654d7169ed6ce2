// =============================================================================
// Shared types used across the analysis engine
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV session for a single instrument.
///
/// Prices are expected to be forward-adjusted by the data source. The
/// `change_pct`, `change_amt`, `turnover_rate` and `amplitude` fields are
/// informational and never recomputed. Field aliases accept the exchange's
/// native column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(alias = "日期")]
    pub date: NaiveDate,
    #[serde(alias = "开盘")]
    pub open: f64,
    #[serde(alias = "最高")]
    pub high: f64,
    #[serde(alias = "最低")]
    pub low: f64,
    #[serde(alias = "收盘")]
    pub close: f64,
    #[serde(alias = "成交量", default)]
    pub volume: u64,
    /// Turnover value.
    #[serde(alias = "成交额", default)]
    pub amount: f64,
    #[serde(alias = "涨跌幅", alias = "changePct", default)]
    pub change_pct: f64,
    #[serde(alias = "涨跌额", alias = "changeAmt", default)]
    pub change_amt: f64,
    #[serde(alias = "换手率", alias = "turnoverRate", default)]
    pub turnover_rate: f64,
    #[serde(alias = "振幅", default)]
    pub amplitude: f64,
}

/// Short-term trend read from the close / MA5 / MA20 ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Up,
    Down,
    Mixed,
}

impl Default for TrendLabel {
    fn default() -> Self {
        Self::Mixed
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Mixed => write!(f, "Mixed"),
        }
    }
}

/// RSI band the latest reading falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Normal,
}

impl Default for RsiZone {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "Overbought"),
            Self::Oversold => write!(f, "Oversold"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}
