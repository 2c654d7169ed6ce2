// =============================================================================
// Analysis Configuration — JSON settings with atomic save
// =============================================================================
//
// Every tunable lives here: which instrument and date range to analyse, where
// the bar data comes from, the indicator periods and the classifier
// thresholds. The defaults reproduce the standard daily set exactly
// (MA 5/10/20/60, RSI 14, MACD 12/26/9, BB 20/2, KDJ 9/3/3, RSI 70/30).
//
// All fields carry `#[serde(default)]` so that a partial or older config file
// still loads. Persistence uses an atomic tmp + rename.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EngineError;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "600519".to_string()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/600519.json")
}

fn default_ma_periods() -> Vec<usize> {
    vec![5, 10, 20, 60]
}

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_bb_period() -> usize {
    20
}

fn default_bb_num_std() -> f64 {
    2.0
}

fn default_kdj_fast_k() -> usize {
    9
}

fn default_kdj_slow_k() -> usize {
    3
}

fn default_kdj_slow_d() -> usize {
    3
}

fn default_overbought() -> f64 {
    70.0
}

fn default_oversold() -> f64 {
    30.0
}

fn default_recent_rows() -> usize {
    5
}

fn default_lookback_days() -> Option<u32> {
    Some(365)
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Periods and multipliers for every indicator the engine computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Simple moving average windows; each becomes an `MA{n}` column.
    #[serde(default = "default_ma_periods")]
    pub ma_periods: Vec<usize>,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    #[serde(default = "default_bb_period")]
    pub bb_period: usize,

    /// Band half-width in population standard deviations.
    #[serde(default = "default_bb_num_std")]
    pub bb_num_std: f64,

    #[serde(default = "default_kdj_fast_k")]
    pub kdj_fast_k: usize,

    #[serde(default = "default_kdj_slow_k")]
    pub kdj_slow_k: usize,

    #[serde(default = "default_kdj_slow_d")]
    pub kdj_slow_d: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_periods: default_ma_periods(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bb_period: default_bb_period(),
            bb_num_std: default_bb_num_std(),
            kdj_fast_k: default_kdj_fast_k(),
            kdj_slow_k: default_kdj_slow_k(),
            kdj_slow_d: default_kdj_slow_d(),
        }
    }
}

// =============================================================================
// ClassifierThresholds
// =============================================================================

/// RSI zone boundaries. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    #[serde(default = "default_overbought")]
    pub overbought: f64,

    #[serde(default = "default_oversold")]
    pub oversold: f64,
}

impl ClassifierThresholds {
    /// # Errors
    /// `InvalidParameter` unless `oversold < overbought` and both are finite.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.oversold.is_finite() || !self.overbought.is_finite() {
            return Err(EngineError::InvalidParameter(format!(
                "RSI thresholds must be finite, got {}/{}",
                self.oversold, self.overbought
            )));
        }
        if self.oversold >= self.overbought {
            return Err(EngineError::InvalidParameter(format!(
                "oversold threshold {} must be below overbought threshold {}",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            overbought: default_overbought(),
            oversold: default_oversold(),
        }
    }
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Exchange code of the instrument (e.g. "600519").
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Short display name for the report header (e.g. "贵州茅台").
    #[serde(default)]
    pub instrument_name: Option<String>,

    /// Inclusive lower bound on bar dates. Takes precedence over
    /// `lookback_days`.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Without a `start_date`, keep only bars from the last N calendar days.
    /// `null` keeps every bar.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: Option<u32>,

    /// Inclusive upper bound on bar dates.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// JSON file holding the bar records.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Rows shown in the recent-data table.
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,

    #[serde(default)]
    pub indicators: IndicatorParams,

    #[serde(default)]
    pub thresholds: ClassifierThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            instrument_name: None,
            start_date: None,
            lookback_days: default_lookback_days(),
            end_date: None,
            data_path: default_data_path(),
            recent_rows: default_recent_rows(),
            indicators: IndicatorParams::default(),
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    /// Inclusive date range to request, resolved against `today`.
    pub fn date_range(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let start = self.start_date.or_else(|| {
            self.lookback_days
                .map(|days| today - chrono::Duration::days(i64::from(days)))
        });
        (start, self.end_date)
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        config
            .thresholds
            .validate()
            .with_context(|| format!("invalid thresholds in {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            data = %config.data_path.display(),
            "analysis config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise analysis config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analysis config saved (atomic)");
        Ok(())
    }
}
