// =============================================================================
// Indicator Engine — populate a series with every configured column
// =============================================================================
//
// Order of evaluation:
//   1. MA{n} for every configured period
//   2. RSI
//   3. MACD, MACD_SIGNAL, MACD_HIST
//   4. BB_UPPER, BB_MIDDLE, BB_LOWER
//   5. K, D, J
//
// An indicator that fails with `InsufficientData` is skipped and recorded in
// the report; its columns are not attached. Any other error aborts.
// =============================================================================

use tracing::{info, warn};

use crate::config::IndicatorParams;
use crate::error::EngineError;
use crate::indicators::keys;
use crate::indicators::{bollinger, kdj, macd, rsi, sma};
use crate::series::{IndicatorColumn, SeriesStore};

/// An indicator left out of the store because the series was too short.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedIndicator {
    /// Columns that would have been attached.
    pub columns: Vec<String>,
    pub reason: EngineError,
}

/// What `IndicatorEngine::populate` attached and what it skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulateReport {
    pub computed: Vec<String>,
    pub skipped: Vec<SkippedIndicator>,
}

impl PopulateReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute every indicator in `params` over `store` and attach the
    /// resulting columns under their stable names.
    pub fn populate(
        store: &mut SeriesStore,
        params: &IndicatorParams,
    ) -> Result<PopulateReport, EngineError> {
        let mut report = PopulateReport::default();

        // ── 1. Moving averages ───────────────────────────────────────────
        for &period in &params.ma_periods {
            let key = keys::ma_key(period);
            let outcome = sma(store.closes(), period).map(|col| vec![(key.clone(), col)]);
            Self::absorb(store, &mut report, outcome, &[key])?;
        }

        // ── 2. RSI ───────────────────────────────────────────────────────
        let outcome =
            rsi(store.closes(), params.rsi_period).map(|col| vec![(keys::RSI.to_string(), col)]);
        Self::absorb(store, &mut report, outcome, &[keys::RSI.to_string()])?;

        // ── 3. MACD ──────────────────────────────────────────────────────
        let outcome = macd(
            store.closes(),
            params.macd_fast,
            params.macd_slow,
            params.macd_signal,
        )
        .map(|m| {
            vec![
                (keys::MACD.to_string(), m.macd),
                (keys::MACD_SIGNAL.to_string(), m.signal),
                (keys::MACD_HIST.to_string(), m.histogram),
            ]
        });
        Self::absorb(
            store,
            &mut report,
            outcome,
            &names(&[keys::MACD, keys::MACD_SIGNAL, keys::MACD_HIST]),
        )?;

        // ── 4. Bollinger Bands ───────────────────────────────────────────
        let outcome = bollinger(store.closes(), params.bb_period, params.bb_num_std).map(|b| {
            vec![
                (keys::BB_UPPER.to_string(), b.upper),
                (keys::BB_MIDDLE.to_string(), b.middle),
                (keys::BB_LOWER.to_string(), b.lower),
            ]
        });
        Self::absorb(
            store,
            &mut report,
            outcome,
            &names(&[keys::BB_UPPER, keys::BB_MIDDLE, keys::BB_LOWER]),
        )?;

        // ── 5. KDJ ───────────────────────────────────────────────────────
        let outcome = kdj(
            store.highs(),
            store.lows(),
            store.closes(),
            params.kdj_fast_k,
            params.kdj_slow_k,
            params.kdj_slow_d,
        )
        .map(|s| {
            vec![
                (keys::K.to_string(), s.k),
                (keys::D.to_string(), s.d),
                (keys::J.to_string(), s.j),
            ]
        });
        Self::absorb(
            store,
            &mut report,
            outcome,
            &names(&[keys::K, keys::D, keys::J]),
        )?;

        info!(
            bars = store.len(),
            computed = report.computed.len(),
            skipped = report.skipped.len(),
            "indicators populated"
        );

        Ok(report)
    }

    fn absorb(
        store: &mut SeriesStore,
        report: &mut PopulateReport,
        outcome: Result<Vec<(String, IndicatorColumn)>, EngineError>,
        columns: &[String],
    ) -> Result<(), EngineError> {
        match outcome {
            Ok(produced) => {
                for (name, column) in produced {
                    store.attach_column(name.clone(), column)?;
                    report.computed.push(name);
                }
                Ok(())
            }
            Err(reason @ EngineError::InsufficientData { .. }) => {
                warn!(columns = ?columns, error = %reason, "indicator skipped");
                report.skipped.push(SkippedIndicator {
                    columns: columns.to_vec(),
                    reason,
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBar;
    use chrono::{Duration, NaiveDate};

    fn store_with(n: usize) -> SeriesStore {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 20.0 + (i as f64 * 0.4).sin() * 2.0 + i as f64 * 0.05;
                PriceBar {
                    date: start + Duration::days(i as i64),
                    open: close,
                    high: close + 0.3,
                    low: close - 0.3,
                    close,
                    volume: 10_000,
                    amount: close * 10_000.0,
                    change_pct: 0.0,
                    change_amt: 0.0,
                    turnover_rate: 0.5,
                    amplitude: 3.0,
                }
            })
            .collect();
        SeriesStore::new(bars).unwrap()
    }

    #[test]
    fn long_series_gets_every_column() {
        let mut store = store_with(120);
        let report = IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
        assert!(report.is_complete());
        for key in keys::ALL {
            let col = store.column(key).unwrap();
            assert_eq!(col.len(), 120);
            assert!(col.last().is_some(), "{key} undefined on last row");
        }
        assert_eq!(report.computed.len(), keys::ALL.len());
    }

    #[test]
    fn short_series_skips_long_windows() {
        let mut store = store_with(30);
        let report = IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();

        assert!(store.has_column(keys::MA20));
        assert!(store.has_column(keys::MACD));
        assert!(!store.has_column(keys::MA60));

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].columns, vec![keys::MA60.to_string()]);
        assert!(matches!(
            report.skipped[0].reason,
            EngineError::InsufficientData { required: 60, available: 30, .. }
        ));
    }

    #[test]
    fn invalid_parameters_abort() {
        let mut store = store_with(40);
        let params = IndicatorParams {
            macd_fast: 30,
            ..IndicatorParams::default()
        };
        assert!(matches!(
            IndicatorEngine::populate(&mut store, &params),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn repopulating_is_bit_identical() {
        let mut store = store_with(80);
        IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
        let first: Vec<IndicatorColumn> = keys::ALL
            .iter()
            .map(|k| store.column(k).unwrap().clone())
            .collect();

        IndicatorEngine::populate(&mut store, &IndicatorParams::default()).unwrap();
        for (key, before) in keys::ALL.iter().zip(first) {
            let after = store.column(key).unwrap();
            let a: Vec<Option<u64>> = before.iter().map(|c| c.map(f64::to_bits)).collect();
            let b: Vec<Option<u64>> = after.iter().map(|c| c.map(f64::to_bits)).collect();
            assert_eq!(a, b, "{key} changed on recompute");
        }
        assert_eq!(store.column_names().len(), keys::ALL.len());
    }
}
