// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line = EMA(fast) - EMA(slow)          defined from index slow - 1
//   Signal    = EMA(signal) of the MACD line,   seeded on its first `signal`
//               defined values                  defined from slow + signal - 2
//   Histogram = MACD line - Signal
//
// Both price EMAs are SMA-seeded (see `ema.rs`). A series long enough for the
// MACD line but not for the signal seed yields a partial result: a defined
// MACD tail and undefined signal / histogram cells.
// =============================================================================

use crate::error::EngineError;
use crate::indicators::ema::{ema_cells, ema_values};
use crate::series::IndicatorColumn;

/// The three MACD output columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    pub macd: IndicatorColumn,
    pub signal: IndicatorColumn,
    pub histogram: IndicatorColumn,
}

/// Compute MACD, signal and histogram columns.
///
/// # Errors
/// - `InvalidParameter` when any period is zero or `fast >= slow`.
/// - `InsufficientData` when `closes.len() < slow`.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdColumns, EngineError> {
    if fast == 0 || slow == 0 || signal == 0 {
        return Err(EngineError::InvalidParameter(
            "MACD periods must be greater than 0".to_string(),
        ));
    }
    if fast >= slow {
        return Err(EngineError::InvalidParameter(format!(
            "MACD fast period {fast} must be less than slow period {slow}"
        )));
    }
    if closes.len() < slow {
        return Err(EngineError::insufficient(
            &format!("MACD({fast},{slow},{signal})"),
            slow,
            closes.len(),
        ));
    }

    let fast_ema = ema_values(closes, fast);
    let slow_ema = ema_values(closes, slow);

    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal_line = ema_cells(&line, signal);

    let histogram: Vec<Option<f64>> = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    Ok(MacdColumns {
        macd: IndicatorColumn::from_cells(line),
        signal: IndicatorColumn::from_cells(signal_line),
        histogram: IndicatorColumn::from_cells(histogram),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 + 0.1 * i as f64).collect()
    }

    #[test]
    fn macd_rejects_short_series() {
        let err = macd(&ramp(20), 12, 26, 9).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientData {
                indicator: "MACD(12,26,9)".into(),
                required: 26,
                available: 20
            }
        );
        assert!(macd(&ramp(25), 12, 26, 9).is_err());
    }

    #[test]
    fn macd_rejects_bad_periods() {
        assert!(matches!(
            macd(&ramp(40), 26, 12, 9),
            Err(EngineError::InvalidParameter(_))
        ));
        assert!(matches!(
            macd(&ramp(40), 12, 26, 0),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn macd_partial_columns_on_short_series() {
        let out = macd(&ramp(30), 12, 26, 9).unwrap();
        assert_eq!(out.macd.len(), 30);
        assert_eq!(out.macd.first_defined(), Some(25));
        assert_eq!(out.macd.defined_count(), 5);
        assert_eq!(out.signal.defined_count(), 0);
        assert_eq!(out.histogram.defined_count(), 0);
    }

    #[test]
    fn macd_full_warm_up() {
        let out = macd(&ramp(60), 12, 26, 9).unwrap();
        assert_eq!(out.macd.first_defined(), Some(25));
        assert_eq!(out.signal.first_defined(), Some(33));
        assert_eq!(out.histogram.first_defined(), Some(33));
    }

    #[test]
    fn macd_signal_seed_is_mean_of_first_values() {
        let closes: Vec<f64> = (0..40).map(|i| 20.0 + (i as f64 * 0.7).sin()).collect();
        let out = macd(&closes, 12, 26, 9).unwrap();
        let seed: f64 = (25..34).map(|i| out.macd.get(i).unwrap()).sum::<f64>() / 9.0;
        assert!((out.signal.get(33).unwrap() - seed).abs() < 1e-12);
    }

    #[test]
    fn macd_line_is_fast_minus_slow() {
        let closes: Vec<f64> = (0..50).map(|i| 5.0 + (i as f64 * 0.3).cos()).collect();
        let out = macd(&closes, 12, 26, 9).unwrap();
        let fast = ema_values(&closes, 12);
        let slow = ema_values(&closes, 26);
        for i in 25..50 {
            assert_eq!(out.macd.get(i), Some(fast[i].unwrap() - slow[i].unwrap()));
        }
    }

    proptest! {
        #[test]
        fn histogram_is_exact_difference(closes in prop::collection::vec(1.0f64..300.0, 26..120)) {
            let out = macd(&closes, 12, 26, 9).unwrap();
            for i in 0..closes.len() {
                match (out.macd.get(i), out.signal.get(i), out.histogram.get(i)) {
                    (Some(m), Some(s), Some(h)) => prop_assert_eq!(h, m - s),
                    (_, None, h) => prop_assert!(h.is_none()),
                    _ => prop_assert!(false, "signal defined without MACD at {}", i),
                }
            }
        }
    }
}
