// =============================================================================
// Stochastic KDJ
// =============================================================================
//
//   rawK_i = 100 * (close_i - LL) / (HH - LL)
//            HH / LL = highest high / lowest low of the trailing `fast_k` bars
//            rawK_i = 0 when HH == LL (flat window, no division)
//   K      = SMA(rawK, slow_k)
//   D      = SMA(K, slow_d)
//   J      = 3K - 2D          (not clamped; may leave [0, 100])
//
// With 9/3/3: rawK from index 8, K from 10, D and J from 12.
//
// HH / LL come from monotonic deques so the whole pass stays O(n).
// =============================================================================

use std::collections::VecDeque;

use crate::error::EngineError;
use crate::indicators::sma::rolling_mean_cells;
use crate::series::IndicatorColumn;

/// K, D and J columns.
#[derive(Debug, Clone, PartialEq)]
pub struct KdjColumns {
    pub k: IndicatorColumn,
    pub d: IndicatorColumn,
    pub j: IndicatorColumn,
}

/// Compute the KDJ oscillator from aligned high/low/close series.
///
/// # Errors
/// - `InvalidParameter` when a period is zero or the input slices differ in
///   length.
/// - `InsufficientData` when fewer than `fast_k + slow_k - 1` bars are
///   supplied (K would have no defined cell).
pub fn kdj(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    fast_k: usize,
    slow_k: usize,
    slow_d: usize,
) -> Result<KdjColumns, EngineError> {
    if slow_k == 0 || slow_d == 0 {
        return Err(EngineError::InvalidParameter(
            "KDJ smoothing periods must be greater than 0".to_string(),
        ));
    }
    check_inputs(highs, lows, closes, fast_k)?;

    let required = fast_k + slow_k - 1;
    if closes.len() < required {
        return Err(EngineError::insufficient(
            &format!("KDJ({fast_k},{slow_k},{slow_d})"),
            required,
            closes.len(),
        ));
    }

    let raw = raw_stochastic(highs, lows, closes, fast_k);
    let k = rolling_mean_cells(&raw, slow_k);
    let d = rolling_mean_cells(&k, slow_d);
    let j = k
        .iter()
        .zip(&d)
        .map(|(k, d)| match (k, d) {
            (Some(k), Some(d)) => Some(3.0 * k - 2.0 * d),
            _ => None,
        })
        .collect();

    Ok(KdjColumns {
        k: IndicatorColumn::from_cells(k),
        d: IndicatorColumn::from_cells(d),
        j: IndicatorColumn::from_cells(j),
    })
}

/// Unsmoothed stochastic %K over `period` bars.
///
/// # Errors
/// Same input checks as [`kdj`]; needs at least `period` bars.
pub fn raw_k(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Result<IndicatorColumn, EngineError> {
    check_inputs(highs, lows, closes, period)?;
    if closes.len() < period {
        return Err(EngineError::insufficient(
            &format!("RAW_K({period})"),
            period,
            closes.len(),
        ));
    }
    Ok(IndicatorColumn::from_cells(raw_stochastic(
        highs, lows, closes, period,
    )))
}

fn check_inputs(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Result<(), EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "stochastic period must be greater than 0".to_string(),
        ));
    }
    if highs.len() != closes.len() || lows.len() != closes.len() {
        return Err(EngineError::InvalidParameter(format!(
            "high/low/close lengths differ: {}/{}/{}",
            highs.len(),
            lows.len(),
            closes.len()
        )));
    }
    Ok(())
}

fn raw_stochastic(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut out = vec![None; n];
    // Indices with non-increasing highs / non-decreasing lows; front is the
    // current window's extreme.
    let mut max_q: VecDeque<usize> = VecDeque::with_capacity(period);
    let mut min_q: VecDeque<usize> = VecDeque::with_capacity(period);

    for i in 0..n {
        while max_q.back().is_some_and(|&b| highs[b] <= highs[i]) {
            max_q.pop_back();
        }
        max_q.push_back(i);

        while min_q.back().is_some_and(|&b| lows[b] >= lows[i]) {
            min_q.pop_back();
        }
        min_q.push_back(i);

        if i + 1 < period {
            continue;
        }

        let start = i + 1 - period;
        while max_q.front().is_some_and(|&f| f < start) {
            max_q.pop_front();
        }
        while min_q.front().is_some_and(|&f| f < start) {
            min_q.pop_front();
        }

        let (Some(&hi), Some(&lo)) = (max_q.front(), min_q.front()) else {
            continue;
        };
        let highest = highs[hi];
        let lowest = lows[lo];
        let range = highest - lowest;

        out[i] = Some(if range == 0.0 {
            0.0
        } else {
            100.0 * (closes[i] - lowest) / range
        });
    }

    out
}
