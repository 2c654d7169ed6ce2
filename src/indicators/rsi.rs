// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1: Per-bar gain = max(close_i - close_{i-1}, 0),
//         loss = max(close_{i-1} - close_i, 0), for i >= 1.
// Step 2: Seed average gain / average loss with the simple mean of the
//         first `period` gains / losses (indices 1..=period).
// Step 3: Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + loss) / period
// Step 4: RSI = 100                          when avg_loss == 0
//         RSI = 100 - 100 / (1 + avg_gain / avg_loss)   otherwise
//
// The first defined cell is at index `period`.
// =============================================================================

use crate::error::EngineError;
use crate::series::IndicatorColumn;

/// Compute the RSI column for the given `closes` and `period`.
///
/// # Errors
/// - `InvalidParameter` when `period == 0`.
/// - `InsufficientData` when `closes.len() < period + 1` (need `period`
///   price changes to seed the averages).
pub fn rsi(closes: &[f64], period: usize) -> Result<IndicatorColumn, EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "RSI period must be greater than 0".to_string(),
        ));
    }
    if closes.len() < period + 1 {
        return Err(EngineError::insufficient(
            &format!("RSI({period})"),
            period + 1,
            closes.len(),
        ));
    }

    let mut out = vec![None; closes.len()];
    let period_f = period as f64;

    // --- Seed averages with the mean of the first `period` moves -------------
    let (sum_gain, sum_loss) = (1..=period).fold((0.0_f64, 0.0_f64), |(g, l), i| {
        let (gain, loss) = gain_loss(closes[i - 1], closes[i]);
        (g + gain, l + loss)
    });

    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;
    out[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    // --- Wilder's smoothing for subsequent values ----------------------------
    for i in period + 1..closes.len() {
        let (gain, loss) = gain_loss(closes[i - 1], closes[i]);
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(IndicatorColumn::from_cells(out))
}

// =============================================================================
// Internal helpers
// =============================================================================

fn gain_loss(prev: f64, curr: f64) -> (f64, f64) {
    ((curr - prev).max(0.0), (prev - curr).max(0.0))
}

/// A flat window (no gains, no losses) also reads 100.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
