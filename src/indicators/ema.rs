// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha  = 2 / (period + 1)
//   EMA_t  = alpha * close_t + (1 - alpha) * EMA_{t-1}
//
// The first EMA value, at index `period - 1`, is seeded with the SMA of the
// first `period` closes. Earlier cells are undefined.
// =============================================================================

use crate::error::EngineError;
use crate::series::IndicatorColumn;

/// Compute the EMA column for `closes` and look-back `period`.
///
/// # Errors
/// - `InvalidParameter` when `period == 0`.
/// - `InsufficientData` when `closes.len() < period`.
pub fn ema(closes: &[f64], period: usize) -> Result<IndicatorColumn, EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "EMA period must be greater than 0".to_string(),
        ));
    }
    if closes.len() < period {
        return Err(EngineError::insufficient(
            &format!("EMA({period})"),
            period,
            closes.len(),
        ));
    }

    Ok(IndicatorColumn::from_cells(ema_values(closes, period)))
}

/// SMA-seeded EMA over a fully defined slice; short input gives all `None`.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of the first `period` values.
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(prev);

    for i in period..values.len() {
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        out[i] = Some(prev);
    }

    out
}

/// EMA over the contiguous defined run of a column, seeded on the first
/// `period` defined values. Used for the MACD signal line.
pub(crate) fn ema_cells(cells: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; cells.len()];
    let Some(start) = cells.iter().position(Option::is_some) else {
        return out;
    };

    let run: Vec<f64> = cells[start..].iter().map_while(|c| *c).collect();
    for (offset, value) in ema_values(&run, period).into_iter().enumerate() {
        out[start + offset] = value;
    }
    out
}
