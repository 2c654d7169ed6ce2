// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_i = (close_{i-p+1} + ... + close_i) / p        for i >= p - 1
//
// Every window is re-summed so each cell equals the exact window mean. Also
// used for the Bollinger middle band and the KDJ K/D smoothing.
// =============================================================================

use crate::error::EngineError;
use crate::series::IndicatorColumn;

/// Trailing simple moving average of `closes` over `period` bars.
///
/// # Errors
/// - `InvalidParameter` when `period == 0`.
/// - `InsufficientData` when fewer than `period` closes are supplied.
pub fn sma(closes: &[f64], period: usize) -> Result<IndicatorColumn, EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "SMA period must be greater than 0".to_string(),
        ));
    }
    if closes.len() < period {
        return Err(EngineError::insufficient(
            &format!("SMA({period})"),
            period,
            closes.len(),
        ));
    }

    Ok(IndicatorColumn::from_cells(rolling_mean(closes, period)))
}

/// Trailing window mean over a fully defined slice. Cells before `period - 1`
/// stay `None`; a short input yields an all-`None` vector.
///
/// Each window is summed afresh in index order so every cell is bit-identical
/// to `window.iter().sum() / period`.
pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let period_f = period as f64;
    for (offset, window) in values.windows(period).enumerate() {
        out[offset + period - 1] = Some(window.iter().sum::<f64>() / period_f);
    }

    out
}

/// Rolling mean over the contiguous defined run of a column.
///
/// The run starts at the first defined cell and ends at the next undefined
/// one; everything outside it stays `None`.
pub(crate) fn rolling_mean_cells(cells: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; cells.len()];
    let Some(start) = cells.iter().position(Option::is_some) else {
        return out;
    };

    let run: Vec<f64> = cells[start..].iter().map_while(|c| *c).collect();
    for (offset, value) in rolling_mean(&run, period).into_iter().enumerate() {
        out[start + offset] = value;
    }
    out
}
