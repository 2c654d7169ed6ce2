// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the same trailing window.

use crate::error::EngineError;
use crate::indicators::sma::rolling_mean;
use crate::series::IndicatorColumn;

/// Upper, middle and lower band columns.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub upper: IndicatorColumn,
    pub middle: IndicatorColumn,
    pub lower: IndicatorColumn,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `upper`  = SMA + `num_std` * σ
/// - `middle` = SMA
/// - `lower`  = SMA - `num_std` * σ
///
/// # Errors
/// - `InvalidParameter` when `period == 0` or `num_std` is negative or not finite.
/// - `InsufficientData` when fewer than `period` closes are supplied.
pub fn bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Result<BollingerColumns, EngineError> {
    if period == 0 {
        return Err(EngineError::InvalidParameter(
            "Bollinger period must be greater than 0".to_string(),
        ));
    }
    if !num_std.is_finite() || num_std < 0.0 {
        return Err(EngineError::InvalidParameter(format!(
            "Bollinger deviation multiplier must be a non-negative number, got {num_std}"
        )));
    }
    if closes.len() < period {
        return Err(EngineError::insufficient(
            &format!("BBANDS({period})"),
            period,
            closes.len(),
        ));
    }

    let middle = rolling_mean(closes, period);
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    for i in period - 1..closes.len() {
        let Some(mid) = middle[i] else { continue };
        let window = &closes[i + 1 - period..=i];
        let variance = window.iter().map(|x| (x - mid).powi(2)).sum::<f64>() / period as f64;
        let width = num_std * variance.sqrt();
        upper[i] = Some(mid + width);
        lower[i] = Some(mid - width);
    }

    Ok(BollingerColumns {
        upper: IndicatorColumn::from_cells(upper),
        middle: IndicatorColumn::from_cells(middle),
        lower: IndicatorColumn::from_cells(lower),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = bollinger(&closes, 20, 2.0).unwrap();
        assert_eq!(bb.middle.first_defined(), Some(19));
        assert_eq!(bb.upper.first_defined(), Some(19));
        let (u, m, l) = (
            bb.upper.last().unwrap(),
            bb.middle.last().unwrap(),
            bb.lower.last().unwrap(),
        );
        assert!((m - 10.5).abs() < 1e-12);
        // population σ of 1..=20 = sqrt((20^2 - 1) / 12)
        let sigma = ((400.0 - 1.0) / 12.0_f64).sqrt();
        assert!((u - (10.5 + 2.0 * sigma)).abs() < 1e-9);
        assert!((l - (10.5 - 2.0 * sigma)).abs() < 1e-9);
    }

    #[test]
    fn bollinger_insufficient_data() {
        assert!(matches!(
            bollinger(&[1.0, 2.0, 3.0], 20, 2.0),
            Err(EngineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn bollinger_rejects_negative_multiplier() {
        assert!(matches!(
            bollinger(&[1.0; 25], 20, -1.0),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn bollinger_flat_collapses_bands() {
        let bb = bollinger(&[100.0; 25], 20, 2.0).unwrap();
        assert_eq!(bb.upper.last(), Some(100.0));
        assert_eq!(bb.middle.last(), Some(100.0));
        assert_eq!(bb.lower.last(), Some(100.0));
    }

    proptest! {
        #[test]
        fn bands_are_symmetric(closes in prop::collection::vec(1.0f64..1000.0, 20..100)) {
            let bb = bollinger(&closes, 20, 2.0).unwrap();
            for i in 19..closes.len() {
                let (u, m, l) = (
                    bb.upper.get(i).unwrap(),
                    bb.middle.get(i).unwrap(),
                    bb.lower.get(i).unwrap(),
                );
                prop_assert!(((u - m) - (m - l)).abs() <= 1e-9 * m.abs().max(1.0));
                prop_assert!(u >= m && m >= l);
            }
        }
    }
}
