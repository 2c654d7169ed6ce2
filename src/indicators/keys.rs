// Stable column identifiers exposed through `SeriesStore::column`.

pub const MA5: &str = "MA5";
pub const MA10: &str = "MA10";
pub const MA20: &str = "MA20";
pub const MA60: &str = "MA60";
pub const RSI: &str = "RSI";
pub const MACD: &str = "MACD";
pub const MACD_SIGNAL: &str = "MACD_SIGNAL";
pub const MACD_HIST: &str = "MACD_HIST";
pub const BB_UPPER: &str = "BB_UPPER";
pub const BB_MIDDLE: &str = "BB_MIDDLE";
pub const BB_LOWER: &str = "BB_LOWER";
pub const K: &str = "K";
pub const D: &str = "D";
pub const J: &str = "J";

/// Every column produced with the default parameters, in report order.
pub const ALL: [&str; 14] = [
    MA5, MA10, MA20, MA60, RSI, MACD, MACD_SIGNAL, MACD_HIST, BB_UPPER, BB_MIDDLE, BB_LOWER, K,
    D, J,
];

/// Column name for a simple moving average of `period` bars.
pub fn ma_key(period: usize) -> String {
    format!("MA{period}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ma_keys_match_constants() {
        assert_eq!(ma_key(5), MA5);
        assert_eq!(ma_key(10), MA10);
        assert_eq!(ma_key(20), MA20);
        assert_eq!(ma_key(60), MA60);
    }
}
