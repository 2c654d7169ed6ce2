// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free column functions over a daily close series (KDJ also
// reads highs and lows). Every function returns columns as long as its input
// with `None` in the warm-up cells, and fails with `InsufficientData` when the
// input cannot produce a single defined value.

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod kdj;
pub mod keys;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger, BollingerColumns};
pub use ema::ema;
pub use engine::{IndicatorEngine, PopulateReport, SkippedIndicator};
pub use kdj::{kdj, raw_k, KdjColumns};
pub use macd::{macd, MacdColumns};
pub use rsi::rsi;
pub use sma::sma;
