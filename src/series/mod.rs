// =============================================================================
// Series Store Module
// =============================================================================
//
// Time-ordered OHLCV storage plus the indicator columns derived from it.
// Holds no indicator-specific knowledge: columns are attached by name.

pub mod column;
pub mod store;

pub use column::IndicatorColumn;
pub use store::SeriesStore;
