// =============================================================================
// A-Share Quant — daily bar indicators and signal classification
// =============================================================================
//
// Pipeline:
//   DataSource -> SeriesStore -> IndicatorEngine::populate -> classify
//
// The store owns the bars and every derived column; indicator functions are
// pure over close/high/low slices; the classifier reads the latest row only.
// =============================================================================

pub mod classifier;
pub mod config;
pub mod data_source;
pub mod error;
pub mod indicators;
pub mod report;
pub mod series;
pub mod types;

pub use classifier::{classify, ClassificationResult};
pub use config::{AnalysisConfig, ClassifierThresholds, IndicatorParams};
pub use data_source::{BarRequest, DataSource, JsonFileSource};
pub use error::EngineError;
pub use indicators::{IndicatorEngine, PopulateReport};
pub use report::{recent_rows, RecentRow, Summary};
pub use series::{IndicatorColumn, SeriesStore};
pub use types::{PriceBar, RsiZone, TrendLabel};
