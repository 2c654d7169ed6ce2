// =============================================================================
// Engine Errors
// =============================================================================
//
// One error enum for the series store, the indicator functions and the signal
// classifier. Boundary code (config files, data sources, the binary) wraps
// these in `anyhow` with context.
// =============================================================================

use thiserror::Error;

/// Errors raised by the core engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed or unordered input rejected at series construction.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// A column whose length does not match the series it is attached to.
    #[error("column '{name}' has length {actual}, series has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Lookup of a column that was never attached.
    #[error("column '{0}' not found")]
    NotFound(String),

    /// The series is shorter than the indicator's minimum window.
    #[error("{indicator} needs at least {required} bars, got {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    /// The classifier ran before its input columns were ready.
    #[error("indicator '{0}' is undefined on the latest row")]
    IncompleteIndicators(String),

    /// A period or parameter combination that can never produce a value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl EngineError {
    /// Shorthand used by every indicator's length guard.
    pub(crate) fn insufficient(indicator: &str, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            indicator: indicator.to_string(),
            required,
            available,
        }
    }

    /// True for the errors a caller may recover from by skipping work.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::IncompleteIndicators(_)
        )
    }
}
