// File: crates/spectrum-core/src/error.rs
// Summary: Error taxonomy for the spectrum plot engine.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// Zero/negative sample rate, zero-length data, or an unusable view parameter.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    /// Declared shape and supplied magnitudes disagree.
    #[error("invalid spectrum data: {0}")]
    InvalidSpectrumData(String),
    /// Field-name metadata absent or unusable. Recoverable: callers fall back to a default.
    #[error("missing field metadata: {0}")]
    MissingFieldMetadata(String),
    /// The drawing backend could not perform an operation (e.g. allocate a layer).
    #[error("surface error: {0}")]
    Surface(String),
}

impl PlotError {
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidSpectrumData(msg.into())
    }
}

pub type PlotResult<T> = Result<T, PlotError>;
