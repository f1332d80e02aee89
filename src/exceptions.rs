//! ## Custom Errors for Housing Features
//!
//! This module defines the error type shared by every transformer in the crate.
//! It uses the `thiserror` crate to derive the `Error` trait. The main domain error is
//! [`FeatureError::MissingColumns`], raised when a transformer is given a DataFrame that
//! lacks one or more of the columns it needs. The payload names exactly the absent columns
//! and carries a stage tag so the failure can be traced back to the transformer.
//!
//! The `FeatureResult` type alias simplifies error handling by providing a convenient
//! alias for results returned by the library.
//!
//! ### Example
//!
//! ```rust
//! use housing_features::exceptions::{FeatureError, FeatureResult};
//!
//! fn check() -> FeatureResult<()> {
//!     Err(FeatureError::MissingColumns {
//!         stage: "QualEnc",
//!         columns: vec!["ExterQual".to_string()],
//!     })
//! }
//!
//! assert!(check().is_err());
//! ```

use thiserror::Error;

/// Errors raised by the housing feature transformers.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Wraps errors from DataFusion (planning or execution).
    #[error("DataFusion error: {0}")]
    DataFusionError(#[from] datafusion::error::DataFusionError),

    /// Wraps errors from Arrow.
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// One or more columns required by a transformer are not present in the DataFrame.
    #[error("[{stage}] DataFrame does not include the columns: {columns:?}")]
    MissingColumns {
        /// Tag of the transformer that raised the error.
        stage: &'static str,
        /// The required columns that are absent, in the order they were required.
        columns: Vec<String>,
    },

    /// Indicates that an invalid parameter was provided (e.g., a column without a known encoding).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Indicates the transform method was called before calling fit for a stateful transformer.
    #[error("Transform called before fit for stateful transformer")]
    FitNotCalled,

    /// A pipeline step failed; the underlying error is kept as the source.
    #[error("Error in pipeline step '{step}': {source}")]
    PipelineStep {
        step: String,
        #[source]
        source: Box<FeatureError>,
    },
}

impl FeatureError {
    /// Returns the missing column names if this is (or wraps) a `MissingColumns` error.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            FeatureError::MissingColumns { columns, .. } => Some(columns),
            FeatureError::PipelineStep { source, .. } => source.missing_columns(),
            _ => None,
        }
    }
}

/// A convenient result type for housing feature operations.
pub type FeatureResult<T> = std::result::Result<T, FeatureError>;
