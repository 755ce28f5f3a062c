//! Error types for the importer.
//!
//! [`ImportError`] aborts an import run. [`FeatureError`] only describes why a
//! single feature was skipped; the run keeps going and counts it.

use thiserror::Error;

/// Fatal errors: the whole import is cancelled.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input file could not be read.
    #[error("failed to read the file: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a GeoJSON feature collection.
    #[error("invalid GeoJSON document: {0}")]
    Format(String),

    /// The import configuration violates one of its invariants.
    #[error("invalid import configuration: {0}")]
    InvalidConfig(String),

    /// The scene sink refused an instruction.
    #[error("scene sink error: {0}")]
    Sink(String),

    /// Writing a plan or report failed to serialize.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single feature was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("feature {index}: not a JSON object")]
    NotAnObject { index: usize },

    #[error("feature {index}: missing geometry")]
    MissingGeometry { index: usize },

    #[error("feature {index}: missing {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("feature {index}: geometry type '{kind}' is not a Point")]
    NotAPoint { index: usize, kind: String },

    #[error("feature {index}: {field} must have 3 components, got {len}")]
    BadArity {
        index: usize,
        field: &'static str,
        len: usize,
    },

    #[error("feature {index}: {field} must be an array of numbers")]
    NotNumeric { index: usize, field: &'static str },

    #[error("feature {index}: {field} contains a non-finite value")]
    NonFinite { index: usize, field: &'static str },
}

impl FeatureError {
    /// Position of the offending feature in the `features` array.
    pub fn index(&self) -> usize {
        match self {
            FeatureError::NotAnObject { index }
            | FeatureError::MissingGeometry { index }
            | FeatureError::MissingField { index, .. }
            | FeatureError::NotAPoint { index, .. }
            | FeatureError::BadArity { index, .. }
            | FeatureError::NotNumeric { index, .. }
            | FeatureError::NonFinite { index, .. } => *index,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
