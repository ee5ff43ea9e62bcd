use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the session predictor.
#[derive(Debug, Error)]
pub enum ShoppingError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{0}' is missing from the header")]
    MissingColumn(&'static str),

    /// ParseError class: the raw value is not an integer literal.
    #[error("row {row}, column {column}: invalid integer '{value}'")]
    InvalidInteger {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// ParseError class: the raw value is not a numeric literal.
    #[error("row {row}, column {column}: invalid number '{value}'")]
    InvalidFloat {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// LookupError class: the month abbreviation is not in the table.
    #[error("row {row}: unrecognised month '{value}'")]
    UnknownMonth { row: usize, value: String },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("test fraction must lie strictly between 0 and 1, got {0}")]
    InvalidTestFraction(f64),

    #[error("length mismatch: {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("length mismatch: {predictions} predictions for {labels} actual labels")]
    PredictionCountMismatch { predictions: usize, labels: usize },

    #[error("feature {index} is not a finite number ({value})")]
    NonFiniteFeature { index: usize, value: f64 },

    #[error("split order must be a permutation of 0..{expected}")]
    InvalidSplitOrder { expected: usize },

    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShoppingError>;
