//! Error types for training, prediction and evaluation.

use thiserror::Error;

use crate::dataset::Label;

#[derive(Debug, Error)]
pub enum BayesError {
    /// A class has too few training samples for a sample standard deviation.
    #[error("class {label} has {count} training sample(s), at least 2 are required")]
    DegenerateClass { label: Label, count: usize },

    #[error("recall is undefined: the test set has no positive examples")]
    EmptyPositiveSet,

    #[error("precision is undefined: no positive predictions were made")]
    EmptyPredictedPositive,

    /// A vector's feature count disagrees with what the model expects.
    #[error("expected {expected} features, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("test set is empty")]
    EmptyTestSet,

    #[error("{records} test records but {predictions} predictions")]
    LengthMismatch { records: usize, predictions: usize },

    #[error("split ratio must be within [0, 1], got {0}")]
    InvalidRatio(f64),

    #[error("no class summaries to predict with")]
    NoClasses,

    #[error("row {row}, column {column}: could not parse {value:?} as a number")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("row {row}: label {value} is not an integer")]
    NonIntegerLabel { row: usize, value: f64 },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BayesError>;
