//! Shopping session purchase predictor
//!
//! Encodes online shopping sessions into numeric feature vectors, fits a
//! 1-nearest-neighbour classifier on a random training subset, and reports
//! its sensitivity and specificity on the held-out rest.

pub mod config;
pub mod dataset;
pub mod errors;
pub mod features;
pub mod knn;
pub mod metrics;
pub mod pipeline;
pub mod split;

pub use config::{PredictorConfig, TEST_SIZE};
pub use dataset::Dataset;
pub use errors::{Result, ShoppingError};
pub use features::{encode_row, Label, Month, SessionRecord, FEATURE_COLUMNS, FEATURE_COUNT};
pub use knn::{NearestNeighbor, Predictor};
pub use metrics::{evaluate, ConfusionMatrix, Evaluation};
pub use pipeline::{evaluate_split, run, Report};
pub use split::{split_with_order, train_test_split, TrainTestSplit};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
