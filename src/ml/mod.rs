//! Machine learning helpers for training and inference.
//!
//! A seeded CART decision tree, a bootstrap random forest built from it, a
//! deterministic train/test split and the two training paths the dashboard
//! runs on each analysis.

pub mod classifier;
pub mod decision_tree;
pub mod forest;
pub mod metrics;
pub mod split;

use thiserror::Error;

pub use classifier::{
    BINARY_CLASSES, Evaluation, PROBE_POINT, Prediction, PredictionLabel, train_eval,
    train_full_and_predict_one,
};
pub use decision_tree::{DecisionTree, TreeParams};
pub use forest::{ForestParams, RandomForest};
pub use split::{SplitIndices, train_test_split};

/// Errors raised while fitting or querying a model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainError {
    #[error("cannot train on an empty dataset")]
    EmptyDataset,
    #[error("feature matrix has {features} rows but label vector has {labels}")]
    LengthMismatch { features: usize, labels: usize },
    #[error("label {label} is outside the {n_classes} known classes")]
    LabelOutOfRange { label: usize, n_classes: usize },
    #[error("a forest needs at least one tree")]
    NoTrees,
    #[error("test fraction {0} must lie strictly between 0 and 1")]
    InvalidTestFraction(f64),
    #[error("{rows} rows cannot be split into non-empty train and test partitions")]
    SplitTooSmall { rows: usize },
    #[error("point has {got} features but the model expects {expected}")]
    FeatureMismatch { expected: usize, got: usize },
}
