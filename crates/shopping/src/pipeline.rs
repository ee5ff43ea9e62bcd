//! End-to-end evaluation run: load, split, fit, predict, evaluate.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::PredictorConfig;
use crate::dataset::Dataset;
use crate::errors::Result;
use crate::features::FEATURE_COLUMNS;
use crate::knn::{NearestNeighbor, Predictor};
use crate::metrics::{ConfusionMatrix, Evaluation};
use crate::split::{train_test_split, TrainTestSplit};

/// Summary of one evaluation run.
#[derive(Clone, Copy, Debug)]
pub struct Report {
    pub correct: usize,
    pub incorrect: usize,
    pub evaluation: Evaluation,
}

impl Report {
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        Self {
            correct: matrix.correct(),
            incorrect: matrix.incorrect(),
            evaluation: matrix.evaluation(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correct: {}", self.correct)?;
        writeln!(f, "Incorrect: {}", self.incorrect)?;
        writeln!(
            f,
            "True Positive Rate: {:.2}%",
            100.0 * self.evaluation.sensitivity
        )?;
        write!(
            f,
            "True Negative Rate: {:.2}%",
            100.0 * self.evaluation.specificity
        )
    }
}

/// Load `path` and evaluate a 1-nearest-neighbour model on a random split.
pub fn run<P: AsRef<Path>>(path: P, config: &PredictorConfig) -> Result<Report> {
    config.validate()?;

    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());
    let dataset = Dataset::from_csv(path)?;
    info!(
        "Loaded {} sessions ({} with revenue)",
        dataset.len(),
        dataset.positive_count()
    );

    for (name, (min, max)) in FEATURE_COLUMNS.iter().zip(dataset.feature_stats()) {
        debug!("  {}: min={}, max={}", name, min, max);
    }

    match config.seed {
        Some(seed) => info!("Splitting with test_size={} seed={}", config.test_size, seed),
        None => info!("Splitting with test_size={} (unseeded)", config.test_size),
    }
    let split = train_test_split(&dataset, config.test_size, config.seed)?;

    evaluate_split(&split)
}

/// Fit on `split.train` and score predictions against `split.test`.
pub fn evaluate_split(split: &TrainTestSplit) -> Result<Report> {
    info!(
        "Training on {} sessions, testing on {}",
        split.train.len(),
        split.test.len()
    );

    let model = NearestNeighbor::fit_dataset(&split.train)?;
    let predictions = model.predict_batch(split.test.features())?;

    let matrix = ConfusionMatrix::from_labels(split.test.labels(), &predictions)?;
    debug!("Confusion matrix: {:?}", matrix);

    let report = Report::from_confusion(&matrix);
    if !report.evaluation.is_defined() {
        if matrix.positives() == 0 {
            warn!("Test subset has no purchasing sessions; true positive rate is undefined");
        }
        if matrix.negatives() == 0 {
            warn!("Test subset has no non-purchasing sessions; true negative rate is undefined");
        }
    }

    Ok(report)
}
