//! Sensitivity / specificity evaluation
//!
//! A rate whose denominator is zero (no actual positives, or no actual
//! negatives, in the test subset) is reported as `f64::NAN` rather than
//! raising.

use crate::errors::{Result, ShoppingError};
use crate::features::Label;

/// Outcome counts for a binary classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
}

impl ConfusionMatrix {
    /// Tally `(actual, predicted)` pairs.
    pub fn from_labels(actual: &[Label], predicted: &[Label]) -> Result<Self> {
        if actual.len() != predicted.len() {
            return Err(ShoppingError::PredictionCountMismatch {
                predictions: predicted.len(),
                labels: actual.len(),
            });
        }

        let mut matrix = Self::default();
        for (&truth, &guess) in actual.iter().zip(predicted) {
            match (truth == 1, guess == 1) {
                (true, true) => matrix.true_positives += 1,
                (true, false) => matrix.false_negatives += 1,
                (false, false) => matrix.true_negatives += 1,
                (false, true) => matrix.false_positives += 1,
            }
        }
        Ok(matrix)
    }

    pub fn positives(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn negatives(&self) -> usize {
        self.true_negatives + self.false_positives
    }

    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    pub fn incorrect(&self) -> usize {
        self.false_positives + self.false_negatives
    }

    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            sensitivity: rate(self.true_positives, self.positives()),
            specificity: rate(self.true_negatives, self.negatives()),
        }
    }
}

/// True positive and true negative rates, each in [0, 1] or NaN when undefined.
#[derive(Clone, Copy, Debug)]
pub struct Evaluation {
    pub sensitivity: f64,
    pub specificity: f64,
}

impl Evaluation {
    /// Whether both rates had a non-zero denominator.
    pub fn is_defined(&self) -> bool {
        !self.sensitivity.is_nan() && !self.specificity.is_nan()
    }
}

/// Compute (sensitivity, specificity) from parallel actual/predicted labels.
pub fn evaluate(actual: &[Label], predicted: &[Label]) -> Result<Evaluation> {
    Ok(ConfusionMatrix::from_labels(actual, predicted)?.evaluation())
}

fn rate(hits: usize, total: usize) -> f64 {
    if total == 0 {
        f64::NAN
    } else {
        hits as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_and_half() {
        let eval = evaluate(&[1, 1, 0, 0], &[1, 0, 0, 1]).unwrap();
        assert_eq!(eval.sensitivity, 0.5);
        assert_eq!(eval.specificity, 0.5);
        assert!(eval.is_defined());
    }

    #[test]
    fn test_no_negatives_leaves_specificity_undefined() {
        let eval = evaluate(&[1, 1, 1], &[1, 1, 1]).unwrap();
        assert_eq!(eval.sensitivity, 1.0);
        assert!(eval.specificity.is_nan());
        assert!(!eval.is_defined());
    }

    #[test]
    fn test_no_positives_leaves_sensitivity_undefined() {
        let eval = evaluate(&[0, 0], &[1, 0]).unwrap();
        assert!(eval.sensitivity.is_nan());
        assert_eq!(eval.specificity, 0.5);
    }

    #[test]
    fn test_confusion_counts() {
        let matrix = ConfusionMatrix::from_labels(&[1, 1, 0, 0, 0], &[1, 0, 0, 1, 0]).unwrap();
        assert_eq!(
            matrix,
            ConfusionMatrix {
                true_positives: 1,
                false_negatives: 1,
                true_negatives: 2,
                false_positives: 1,
            }
        );
        assert_eq!(matrix.correct(), 3);
        assert_eq!(matrix.incorrect(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let err = evaluate(&[1, 0], &[1]).unwrap_err();
        assert!(matches!(
            err,
            ShoppingError::PredictionCountMismatch { predictions: 1, labels: 2 }
        ));
        assert_eq!(err.to_string(), "length mismatch: 1 predictions for 2 actual labels");
    }
}
