//! 1-nearest-neighbour classifier
//!
//! Fitting stores the training rows; prediction returns the label of the
//! closest stored row under Euclidean distance on the raw feature values.
//! No scaling is applied, so wide-range fields such as durations dominate
//! the distance.

use crate::dataset::Dataset;
use crate::errors::{Result, ShoppingError};
use crate::features::Label;

/// A fitted model that labels feature vectors.
pub trait Predictor {
    fn predict(&self, query: &[f64]) -> Result<Label>;

    fn predict_batch(&self, queries: &[Vec<f64>]) -> Result<Vec<Label>> {
        queries.iter().map(|query| self.predict(query)).collect()
    }
}

/// Fitted 1-nearest-neighbour model.
#[derive(Clone, Debug)]
pub struct NearestNeighbor {
    features: Vec<Vec<f64>>,
    labels: Vec<Label>,
    feature_count: usize,
}

impl NearestNeighbor {
    /// Fit on parallel feature rows and labels.
    ///
    /// # Errors
    ///
    /// Fails when the inputs differ in length, are empty, hold rows of
    /// different widths, or contain NaN or infinite values.
    pub fn fit(features: &[Vec<f64>], labels: &[Label]) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(ShoppingError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }

        let feature_count = features
            .first()
            .map(Vec::len)
            .ok_or(ShoppingError::EmptyDataset)?;

        if let Some(row) = features.iter().find(|row| row.len() != feature_count) {
            return Err(ShoppingError::DimensionMismatch {
                expected: feature_count,
                actual: row.len(),
            });
        }

        for row in features {
            check_finite(row)?;
        }

        tracing::debug!(
            "Fitted nearest-neighbour model on {} rows x {} features",
            features.len(),
            feature_count
        );

        Ok(Self {
            features: features.to_vec(),
            labels: labels.to_vec(),
            feature_count,
        })
    }

    pub fn fit_dataset(dataset: &Dataset) -> Result<Self> {
        Self::fit(dataset.features(), dataset.labels())
    }

    /// Number of stored training rows.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Predictor for NearestNeighbor {
    fn predict(&self, query: &[f64]) -> Result<Label> {
        if query.len() != self.feature_count {
            return Err(ShoppingError::DimensionMismatch {
                expected: self.feature_count,
                actual: query.len(),
            });
        }

        check_finite(query)?;

        // Strict comparison keeps the earliest row on ties
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, row) in self.features.iter().enumerate() {
            let distance = squared_distance(row, query);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }

        Ok(self.labels[best])
    }
}

fn check_finite(row: &[f64]) -> Result<()> {
    match row.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ShoppingError::NonFiniteFeature {
            index,
            value: row[index],
        }),
        None => Ok(()),
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_clusters() -> (Vec<Vec<f64>>, Vec<Label>) {
        (
            vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![5.0, 5.0],
                vec![5.0, 6.0],
                vec![6.0, 5.0],
            ],
            vec![0, 0, 0, 1, 1, 1],
        )
    }

    #[test]
    fn test_predicts_closest_label() {
        let (x, y) = two_clusters();
        let model = NearestNeighbor::fit(&x, &y).unwrap();

        assert_eq!(model.predict(&[0.4, 0.4]).unwrap(), 0);
        assert_eq!(model.predict(&[5.2, 5.9]).unwrap(), 1);
    }

    #[test]
    fn test_training_rows_predict_themselves() {
        let (x, y) = two_clusters();
        let model = NearestNeighbor::fit(&x, &y).unwrap();
        assert_eq!(model.len(), 6);
        assert!(!model.is_empty());
        assert_eq!(model.predict_batch(&x).unwrap(), y);
    }

    #[test]
    fn test_non_finite_query_rejected() {
        let x = vec![vec![1000.0, 0.0], vec![0.0, 0.0]];
        let y = vec![1, 0];
        let model = NearestNeighbor::fit(&x, &y).unwrap();

        let err = model.predict(&[0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ShoppingError::NonFiniteFeature { index: 1, .. }));

        let err = model.predict(&[f64::INFINITY, 0.0]).unwrap_err();
        assert!(matches!(err, ShoppingError::NonFiniteFeature { index: 0, .. }));
    }

    #[test]
    fn test_non_finite_training_row_rejected() {
        let x = vec![vec![0.0, 0.0], vec![f64::NEG_INFINITY, 1.0]];
        let err = NearestNeighbor::fit(&x, &[0, 1]).unwrap_err();
        assert!(matches!(err, ShoppingError::NonFiniteFeature { index: 0, .. }));
    }

    #[test]
    fn test_single_neighbour_not_majority() {
        // One positive sits inside a crowd of negatives
        let x = vec![vec![0.0], vec![0.9], vec![1.1], vec![1.0]];
        let y = vec![0, 0, 0, 1];
        let model = NearestNeighbor::fit(&x, &y).unwrap();
        assert_eq!(model.predict(&[1.01]).unwrap(), 1);
    }

    #[test]
    fn test_tie_goes_to_earliest_row() {
        let x = vec![vec![0.0], vec![2.0]];
        let y = vec![1, 0];
        let model = NearestNeighbor::fit(&x, &y).unwrap();
        assert_eq!(model.predict(&[1.0]).unwrap(), 1);
    }

    #[test]
    fn test_unscaled_distance() {
        // The large second coordinate outweighs the first
        let x = vec![vec![0.0, 1000.0], vec![10.0, 0.0]];
        let y = vec![0, 1];
        let model = NearestNeighbor::fit(&x, &y).unwrap();
        assert_eq!(model.predict(&[0.0, 10.0]).unwrap(), 1);
    }

    #[test]
    fn test_fit_length_mismatch() {
        let (x, _) = two_clusters();
        let err = NearestNeighbor::fit(&x, &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ShoppingError::LengthMismatch { features: 6, labels: 2 }
        ));
    }

    #[test]
    fn test_fit_empty() {
        let err = NearestNeighbor::fit(&[], &[]).unwrap_err();
        assert!(matches!(err, ShoppingError::EmptyDataset));
    }

    #[test]
    fn test_query_width_checked() {
        let (x, y) = two_clusters();
        let model = NearestNeighbor::fit(&x, &y).unwrap();
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            ShoppingError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }
}
