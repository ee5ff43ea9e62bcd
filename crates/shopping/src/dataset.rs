//! CSV dataset loading
//!
//! Reads a header-led, comma-separated session file and encodes every row
//! into parallel feature/label sequences. Loading is fail-fast: the first
//! malformed row aborts the whole load and no partial dataset is returned.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::errors::{Result, ShoppingError};
use crate::features::{encode_row, Label, RawRow, FEATURE_COUNT};

/// Encoded sessions: `features[i]` pairs with `labels[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<Label>,
    feature_count: usize,
}

impl Dataset {
    /// Build a dataset from already-encoded parts.
    pub fn from_parts(features: Vec<Vec<f64>>, labels: Vec<Label>) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(ShoppingError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }

        let feature_count = features.first().map_or(FEATURE_COUNT, Vec::len);
        if let Some(row) = features.iter().find(|row| row.len() != feature_count) {
            return Err(ShoppingError::DimensionMismatch {
                expected: feature_count,
                actual: row.len(),
            });
        }

        Ok(Self {
            features,
            labels,
            feature_count,
        })
    }

    /// Load sessions from a CSV file whose first line names the columns.
    /// Column order is irrelevant and extra columns are ignored.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ShoppingError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = CsvRow {
                columns: &columns,
                record: &record,
            };

            let (session, label) = encode_row(&row, idx + 1)?;
            features.push(session.to_features());
            labels.push(label);
        }

        tracing::debug!("Read {} rows from {}", features.len(), path.display());

        Ok(Self {
            features,
            labels,
            feature_count: FEATURE_COUNT,
        })
    }

    /// Copy out the rows at `indices`, in that order.
    /// Callers guarantee every index is in range.
    pub(crate) fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_count: self.feature_count,
        }
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Width of every feature row.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if dataset is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of rows labelled 1.
    pub fn positive_count(&self) -> usize {
        self.labels.iter().filter(|&&label| label == 1).count()
    }

    /// Per-feature (min, max) over all rows.
    pub fn feature_stats(&self) -> Vec<(f64, f64)> {
        let mut stats = vec![(f64::INFINITY, f64::NEG_INFINITY); self.feature_count];

        for row in &self.features {
            for (stat, &val) in stats.iter_mut().zip(row) {
                stat.0 = stat.0.min(val);
                stat.1 = stat.1.max(val);
            }
        }

        stats
    }
}

struct CsvRow<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a StringRecord,
}

impl RawRow for CsvRow<'_> {
    fn field(&self, column: &'static str) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|&idx| self.record.get(idx))
    }
}
