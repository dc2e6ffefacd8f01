//! Turns the record set into a numeric feature matrix and label vector.

use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

use crate::dataset::{AGE_COLUMN, LABEL_COLUMN, RecordSet, SMOKING_COLUMN};

/// Errors raised while encoding records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The label column is absent from the record set.
    #[error("'{0}' column not found in the dataset")]
    MissingLabel(&'static str),
}

/// Class indices aligned with the feature matrix rows.
pub type LabelVector = Array1<usize>;

/// Dense numeric features with named columns.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(self.values.column(index))
    }

    /// Lay out a named point in this matrix's column order.
    ///
    /// Columns the point does not mention are `0.0`; names the matrix does
    /// not know are ignored.
    pub fn align(&self, point: &[(&str, f64)]) -> Array1<f64> {
        self.columns
            .iter()
            .map(|column| {
                point
                    .iter()
                    .find(|(name, _)| name == column)
                    .map_or(0.0, |(_, value)| *value)
            })
            .collect()
    }
}

/// Drop the label, keep numeric columns and one-hot encode categories.
pub fn encode(records: &RecordSet) -> Result<(FeatureMatrix, LabelVector), EncodeError> {
    let labels = records
        .asthma()
        .ok_or(EncodeError::MissingLabel(LABEL_COLUMN))?;

    let mut columns = vec![(
        AGE_COLUMN.to_string(),
        records.ages().iter().map(|&age| f64::from(age)).collect::<Vec<_>>(),
    )];
    let smoking: Vec<&str> = records.smoking().iter().map(|s| s.as_str()).collect();
    columns.extend(one_hot_drop_first(SMOKING_COLUMN, &smoking));

    let n_rows = records.len();
    let mut values = Array2::<f64>::zeros((n_rows, columns.len()));
    for (index, (_, data)) in columns.iter().enumerate() {
        values.column_mut(index).assign(&ArrayView1::from(data.as_slice()));
    }
    let features = FeatureMatrix {
        columns: columns.into_iter().map(|(name, _)| name).collect(),
        values,
    };
    let labels = labels.iter().map(|&label| usize::from(label)).collect();
    Ok((features, labels))
}

/// Indicator columns for every observed level except the lexically first.
fn one_hot_drop_first(name: &str, values: &[&str]) -> Vec<(String, Vec<f64>)> {
    let mut levels: Vec<&str> = values.to_vec();
    levels.sort_unstable();
    levels.dedup();
    levels
        .into_iter()
        .skip(1)
        .map(|level| {
            let indicator = values
                .iter()
                .map(|value| if *value == level { 1.0 } else { 0.0 })
                .collect();
            (format!("{name}_{level}"), indicator)
        })
        .collect()
}
