//! The two training paths run on every analysis.
//!
//! `train_eval` scores the forest on a held-out split; `train_full_and_predict_one`
//! fits on every row and classifies a single point.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};

use super::TrainError;
use super::forest::{ForestParams, RandomForest};
use super::metrics::{ConfusionMatrix, accuracy};
use super::split::train_test_split;
use crate::encode::{FeatureMatrix, LabelVector};

/// The label is binary: `0` no asthma, `1` asthma.
pub const BINARY_CLASSES: usize = 2;
const POSITIVE_CLASS: usize = 1;

/// Synthetic input classified by the live prediction.
pub const PROBE_POINT: [(&str, f64); 2] = [("Age", 28.0), ("Smoking_Yes", 1.0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionLabel {
    Asthma,
    NoAsthma,
}

impl PredictionLabel {
    fn from_class(class: usize) -> Self {
        if class == POSITIVE_CLASS {
            PredictionLabel::Asthma
        } else {
            PredictionLabel::NoAsthma
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PredictionLabel::Asthma => "Asthma",
            PredictionLabel::NoAsthma => "No Asthma",
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the live prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: PredictionLabel,
    /// Forest probability of the positive class, in `[0, 1]`.
    pub probability_of_positive: f64,
}

impl Prediction {
    /// Probability as a percentage with two decimals, e.g. `"63.00%"`.
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.probability_of_positive * 100.0)
    }

    /// Two-paragraph text shown in the prediction area.
    pub fn summary(&self) -> String {
        format!(
            "Prediction: {}\n\nProbability of Asthma: {}",
            self.label,
            self.percentage()
        )
    }
}

/// Held-out predictions from the evaluation path.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub test_rows: Vec<usize>,
    pub predictions: Vec<usize>,
    pub accuracy: f32,
    /// Shape of the forest fitted on the training rows.
    pub trees: usize,
    pub avg_depth: f64,
    pub avg_leaves: f64,
}

/// Split, fit on the training rows and predict the held-out rows.
pub fn train_eval(
    features: &FeatureMatrix,
    labels: &LabelVector,
    test_fraction: f64,
    params: &ForestParams,
) -> Result<Evaluation, TrainError> {
    check_shapes(features, labels)?;
    let mut rng = StdRng::seed_from_u64(params.seed);
    let split = train_test_split(features.n_rows(), test_fraction, &mut rng)?;

    let x = features.values();
    let x_train = x.select(ndarray::Axis(0), &split.train);
    let y_train = labels.select(ndarray::Axis(0), &split.train);
    let forest = RandomForest::fit(x_train.view(), y_train.view(), BINARY_CLASSES, params)?;

    let x_test = x.select(ndarray::Axis(0), &split.test);
    let predictions = forest.predict_batch(x_test.view());
    let truth: Vec<usize> = split.test.iter().map(|&row| labels[row]).collect();
    let cm = ConfusionMatrix::from_predictions(&truth, &predictions, BINARY_CLASSES);
    Ok(Evaluation {
        test_rows: split.test,
        predictions,
        accuracy: accuracy(&cm),
        trees: forest.n_trees(),
        avg_depth: forest.avg_depth(),
        avg_leaves: forest.avg_leaves(),
    })
}

/// Fit on every row and classify one named point.
pub fn train_full_and_predict_one(
    features: &FeatureMatrix,
    labels: &LabelVector,
    point: &[(&str, f64)],
    params: &ForestParams,
) -> Result<Prediction, TrainError> {
    check_shapes(features, labels)?;
    let forest = RandomForest::fit(
        features.values().view(),
        labels.view(),
        BINARY_CLASSES,
        params,
    )?;
    let row = features.align(point);
    forest.check_point(row.view())?;
    let proba = forest.predict_proba(row.view());
    Ok(Prediction {
        label: PredictionLabel::from_class(forest.predict(row.view())),
        probability_of_positive: proba[POSITIVE_CLASS],
    })
}

fn check_shapes(features: &FeatureMatrix, labels: &LabelVector) -> Result<(), TrainError> {
    if features.n_rows() == 0 {
        return Err(TrainError::EmptyDataset);
    }
    if features.n_rows() != labels.len() {
        return Err(TrainError::LengthMismatch {
            features: features.n_rows(),
            labels: labels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_records;
    use crate::encode::encode;

    fn encoded() -> (FeatureMatrix, LabelVector) {
        encode(&sample_records()).unwrap()
    }

    #[test]
    fn live_prediction_is_reproducible() {
        let (x, y) = encoded();
        let params = ForestParams::default();
        let first = train_full_and_predict_one(&x, &y, &PROBE_POINT, &params).unwrap();
        let second = train_full_and_predict_one(&x, &y, &PROBE_POINT, &params).unwrap();
        assert_eq!(first.label, second.label);
        assert!((first.probability_of_positive - second.probability_of_positive).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&first.probability_of_positive));
    }

    #[test]
    fn label_agrees_with_probability() {
        let (x, y) = encoded();
        let prediction =
            train_full_and_predict_one(&x, &y, &PROBE_POINT, &ForestParams::default()).unwrap();
        let expected = if prediction.probability_of_positive > 0.5 {
            PredictionLabel::Asthma
        } else {
            PredictionLabel::NoAsthma
        };
        assert_eq!(prediction.label, expected);
    }

    #[test]
    fn evaluation_predicts_one_held_out_row() {
        let (x, y) = encoded();
        let params = ForestParams::default();
        let eval = train_eval(&x, &y, 0.2, &params).unwrap();
        assert_eq!(eval.test_rows.len(), 1);
        assert_eq!(eval.predictions.len(), 1);
        assert!(eval.predictions[0] < BINARY_CLASSES);
        assert_eq!(eval.trees, 100);
        assert!(eval.avg_leaves >= 1.0);
        assert_eq!(eval, train_eval(&x, &y, 0.2, &params).unwrap());
    }

    #[test]
    fn summary_formats_label_and_percentage() {
        let prediction = Prediction {
            label: PredictionLabel::Asthma,
            probability_of_positive: 0.6312,
        };
        assert_eq!(prediction.percentage(), "63.12%");
        assert_eq!(
            prediction.summary(),
            "Prediction: Asthma\n\nProbability of Asthma: 63.12%"
        );
        let negative = Prediction {
            label: PredictionLabel::NoAsthma,
            probability_of_positive: 0.0,
        };
        assert!(negative.summary().starts_with("Prediction: No Asthma"));
        assert!(negative.summary().ends_with("0.00%"));
    }

    #[test]
    fn invalid_fraction_surfaces_as_error() {
        let (x, y) = encoded();
        assert_eq!(
            train_eval(&x, &y, 0.0, &ForestParams::default()).unwrap_err(),
            TrainError::InvalidTestFraction(0.0)
        );
    }
}
