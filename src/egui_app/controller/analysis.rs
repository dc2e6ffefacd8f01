use super::*;
use crate::charts::{self, ChartSet};
use crate::dataset::LABEL_COLUMN;
use crate::egui_app::events::{ChartOutput, PredictionOutput, Update};
use crate::encode::{EncodeError, encode};
use crate::ml::{
    Evaluation, PROBE_POINT, Prediction, TrainError, train_eval, train_full_and_predict_one,
};

/// Failures contained to a single analyze event.
#[derive(Debug, thiserror::Error)]
enum AnalysisError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Train(#[from] TrainError),
}

/// Inline text shown when the records lack the label column.
pub fn missing_label_message() -> String {
    format!("Error: {}.", EncodeError::MissingLabel(LABEL_COLUMN))
}

type ChartUpdates = (Update<ChartOutput>, Update<ChartOutput>, Update<ChartOutput>);

impl EguiController {
    /// Rebuild charts and prediction, or do nothing before an upload.
    pub(super) fn handle_analyze(&mut self) -> Outputs {
        if !self.session.analysis_allowed() {
            tracing::debug!("Analyze ignored: no data uploaded");
            return Outputs::unchanged();
        }
        if self.records.is_empty() {
            tracing::warn!("Analyzing an empty record set");
        }
        let (histogram, scatter, pie) = self.chart_outputs();
        let prediction = self.prediction_output();
        self.session.record_analysis();
        Outputs {
            status: Update::NoUpdate,
            histogram,
            scatter,
            pie,
            prediction,
        }
    }

    fn chart_outputs(&self) -> ChartUpdates {
        if !self.records.has_column(LABEL_COLUMN) {
            tracing::warn!("Charts skipped: '{LABEL_COLUMN}' column missing");
            return (
                Update::Set(ChartOutput::Error(missing_label_message())),
                Update::NoUpdate,
                Update::NoUpdate,
            );
        }
        match self.run_evaluation() {
            Ok(evaluation) => tracing::debug!(
                "Held-out evaluation: {} rows, predictions {:?}, accuracy {:.2}; \
                 {} trees, avg depth {:.2}, avg leaves {:.2}",
                evaluation.test_rows.len(),
                evaluation.predictions,
                evaluation.accuracy,
                evaluation.trees,
                evaluation.avg_depth,
                evaluation.avg_leaves
            ),
            Err(err) => tracing::warn!("Held-out evaluation failed: {err}"),
        }
        match charts::build_charts(&self.records, self.settings.charts.size()) {
            Ok(ChartSet {
                histogram,
                scatter,
                pie,
            }) => (
                Update::Set(ChartOutput::Figure(histogram)),
                Update::Set(ChartOutput::Figure(scatter)),
                Update::Set(ChartOutput::Figure(pie)),
            ),
            Err(err) => {
                tracing::error!("Chart build failed: {err}");
                (
                    Update::Set(ChartOutput::Error(format!("Error: {err}."))),
                    Update::NoUpdate,
                    Update::NoUpdate,
                )
            }
        }
    }

    /// Held-out predictions are computed for the log only; the page never shows them.
    fn run_evaluation(&self) -> Result<Evaluation, AnalysisError> {
        let (features, labels) = encode(&self.records)?;
        let model = &self.settings.model;
        Ok(train_eval(
            &features,
            &labels,
            model.test_fraction,
            &model.forest_params(),
        )?)
    }

    fn prediction_output(&self) -> Update<PredictionOutput> {
        match self.predict() {
            Ok(prediction) => {
                tracing::info!(
                    "Prediction: {} ({})",
                    prediction.label,
                    prediction.percentage()
                );
                Update::Set(PredictionOutput::Result(prediction))
            }
            Err(AnalysisError::Encode(EncodeError::MissingLabel(column))) => {
                tracing::warn!("Prediction skipped: '{column}' column missing");
                Update::Set(PredictionOutput::Error(missing_label_message()))
            }
            Err(err) => {
                tracing::error!("Prediction failed: {err}");
                Update::Set(PredictionOutput::Error(format!("Error: {err}")))
            }
        }
    }

    fn predict(&self) -> Result<Prediction, AnalysisError> {
        let (features, labels) = encode(&self.records)?;
        Ok(train_full_and_predict_one(
            &features,
            &labels,
            &PROBE_POINT,
            &self.settings.model.forest_params(),
        )?)
    }
}
