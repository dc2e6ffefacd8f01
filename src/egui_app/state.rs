//! UI model consumed by the egui renderer.

use crate::egui_app::events::{ChartOutput, Outputs, PredictionOutput, StatusMessage};
use crate::egui_app::session::Phase;

/// Everything the page draws; `None` areas render empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    pub status: Option<StatusMessage>,
    pub prediction: Option<PredictionOutput>,
    pub histogram: Option<ChartOutput>,
    pub scatter: Option<ChartOutput>,
    pub pie: Option<ChartOutput>,
    /// Mirrors the session phase for the debug footer.
    pub phase: Phase,
}

impl UiState {
    /// Apply handler outputs; `NoUpdate` slots keep their current value.
    pub fn apply(&mut self, outputs: Outputs) {
        outputs.status.apply_to(&mut self.status);
        outputs.prediction.apply_to(&mut self.prediction);
        outputs.histogram.apply_to(&mut self.histogram);
        outputs.scatter.apply_to(&mut self.scatter);
        outputs.pie.apply_to(&mut self.pie);
    }

    /// The three chart areas in page order.
    pub fn charts(&self) -> [Option<&ChartOutput>; 3] {
        [
            self.histogram.as_ref(),
            self.scatter.as_ref(),
            self.pie.as_ref(),
        ]
    }
}
