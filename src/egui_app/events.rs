//! Typed events the page emits and the outputs each handler produces.

use crate::charts::ChartSpec;
use crate::ml::Prediction;

/// A file handed to the upload control. Its bytes are never parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// User actions routed to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    /// Upload control changed; `None` means no content.
    Upload(Option<UploadedFile>),
    /// The Analyze button was pressed.
    Analyze,
}

/// Per-output result: leave the current value alone or replace it.
#[derive(Clone, Debug, PartialEq)]
pub enum Update<T> {
    NoUpdate,
    Set(T),
}

impl<T> Default for Update<T> {
    fn default() -> Self {
        Update::NoUpdate
    }
}

impl<T> Update<T> {
    pub fn is_no_update(&self) -> bool {
        matches!(self, Update::NoUpdate)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            Update::Set(value) => Some(value),
            Update::NoUpdate => None,
        }
    }

    /// Write a `Set` value into `slot`; `NoUpdate` leaves it untouched.
    pub fn apply_to(self, slot: &mut Option<T>) {
        if let Update::Set(value) = self {
            *slot = Some(value);
        }
    }
}

/// Colour role of a status or result line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

/// Status line text with its colour tone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: StatusTone,
}

/// What a chart area shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartOutput {
    Figure(ChartSpec),
    Error(String),
}

/// What the prediction area shows.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionOutput {
    Result(Prediction),
    Error(String),
}

impl PredictionOutput {
    pub fn text(&self) -> String {
        match self {
            PredictionOutput::Result(prediction) => prediction.summary(),
            PredictionOutput::Error(message) => message.clone(),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            PredictionOutput::Result(_) => StatusTone::Info,
            PredictionOutput::Error(_) => StatusTone::Error,
        }
    }
}

/// Everything one event handler wants changed on the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs {
    pub status: Update<StatusMessage>,
    pub histogram: Update<ChartOutput>,
    pub scatter: Update<ChartOutput>,
    pub pie: Update<ChartOutput>,
    pub prediction: Update<PredictionOutput>,
}

impl Outputs {
    /// An outcome that changes nothing.
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn is_unchanged(&self) -> bool {
        self.status.is_no_update()
            && self.histogram.is_no_update()
            && self.scatter.is_no_update()
            && self.pie.is_no_update()
            && self.prediction.is_no_update()
    }
}
