//! Upload status and dashboard phase, owned by the controller.

use crate::egui_app::events::{StatusMessage, StatusTone, UploadedFile};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Data uploaded successfully.";
pub const UPLOAD_MISSING_MESSAGE: &str = "No data uploaded.";

/// Whether the user has provided data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadStatus {
    pub uploaded: bool,
}

/// Where the page is in its upload/analyze cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing uploaded; analysis is gated off.
    #[default]
    Idle,
    /// Upload seen, no analysis since.
    Uploaded,
    /// Charts and prediction rendered.
    Analyzed,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Uploaded => "uploaded",
            Phase::Analyzed => "analyzed",
        }
    }
}

/// Session state threaded through every handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    upload: UploadStatus,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_status(&self) -> UploadStatus {
        self.upload
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when an analyze event is allowed to run.
    pub fn analysis_allowed(&self) -> bool {
        self.upload.uploaded
    }

    /// Store the status from an upload event and move to the matching phase.
    pub fn record_upload(&mut self, status: UploadStatus) {
        self.upload = status;
        self.phase = if status.uploaded {
            Phase::Uploaded
        } else {
            Phase::Idle
        };
    }

    pub fn record_analysis(&mut self) {
        if self.upload.uploaded {
            self.phase = Phase::Analyzed;
        }
    }
}

/// Status message and upload flag for an upload event.
///
/// Only presence matters; the payload is not inspected.
pub fn on_upload(contents: Option<&UploadedFile>) -> (StatusMessage, UploadStatus) {
    match contents {
        Some(_) => (
            StatusMessage {
                text: UPLOAD_SUCCESS_MESSAGE.to_string(),
                tone: StatusTone::Success,
            },
            UploadStatus { uploaded: true },
        ),
        None => (
            StatusMessage {
                text: UPLOAD_MISSING_MESSAGE.to_string(),
                tone: StatusTone::Error,
            },
            UploadStatus { uploaded: false },
        ),
    }
}
