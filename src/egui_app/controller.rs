//! Controller that owns the session and turns events into page updates.

mod analysis;
mod upload;

#[cfg(test)]
mod tests;

use crate::config::AppSettings;
use crate::dataset::{RecordSet, sample_records};
use crate::egui_app::events::{DashboardEvent, Outputs};
use crate::egui_app::session::Session;
use crate::egui_app::state::UiState;

pub use analysis::missing_label_message;

/// Maintains dashboard state and bridges the analysis core to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    session: Session,
    records: RecordSet,
    settings: AppSettings,
}

impl EguiController {
    /// Controller over the built-in sample records.
    pub fn new(settings: AppSettings) -> Self {
        Self::with_records(sample_records(), settings)
    }

    /// Controller over an explicit record set.
    pub fn with_records(records: RecordSet, settings: AppSettings) -> Self {
        let mut controller = Self {
            ui: UiState::default(),
            session: Session::new(),
            records,
            settings,
        };
        // The upload control starts empty, so the page opens on the "no data" message.
        controller.dispatch(DashboardEvent::Upload(None));
        controller
    }

    /// Route one event to its handler and apply the result to the UI state.
    pub fn dispatch(&mut self, event: DashboardEvent) -> Outputs {
        let outputs = match event {
            DashboardEvent::Upload(contents) => self.handle_upload(contents),
            DashboardEvent::Analyze => self.handle_analyze(),
        };
        self.ui.apply(outputs.clone());
        self.ui.phase = self.session.phase();
        outputs
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }
}
