use super::*;
use crate::egui_app::events::{UploadedFile, Update};
use crate::egui_app::session;

impl EguiController {
    /// Record upload presence; the contents are never ingested.
    pub(super) fn handle_upload(&mut self, contents: Option<UploadedFile>) -> Outputs {
        match &contents {
            Some(file) => tracing::info!(
                "Upload received: {} ({} bytes); analysis keeps using the built-in records",
                file.name,
                file.bytes.len()
            ),
            None => tracing::debug!("Upload control has no content"),
        }
        let (message, status) = session::on_upload(contents.as_ref());
        self.session.record_upload(status);
        Outputs {
            status: Update::Set(message),
            ..Outputs::unchanged()
        }
    }
}
