//! egui renderer for the dashboard page.

mod chart_render;
pub mod style;

use std::path::PathBuf;

use eframe::egui::{self, Frame, Margin, RichText, Ui};

use crate::config::AppSettings;
use crate::egui_app::controller::EguiController;
use crate::egui_app::events::{ChartOutput, DashboardEvent, StatusTone, UploadedFile};

/// Window title and page heading.
pub const APP_TITLE: &str = "Asthma Prediction Dashboard";
/// Smallest window the page lays out in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 520.0);
const EMPTY_CHART_HEIGHT: f32 = 48.0;

/// Blocks of the page, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    /// Heading, upload control, status line and Analyze button.
    Controls,
    Prediction,
    Charts,
}

const PAGE_ORDER: [Section; 3] = [Section::Controls, Section::Prediction, Section::Charts];

/// Renders the dashboard using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    debug: bool,
}

impl EguiApp {
    /// Create the app; `debug` adds a footer with the session phase.
    pub fn new(settings: AppSettings, debug: bool) -> Self {
        Self {
            controller: EguiController::new(settings),
            visuals_set: false,
            debug,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped_files.into_iter().next() else {
            return;
        };
        let upload = match (file.bytes, file.path) {
            (Some(bytes), path) => Some(UploadedFile {
                name: display_name(&file.name, path.as_ref()),
                bytes: bytes.to_vec(),
            }),
            (None, Some(path)) => read_upload(path),
            (None, None) => {
                tracing::warn!("Dropped item '{}' had neither bytes nor a path", file.name);
                None
            }
        };
        self.controller.dispatch(DashboardEvent::Upload(upload));
    }

    fn pick_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new().set_title("Upload Data").pick_file() else {
            return;
        };
        let upload = read_upload(path);
        self.controller.dispatch(DashboardEvent::Upload(upload));
    }

    fn render_header(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(APP_TITLE).size(26.0).strong());
        });
        ui.add_space(12.0);
        Frame::new()
            .stroke(style::plot_border())
            .corner_radius(5.0)
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label("Drag and Drop or");
                    if ui.button("Upload Data").clicked() {
                        self.pick_upload();
                    }
                });
            });
        ui.add_space(8.0);
        if let Some(status) = &self.controller.ui.status {
            ui.label(RichText::new(&status.text).color(style::status_color(status.tone)));
        }
        ui.add_space(8.0);
        if ui.button("Analyze").clicked() {
            self.controller.dispatch(DashboardEvent::Analyze);
        }
    }

    fn render_charts(&mut self, ui: &mut Ui) {
        let charts: Vec<Option<ChartOutput>> = self
            .controller
            .ui
            .charts()
            .into_iter()
            .map(|chart| chart.cloned())
            .collect();
        for (index, chart) in charts.iter().enumerate() {
            ui.push_id(("chart", index), |ui| render_chart_area(ui, chart.as_ref()));
            ui.add_space(8.0);
        }
    }

    fn render_prediction(&mut self, ui: &mut Ui) {
        if let Some(prediction) = &self.controller.ui.prediction {
            ui.label(
                RichText::new(prediction.text())
                    .size(16.0)
                    .color(style::status_color(prediction.tone())),
            );
        }
    }

    fn render_debug_footer(&mut self, ctx: &egui::Context) {
        if !self.debug {
            return;
        }
        egui::TopBottomPanel::bottom("debug_footer").show(ctx, |ui| {
            let session = self.controller.session();
            ui.label(
                RichText::new(format!(
                    "phase: {} | uploaded: {}",
                    self.controller.ui.phase.label(),
                    session.upload_status().uploaded
                ))
                .monospace()
                .color(style::palette().text_muted),
            );
        });
    }
}

fn render_chart_area(ui: &mut Ui, chart: Option<&ChartOutput>) {
    match chart {
        None => {
            ui.allocate_space(egui::vec2(ui.available_width(), EMPTY_CHART_HEIGHT));
        }
        Some(ChartOutput::Error(message)) => {
            ui.label(RichText::new(message).color(style::status_color(StatusTone::Error)));
        }
        Some(ChartOutput::Figure(spec)) => {
            chart_render::render_chart(ui, spec);
            ui.horizontal(|ui| {
                if ui.small_button("Copy JSON").clicked() {
                    match spec.to_json() {
                        Ok(json) => ui.ctx().copy_text(json),
                        Err(err) => tracing::warn!("Failed to serialize '{}': {err}", spec.title),
                    }
                }
            });
        }
    }
}

/// Read a picked or dropped file; unreadable files count as no content.
fn read_upload(path: PathBuf) -> Option<UploadedFile> {
    match std::fs::read(&path) {
        Ok(bytes) => Some(UploadedFile {
            name: display_name("", Some(&path)),
            bytes,
        }),
        Err(err) => {
            tracing::warn!("Failed to read upload {}: {err}", path.display());
            None
        }
    }
}

fn display_name(name: &str, path: Option<&PathBuf>) -> String {
    if !name.is_empty() {
        return name.to_string();
    }
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.handle_dropped_files(ctx);
        self.render_debug_footer(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for section in PAGE_ORDER {
                        match section {
                            Section::Controls => self.render_header(ui),
                            Section::Prediction => self.render_prediction(ui),
                            Section::Charts => self.render_charts(ui),
                        }
                        ui.add_space(12.0);
                    }
                });
        });
    }
}
