use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius};

use crate::egui_app::events::StatusTone;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_page: Color32,
    pub bg_plot: Color32,
    pub panel_outline: Color32,
    pub grid: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub success: Color32,
    pub error: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_page: Color32::WHITE,
        bg_plot: Color32::from_rgb(229, 236, 246),
        panel_outline: Color32::from_rgb(200, 206, 214),
        grid: Color32::WHITE,
        text_primary: Color32::from_rgb(42, 63, 95),
        text_muted: Color32::from_rgb(110, 120, 135),
        success: Color32::from_rgb(0, 128, 0),
        error: Color32::from_rgb(220, 0, 0),
    }
}

/// Trace colours in the order the light chart template assigns them.
const SERIES: [Color32; 6] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
];

pub fn series_color(index: usize) -> Color32 {
    SERIES[index % SERIES.len()]
}

pub fn status_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Info => palette.text_primary,
        StatusTone::Success => palette.success,
        StatusTone::Error => palette.error,
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_page;
    visuals.panel_fill = palette.bg_page;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.error_fg_color = palette.error;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
    visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
    visuals.widgets.active.corner_radius = CornerRadius::same(4);
}

pub fn plot_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}
