#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based asthma dashboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use asthmadash::config;
use asthmadash::egui_app::ui::{APP_TITLE, EguiApp, MIN_VIEWPORT_SIZE};
use asthmadash::logging::{self, LogLevel};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let debug = debug_requested(std::env::args_os().skip(1));
    let level = if debug { LogLevel::Debug } else { LogLevel::Info };
    if let Err(err) = logging::init(level) {
        eprintln!("Logging disabled: {err}");
    }

    let settings = config::load_or_warn();
    tracing::info!(
        "Starting dashboard: {} trees, seed {}, charts {}x{}",
        settings.model.trees,
        settings.model.seed,
        settings.charts.width,
        settings.charts.height
    );

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([960.0, 900.0])
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(settings, debug)))),
    )?;
    Ok(())
}

/// True when `--debug` appears among the arguments.
fn debug_requested(args: impl IntoIterator<Item = std::ffi::OsString>) -> bool {
    args.into_iter().any(|arg| arg == "--debug")
}
