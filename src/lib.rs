//! Library exports for reuse in benchmarks and tests.
/// Application directory helpers.
pub mod app_dirs;
/// Declarative chart specifications.
pub mod charts;
/// Persisted settings.
pub mod config;
/// The fixed sample records.
pub mod dataset;
/// Shared egui UI modules.
pub mod egui_app;
/// Feature encoding for the classifier.
pub mod encode;
/// Logging setup.
pub mod logging;
/// Random forest training and inference.
pub mod ml;
