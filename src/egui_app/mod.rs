//! egui front end for the dashboard.

/// Maintains session and UI state and routes events to handlers.
pub mod controller;
/// Event and output types exchanged between the page and the controller.
pub mod events;
/// Upload status and phase tracking.
pub mod session;
/// UI model consumed by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
