use super::*;
use crate::charts::{ChartBody, ChartKind, HISTOGRAM_TITLE, PIE_TITLE, SCATTER_TITLE};
use crate::egui_app::events::{
    ChartOutput, PredictionOutput, StatusTone, UploadedFile, Update,
};
use crate::egui_app::session::{Phase, UPLOAD_MISSING_MESSAGE, UPLOAD_SUCCESS_MESSAGE};

fn upload() -> DashboardEvent {
    DashboardEvent::Upload(Some(UploadedFile {
        name: "patients.csv".into(),
        bytes: b"anything at all".to_vec(),
    }))
}

fn controller() -> EguiController {
    EguiController::new(AppSettings::default())
}

fn figure_kind(output: Option<&ChartOutput>) -> Option<(ChartKind, String)> {
    match output {
        Some(ChartOutput::Figure(spec)) => Some((spec.kind(), spec.title.clone())),
        _ => None,
    }
}

#[test]
fn page_opens_on_missing_upload_message() {
    let controller = controller();
    let status = controller.ui.status.as_ref().unwrap();
    assert_eq!(status.text, UPLOAD_MISSING_MESSAGE);
    assert_eq!(status.tone, StatusTone::Error);
    assert_eq!(controller.ui.phase, Phase::Idle);
    assert!(controller.ui.charts().iter().all(Option::is_none));
    assert!(controller.ui.prediction.is_none());
}

#[test]
fn analyze_before_upload_changes_nothing() {
    let mut controller = controller();
    let before = controller.ui.clone();
    let outputs = controller.dispatch(DashboardEvent::Analyze);
    assert!(outputs.is_unchanged());
    assert_eq!(controller.ui, before);
    assert_eq!(controller.session().phase(), Phase::Idle);
}

#[test]
fn upload_sets_status_only() {
    let mut controller = controller();
    let outputs = controller.dispatch(upload());
    let status = outputs.status.as_set().unwrap();
    assert_eq!(status.text, UPLOAD_SUCCESS_MESSAGE);
    assert_eq!(status.tone, StatusTone::Success);
    assert!(outputs.histogram.is_no_update());
    assert!(outputs.prediction.is_no_update());
    assert!(controller.session().upload_status().uploaded);
    assert_eq!(controller.ui.phase, Phase::Uploaded);
}

#[test]
fn analyze_after_upload_fills_every_area() {
    let mut controller = controller();
    controller.dispatch(upload());
    let outputs = controller.dispatch(DashboardEvent::Analyze);
    assert!(outputs.status.is_no_update());

    let [histogram, scatter, pie] = controller.ui.charts();
    assert_eq!(
        figure_kind(histogram),
        Some((ChartKind::Histogram, HISTOGRAM_TITLE.to_string()))
    );
    assert_eq!(
        figure_kind(scatter),
        Some((ChartKind::Scatter, SCATTER_TITLE.to_string()))
    );
    assert_eq!(figure_kind(pie), Some((ChartKind::Pie, PIE_TITLE.to_string())));

    let prediction = controller.ui.prediction.as_ref().unwrap();
    let text = prediction.text();
    assert!(matches!(prediction, PredictionOutput::Result(_)));
    assert!(text.starts_with("Prediction: "));
    assert!(text.contains("\n\nProbability of Asthma: "));
    assert!(text.ends_with('%'));
    assert_eq!(controller.ui.phase, Phase::Analyzed);
}

#[test]
fn repeated_analysis_is_identical() {
    let mut controller = controller();
    controller.dispatch(upload());
    let first = controller.dispatch(DashboardEvent::Analyze);
    let second = controller.dispatch(DashboardEvent::Analyze);
    assert_eq!(first, second);
}

#[test]
fn uploads_are_idempotent() {
    let mut controller = controller();
    let first = controller.dispatch(upload());
    let second = controller.dispatch(upload());
    assert_eq!(first, second);
    assert!(controller.session().analysis_allowed());
}

#[test]
fn clearing_upload_gates_analysis_but_keeps_old_results() {
    let mut controller = controller();
    controller.dispatch(upload());
    controller.dispatch(DashboardEvent::Analyze);
    let rendered = controller.ui.prediction.clone();

    controller.dispatch(DashboardEvent::Upload(None));
    assert_eq!(
        controller.ui.status.as_ref().map(|s| s.text.as_str()),
        Some(UPLOAD_MISSING_MESSAGE)
    );
    let outputs = controller.dispatch(DashboardEvent::Analyze);
    assert!(outputs.is_unchanged());
    assert_eq!(controller.ui.prediction, rendered);
    assert_eq!(controller.ui.phase, Phase::Idle);
}

#[test]
fn missing_label_shows_error_in_histogram_and_prediction() {
    let records = sample_records().without_label();
    let mut controller = EguiController::with_records(records, AppSettings::default());
    controller.dispatch(upload());
    let outputs = controller.dispatch(DashboardEvent::Analyze);

    let expected = "Error: 'Asthma' column not found in the dataset.";
    assert_eq!(missing_label_message(), expected);
    assert_eq!(
        outputs.histogram,
        Update::Set(ChartOutput::Error(expected.to_string()))
    );
    assert!(outputs.scatter.is_no_update());
    assert!(outputs.pie.is_no_update());
    assert_eq!(
        outputs.prediction,
        Update::Set(PredictionOutput::Error(expected.to_string()))
    );
    assert_eq!(controller.ui.phase, Phase::Analyzed);
}

#[test]
fn chart_size_follows_settings() {
    let mut settings = AppSettings::default();
    settings.charts.width = 640;
    settings.charts.height = 320;
    let mut controller = EguiController::new(settings);
    controller.dispatch(upload());
    controller.dispatch(DashboardEvent::Analyze);
    match controller.ui.histogram.as_ref() {
        Some(ChartOutput::Figure(spec)) => {
            assert_eq!((spec.size.width, spec.size.height), (640, 320));
        }
        other => panic!("expected a figure, got {other:?}"),
    }
}

#[test]
fn training_failure_is_shown_inline_and_contained() {
    let mut controller =
        EguiController::with_records(RecordSet::from_records(&[]), AppSettings::default());
    controller.dispatch(upload());
    let outputs = controller.dispatch(DashboardEvent::Analyze);

    assert_eq!(
        outputs.prediction,
        Update::Set(PredictionOutput::Error(
            "Error: cannot train on an empty dataset".to_string()
        ))
    );
    assert_eq!(
        controller.ui.prediction.as_ref().map(PredictionOutput::tone),
        Some(StatusTone::Error)
    );
    match controller.ui.histogram.as_ref() {
        Some(ChartOutput::Figure(spec)) => match &spec.body {
            ChartBody::Histogram { traces, .. } => assert!(traces.is_empty()),
            other => panic!("expected a histogram body, got {other:?}"),
        },
        other => panic!("expected a figure, got {other:?}"),
    }
    assert!(matches!(controller.ui.scatter, Some(ChartOutput::Figure(_))));
    assert!(matches!(controller.ui.pie, Some(ChartOutput::Figure(_))));
    assert_eq!(controller.ui.phase, Phase::Analyzed);

    // A later analysis still runs.
    assert_eq!(controller.dispatch(DashboardEvent::Analyze), outputs);
}
