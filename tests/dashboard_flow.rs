mod support;

use support::config_env::ConfigEnvGuard;

use asthmadash::{
    app_dirs::APP_DIR_NAME,
    charts::{ChartBody, ChartKind},
    config::{self, AppSettings, CONFIG_FILE_NAME},
    egui_app::{
        controller::EguiController,
        events::{ChartOutput, DashboardEvent, PredictionOutput, UploadedFile},
        session::Phase,
    },
};
use tempfile::TempDir;

struct DashboardHarness {
    _config: ConfigEnvGuard,
    _temp: TempDir,
    pub controller: EguiController,
}

impl DashboardHarness {
    fn new() -> Self {
        Self::with_settings_file(None)
    }

    fn with_settings_file(contents: Option<&str>) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let config_home = temp.path().join("config");
        if let Some(contents) = contents {
            let dir = config_home.join(APP_DIR_NAME);
            std::fs::create_dir_all(&dir).expect("create app dir");
            std::fs::write(dir.join(CONFIG_FILE_NAME), contents).expect("write settings");
        }
        let guard = ConfigEnvGuard::set_config_home(config_home);
        let settings = config::load_or_warn();
        Self {
            _config: guard,
            _temp: temp,
            controller: EguiController::new(settings),
        }
    }

    fn upload(&mut self) {
        self.controller
            .dispatch(DashboardEvent::Upload(Some(UploadedFile {
                name: "patients.csv".into(),
                bytes: b"not,even,parsed".to_vec(),
            })));
    }
}

#[test]
fn upload_then_analyze_renders_charts_and_prediction() {
    let mut harness = DashboardHarness::new();
    assert_eq!(harness.controller.settings(), &AppSettings::default());
    harness.upload();
    harness.controller.dispatch(DashboardEvent::Analyze);

    let kinds: Vec<ChartKind> = harness
        .controller
        .ui
        .charts()
        .into_iter()
        .map(|chart| match chart {
            Some(ChartOutput::Figure(spec)) => spec.kind(),
            other => panic!("expected a figure, got {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![ChartKind::Histogram, ChartKind::Scatter, ChartKind::Pie]
    );

    match harness.controller.ui.pie.as_ref() {
        Some(ChartOutput::Figure(spec)) => match &spec.body {
            ChartBody::Pie { slices, .. } => {
                let counts: Vec<(&str, usize)> =
                    slices.iter().map(|s| (s.label.as_str(), s.value)).collect();
                assert_eq!(counts, vec![("No", 3), ("Yes", 2)]);
            }
            other => panic!("expected a pie body, got {other:?}"),
        },
        other => panic!("expected a pie figure, got {other:?}"),
    }

    let prediction = harness.controller.ui.prediction.as_ref().expect("prediction");
    assert!(matches!(prediction, PredictionOutput::Result(_)));
    let text = prediction.text();
    let (label_line, probability_line) = text.split_once("\n\n").expect("two paragraphs");
    assert!(
        label_line == "Prediction: Asthma" || label_line == "Prediction: No Asthma",
        "unexpected label line {label_line:?}"
    );
    let percent = probability_line
        .strip_prefix("Probability of Asthma: ")
        .and_then(|rest| rest.strip_suffix('%'))
        .expect("probability line");
    let (_, decimals) = percent.split_once('.').expect("two decimals");
    assert_eq!(decimals.len(), 2);
    assert_eq!(harness.controller.ui.phase, Phase::Analyzed);
}

#[test]
fn fresh_controllers_agree_on_prediction() {
    let mut first = DashboardHarness::new();
    first.upload();
    let first_outputs = first.controller.dispatch(DashboardEvent::Analyze);
    drop(first);

    let mut second = DashboardHarness::new();
    second.upload();
    let second_outputs = second.controller.dispatch(DashboardEvent::Analyze);
    assert_eq!(first_outputs, second_outputs);
}

#[test]
fn settings_file_drives_chart_size() {
    let mut harness = DashboardHarness::with_settings_file(Some(
        "[model]\ntrees = 10\n\n[charts]\nwidth = 500\nheight = 250\n",
    ));
    assert_eq!(harness.controller.settings().model.trees, 10);
    assert_eq!(harness.controller.settings().model.seed, 42);
    harness.upload();
    harness.controller.dispatch(DashboardEvent::Analyze);
    match harness.controller.ui.scatter.as_ref() {
        Some(ChartOutput::Figure(spec)) => {
            assert_eq!((spec.size.width, spec.size.height), (500, 250));
        }
        other => panic!("expected a figure, got {other:?}"),
    }
}

#[test]
fn broken_settings_fall_back_to_defaults() {
    let harness = DashboardHarness::with_settings_file(Some("[model\ntrees = ="));
    assert_eq!(harness.controller.settings(), &AppSettings::default());
}
