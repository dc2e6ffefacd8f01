//! Declarative chart specifications built from the raw record set.
//!
//! Specs describe what to draw (kind, axes, colour grouping, data, title,
//! size, theme); the egui renderer decides how. Building is a pure function
//! of the records.

use serde::Serialize;
use thiserror::Error;

use crate::dataset::{AGE_COLUMN, LABEL_COLUMN, RecordSet, SMOKING_COLUMN};

pub const HISTOGRAM_TITLE: &str = "Asthma Histogram";
pub const SCATTER_TITLE: &str = "Scatter Plot";
pub const PIE_TITLE: &str = "Smoking Distribution";
const HISTOGRAM_BARGAP: f32 = 0.1;

/// Errors raised while building chart specs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("'{0}' column not found in the dataset")]
    MissingColumn(&'static str),
}

/// Figure size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

/// Visual template. Only the light default template is used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Plotly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Overlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Scatter,
    Pie,
}

/// Binding of a chart axis to a record column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    /// Column the axis reads; `None` for derived axes such as counts.
    pub field: Option<String>,
    pub title: String,
}

impl Axis {
    fn column(field: &str) -> Self {
        Self {
            field: Some(field.to_string()),
            title: field.to_string(),
        }
    }

    fn derived(title: &str) -> Self {
        Self {
            field: None,
            title: title.to_string(),
        }
    }
}

/// One colour group of a histogram: bar heights per x value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramTrace {
    pub group: String,
    pub bars: Vec<HistogramBar>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBar {
    pub x: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub group: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

/// Kind-specific chart content.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartBody {
    Histogram {
        x: Axis,
        y: Axis,
        color: String,
        bargap: f32,
        barmode: BarMode,
        traces: Vec<HistogramTrace>,
    },
    Scatter {
        x: Axis,
        y: Axis,
        color: String,
        points: Vec<ScatterPoint>,
    },
    Pie {
        names: String,
        slices: Vec<PieSlice>,
    },
}

/// A complete figure description.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub size: ChartSize,
    pub theme: Theme,
    pub body: ChartBody,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.body {
            ChartBody::Histogram { .. } => ChartKind::Histogram,
            ChartBody::Scatter { .. } => ChartKind::Scatter,
            ChartBody::Pie { .. } => ChartKind::Pie,
        }
    }

    /// Pretty JSON for copying a figure out of the dashboard.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The three figures shown after an analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSet {
    pub histogram: ChartSpec,
    pub scatter: ChartSpec,
    pub pie: ChartSpec,
}

/// Build all three charts.
pub fn build_charts(records: &RecordSet, size: ChartSize) -> Result<ChartSet, ChartError> {
    Ok(ChartSet {
        histogram: histogram(records, size)?,
        scatter: scatter(records, size)?,
        pie: pie(records, size),
    })
}

/// Counts of each label value, one trace per value.
pub fn histogram(records: &RecordSet, size: ChartSize) -> Result<ChartSpec, ChartError> {
    let labels = records
        .asthma()
        .ok_or(ChartError::MissingColumn(LABEL_COLUMN))?;
    let traces = first_seen_counts(labels.iter().copied())
        .into_iter()
        .map(|(value, count)| HistogramTrace {
            group: value.to_string(),
            bars: vec![HistogramBar {
                x: f64::from(value),
                count,
            }],
        })
        .collect();
    Ok(ChartSpec {
        title: HISTOGRAM_TITLE.to_string(),
        size,
        theme: Theme::Plotly,
        body: ChartBody::Histogram {
            x: Axis::column(LABEL_COLUMN),
            y: Axis::derived("Count"),
            color: LABEL_COLUMN.to_string(),
            bargap: HISTOGRAM_BARGAP,
            barmode: BarMode::Overlay,
            traces,
        },
    })
}

/// Age against label, coloured by label.
pub fn scatter(records: &RecordSet, size: ChartSize) -> Result<ChartSpec, ChartError> {
    let rows = records
        .rows()
        .ok_or(ChartError::MissingColumn(LABEL_COLUMN))?;
    let points = rows
        .map(|row| ScatterPoint {
            x: f64::from(row.age),
            y: f64::from(row.asthma),
            group: row.asthma.to_string(),
        })
        .collect();
    Ok(ChartSpec {
        title: SCATTER_TITLE.to_string(),
        size,
        theme: Theme::Plotly,
        body: ChartBody::Scatter {
            x: Axis::column(AGE_COLUMN),
            y: Axis::column(LABEL_COLUMN),
            color: LABEL_COLUMN.to_string(),
            points,
        },
    })
}

/// Share of each smoking category.
pub fn pie(records: &RecordSet, size: ChartSize) -> ChartSpec {
    let slices = first_seen_counts(records.smoking().iter().map(|s| s.as_str()))
        .into_iter()
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
        })
        .collect();
    ChartSpec {
        title: PIE_TITLE.to_string(),
        size,
        theme: Theme::Plotly,
        body: ChartBody::Pie {
            names: SMOKING_COLUMN.to_string(),
            slices,
        },
    }
}

/// Count occurrences, keeping values in order of first appearance.
fn first_seen_counts<T: PartialEq>(values: impl Iterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}
