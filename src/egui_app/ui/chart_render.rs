//! Figures for the three chart areas.
//!
//! Histogram and scatter go through `egui_plot`; the pie is painted by hand.

use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    self, Align2, Color32, FontId, Rect, RichText, Sense, Shape, Stroke, StrokeKind, Ui, Vec2,
};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use super::style;
use crate::charts::{Axis, ChartBody, ChartSpec, HistogramTrace, PieSlice, ScatterPoint};

const TITLE_HEIGHT: f32 = 28.0;
const LEGEND_WIDTH: f32 = 110.0;
const PIE_PAD: f32 = 12.0;
const POINT_RADIUS: f32 = 5.0;
/// Widest arc drawn as one convex polygon.
const MAX_WEDGE: f32 = FRAC_PI_2;

/// Draw one figure at its configured size, shrunk to the available width.
pub(super) fn render_chart(ui: &mut Ui, spec: &ChartSpec) {
    let width = (spec.size.width as f32).min(ui.available_width()).max(200.0);
    let height = (spec.size.height as f32 - TITLE_HEIGHT).max(120.0);
    ui.label(
        RichText::new(&spec.title)
            .size(17.0)
            .color(style::palette().text_primary),
    );
    match &spec.body {
        ChartBody::Histogram {
            x,
            y,
            bargap,
            traces,
            ..
        } => render_histogram(ui, spec, (width, height), (x, y), traces, *bargap),
        ChartBody::Scatter { x, y, points, .. } => {
            render_scatter(ui, spec, (width, height), (x, y), points)
        }
        ChartBody::Pie { slices, .. } => {
            let (response, painter) =
                ui.allocate_painter(egui::vec2(width, height), Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, style::palette().bg_page);
            let body = Rect::from_min_max(rect.min, rect.max - egui::vec2(LEGEND_WIDTH, 0.0));
            let legend = Rect::from_min_max(
                egui::pos2(body.max.x + PIE_PAD, body.min.y),
                rect.max,
            );
            let order = pie_order(slices);
            paint_pie(&painter, body, slices, &order);
            let labels: Vec<&str> = order.iter().map(|&i| slices[i].label.as_str()).collect();
            paint_legend(&painter, legend, &labels);
        }
    }
}

fn chart_plot(spec: &ChartSpec, size: (f32, f32), x: &Axis, y: &Axis) -> Plot<'static> {
    Plot::new(("chart", spec.title.clone()))
        .width(size.0)
        .height(size.1)
        .legend(Legend::default())
        .x_axis_label(x.title.clone())
        .y_axis_label(y.title.clone())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

fn render_histogram(
    ui: &mut Ui,
    spec: &ChartSpec,
    size: (f32, f32),
    (x, y): (&Axis, &Axis),
    traces: &[HistogramTrace],
    bargap: f32,
) {
    let charts = histogram_charts(traces, bargap);
    chart_plot(spec, size, x, y)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// One overlaid bar chart per trace, bars `1 - bargap` wide.
fn histogram_charts(traces: &[HistogramTrace], bargap: f32) -> Vec<BarChart> {
    let width = f64::from(1.0 - bargap);
    traces
        .iter()
        .enumerate()
        .map(|(index, trace)| {
            let fill = style::series_color(index);
            let bars = trace
                .bars
                .iter()
                .map(|bar| Bar::new(bar.x, bar.count as f64).width(width).fill(fill))
                .collect();
            BarChart::new(trace.group.clone(), bars).color(fill)
        })
        .collect()
}

fn render_scatter(
    ui: &mut Ui,
    spec: &ChartSpec,
    size: (f32, f32),
    (x, y): (&Axis, &Axis),
    points: &[ScatterPoint],
) {
    let groups = scatter_groups(points);
    chart_plot(spec, size, x, y).show(ui, |plot_ui| {
        for (index, (group, series)) in groups.into_iter().enumerate() {
            plot_ui.points(
                Points::new(group, series)
                    .color(style::series_color(index))
                    .radius(POINT_RADIUS),
            );
        }
    });
}

/// Points split by colour group, groups in order of first appearance.
fn scatter_groups(points: &[ScatterPoint]) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut groups: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for point in points {
        let xy = [point.x, point.y];
        match groups.iter_mut().find(|(group, _)| *group == point.group) {
            Some((_, series)) => series.push(xy),
            None => groups.push((point.group.clone(), vec![xy])),
        }
    }
    groups
}

fn paint_pie(painter: &egui::Painter, body: Rect, slices: &[PieSlice], order: &[usize]) {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 {
        return;
    }
    let center = body.center();
    let radius = (body.width().min(body.height()) * 0.5 - PIE_PAD).max(10.0);
    // Start at twelve o'clock and run clockwise.
    let mut start = -FRAC_PI_2;
    for (rank, &index) in order.iter().enumerate() {
        let slice = &slices[index];
        let share = slice.value as f32 / total as f32;
        let sweep = share * TAU;
        let fill = style::series_color(rank);
        for (from, to) in wedge_segments(start, sweep) {
            let mut points = vec![center];
            let steps = ((to - from) / 0.05).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let angle = from + (to - from) * step as f32 / steps as f32;
                points.push(center + radius * Vec2::angled(angle));
            }
            painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
        }
        let mid = start + sweep * 0.5;
        painter.text(
            center + radius * 0.6 * Vec2::angled(mid),
            Align2::CENTER_CENTER,
            format!("{:.0}%", share * 100.0),
            FontId::proportional(13.0),
            Color32::WHITE,
        );
        start += sweep;
    }
}

/// Draw order for pie slices: largest first, ties kept in data order.
fn pie_order(slices: &[PieSlice]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slices.len()).collect();
    order.sort_by(|&a, &b| slices[b].value.cmp(&slices[a].value));
    order
}

/// Break an arc into pieces no wider than a quarter turn so each stays convex.
fn wedge_segments(start: f32, sweep: f32) -> Vec<(f32, f32)> {
    let count = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let step = sweep / count as f32;
    (0..count)
        .map(|i| (start + step * i as f32, start + step * (i + 1) as f32))
        .collect()
}

fn paint_legend(painter: &egui::Painter, rect: Rect, labels: &[&str]) {
    let palette = style::palette();
    let mut cursor = rect.min + egui::vec2(0.0, PIE_PAD);
    for (index, label) in labels.iter().enumerate() {
        let swatch = Rect::from_min_size(cursor + egui::vec2(0.0, 2.0), egui::vec2(12.0, 12.0));
        painter.rect_filled(swatch, 0.0, style::series_color(index));
        painter.rect_stroke(swatch, 0.0, style::plot_border(), StrokeKind::Inside);
        painter.text(
            cursor + egui::vec2(18.0, 0.0),
            Align2::LEFT_TOP,
            *label,
            FontId::proportional(13.0),
            palette.text_primary,
        );
        cursor.y += 20.0;
    }
}
