use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
};

use catalog_dashboard::data::stats::BoxSummary;

use crate::color::{generate_palette, heat_color, series_color};

const PLOT_HEIGHT: f32 = 280.0;

/// Axis formatter that prints `labels[i]` at integer position `i`.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn empty_notice(ui: &mut Ui) {
    ui.label(RichText::new("No data for this filter selection.").weak());
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Vertical bars, one per `(label, count)`, labels on the x axis.
pub fn bar_chart(ui: &mut Ui, id: &str, counts: &[(String, usize)], y_label: &str) {
    if counts.is_empty() {
        empty_notice(ui);
        return;
    }
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).name(label))
        .collect();
    let labels: Vec<String> = counts.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .y_axis_label(y_label)
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(series_color(0, 1)).width(0.7));
        });
}

/// Horizontal top-N bars, highest at the top.
pub fn ranking_chart(ui: &mut Ui, id: &str, counts: &[(String, usize)], x_label: &str) {
    if counts.is_empty() {
        empty_notice(ui);
        return;
    }
    let n = counts.len();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new((n - 1 - i) as f64, *count as f64).name(label))
        .collect();
    let labels: Vec<String> = counts.iter().rev().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(series_color(2, 5))
                    .width(0.7),
            );
        });
}

// ---------------------------------------------------------------------------
// Line charts
// ---------------------------------------------------------------------------

/// One line per named series of `[x, y]` points.
pub fn line_chart(
    ui: &mut Ui,
    id: &str,
    series: &[(String, Vec<[f64; 2]>)],
    x_label: &str,
    y_label: &str,
) {
    if series.iter().all(|(_, points)| points.is_empty()) {
        empty_notice(ui);
        return;
    }
    let colors = generate_palette(series.len());
    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for ((name, points), &color) in series.iter().zip(&colors) {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

/// One box per group, outliers drawn as points.
pub fn box_chart(ui: &mut Ui, id: &str, groups: &[(String, Option<BoxSummary>)], y_label: &str) {
    if groups.iter().all(|(_, s)| s.is_none()) {
        empty_notice(ui);
        return;
    }
    let labels: Vec<String> = groups.iter().map(|(l, _)| l.clone()).collect();
    let n = groups.len();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .y_axis_label(y_label)
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (label, summary)) in groups.iter().enumerate() {
                let Some(s) = summary else {
                    continue;
                };
                let x = i as f64;
                let color = series_color(i, n);
                let spread =
                    BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker);
                let elem = BoxElem::new(x, spread).name(label).box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(label).color(color));

                if !s.outliers.is_empty() {
                    let points: PlotPoints = s.outliers.iter().map(|&y| [x, y]).collect();
                    plot_ui.points(Points::new(points).color(color).radius(2.0));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmaps and tables
// ---------------------------------------------------------------------------

/// Coloured count grid. `rows[i]` pairs with `counts[i]`.
pub fn heat_grid(
    ui: &mut Ui,
    id: &str,
    rows: &[String],
    columns: &[String],
    counts: &[Vec<usize>],
    max: usize,
) {
    if rows.is_empty() || columns.is_empty() {
        empty_notice(ui);
        return;
    }
    ScrollArea::horizontal().id_salt(format!("{id}_scroll")).show(ui, |ui: &mut Ui| {
        egui::Grid::new(id).spacing([2.0, 2.0]).show(ui, |ui: &mut Ui| {
            ui.label("");
            for column in columns {
                ui.label(RichText::new(column).small());
            }
            ui.end_row();

            for (label, row) in rows.iter().zip(counts) {
                ui.label(RichText::new(label).strong());
                for &count in row {
                    let text = RichText::new(format!("{count:>4}"))
                        .monospace()
                        .color(Color32::WHITE)
                        .background_color(heat_color(count, max));
                    ui.label(text);
                }
                ui.end_row();
            }
        });
    });
}

/// Two-column table of `(label, count)`.
pub fn counts_table(ui: &mut Ui, id: &str, label_header: &str, counts: &[(String, usize)]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(180.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong(label_header);
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
            })
            .body(|body| {
                body.rows(18.0, counts.len(), |mut row| {
                    let (label, count) = &counts[row.index()];
                    row.col(|ui| {
                        ui.label(label);
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                });
            });
    });
}
