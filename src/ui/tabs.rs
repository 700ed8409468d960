use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use catalog_dashboard::data::aggregate::{Granularity, TimeBucket, TrendPoint};
use catalog_dashboard::data::model::MONTH_LABELS;

use crate::state::{AppState, DashboardViews, DetailRow, Tab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the tab strip and the selected tab.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.catalog.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to start  (File → Open…)");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.title());
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::MainMetrics => main_metrics(ui, &state.views),
            Tab::Trends => trends(ui, state),
            Tab::ContentAnalysis => content_analysis(ui, &state.views),
            Tab::CastCrew => cast_and_crew(ui, &state.views),
            Tab::Explorer => explorer(ui, state),
            Tab::Details => details(ui, &state.views.details),
        });
}

// ---------------------------------------------------------------------------
// Main metrics
// ---------------------------------------------------------------------------

fn main_metrics(ui: &mut Ui, views: &DashboardViews) {
    ui.columns(2, |cols| {
        cols[0].strong("Content Type Distribution");
        plot::bar_chart(&mut cols[0], "type_dist", &views.type_distribution, "Titles");
        cols[1].strong("Rating Distribution");
        plot::bar_chart(&mut cols[1], "rating_dist", &views.rating_distribution, "Titles");
    });
    ui.add_space(8.0);
    ui.columns(2, |cols| {
        cols[0].strong("Duration Distribution by Content Type");
        let groups: Vec<_> = views
            .durations
            .iter()
            .map(|(kind, summary)| (kind.label().to_string(), summary.clone()))
            .collect();
        plot::box_chart(&mut cols[0], "duration_box", &groups, "Duration");
        cols[1].strong(format!("Top {} Genres", views.top_genres.len()));
        plot::ranking_chart(&mut cols[1], "top_genres", &views.top_genres, "Count");
    });
}

// ---------------------------------------------------------------------------
// Trends & patterns
// ---------------------------------------------------------------------------

fn trends(ui: &mut Ui, state: &mut AppState) {
    let views = &state.views;
    ui.columns(2, |cols| {
        cols[0].strong("Content Release Trend");
        let points: Vec<[f64; 2]> = views
            .release_trend
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect();
        plot::line_chart(
            &mut cols[0],
            "release_trend",
            &[("Titles".to_string(), points)],
            "Release year",
            "Titles",
        );

        cols[1].strong("Monthly Addition Pattern");
        let monthly: Vec<(String, usize)> = MONTH_LABELS
            .iter()
            .zip(views.monthly)
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        plot::bar_chart(&mut cols[1], "monthly_adds", &monthly, "Number of Titles");
    });

    ui.add_space(8.0);
    ui.strong("Genre Trends Over Time");
    plot::line_chart(
        ui,
        "genre_trends",
        &genre_series(&views.genre_trends),
        "Year",
        "Number of Titles",
    );

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Titles Added");
        let before = state.added_granularity;
        ui.selectable_value(&mut state.added_granularity, Granularity::Year, "per year");
        ui.selectable_value(&mut state.added_granularity, Granularity::Month, "per month");
        if state.added_granularity != before {
            state.refilter();
        }
    });
    let points: Vec<[f64; 2]> = state
        .views
        .added_trend
        .iter()
        .map(|(bucket, count)| [bucket_position(bucket), *count as f64])
        .collect();
    plot::line_chart(
        ui,
        "added_trend",
        &[("Titles added".to_string(), points)],
        "Date added",
        "Titles",
    );
}

/// Group flat `(year, genre, count)` points into one series per genre,
/// keeping the ranking order of first appearance.
fn genre_series(points: &[TrendPoint]) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut series: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for p in points {
        let xy = [p.year as f64, p.count as f64];
        match series.iter_mut().find(|(genre, _)| *genre == p.genre) {
            Some((_, values)) => values.push(xy),
            None => series.push((p.genre.clone(), vec![xy])),
        }
    }
    series
}

/// Fractional year for plotting.
fn bucket_position(bucket: &TimeBucket) -> f64 {
    match bucket {
        TimeBucket::Year(year) => *year as f64,
        TimeBucket::Month(ym) => ym.year as f64 + (ym.month - 1) as f64 / 12.0,
    }
}

// ---------------------------------------------------------------------------
// Content analysis
// ---------------------------------------------------------------------------

fn content_analysis(ui: &mut Ui, views: &DashboardViews) {
    ui.strong(format!(
        "Top {} Countries by Content Production",
        views.top_countries.len()
    ));
    plot::bar_chart(ui, "top_countries", &views.top_countries, "Number of Titles");

    ui.add_space(8.0);
    ui.strong("Movie Duration by Rating");
    plot::box_chart(
        ui,
        "rating_duration",
        &views.rating_durations,
        "Duration (minutes)",
    );

    ui.add_space(8.0);
    ui.strong("Content Release Heatmap");
    let heat = &views.heatmap;
    let rows: Vec<String> = heat.years.iter().map(|y| y.to_string()).collect();
    let columns: Vec<String> = MONTH_LABELS.iter().map(|m| m.to_string()).collect();
    let counts: Vec<Vec<usize>> = heat.counts.iter().map(|row| row.to_vec()).collect();
    plot::heat_grid(ui, "release_heatmap", &rows, &columns, &counts, heat.max());
}

// ---------------------------------------------------------------------------
// Cast & crew
// ---------------------------------------------------------------------------

fn cast_and_crew(ui: &mut Ui, views: &DashboardViews) {
    ui.columns(2, |cols| {
        cols[0].strong("Top Directors");
        plot::ranking_chart(
            &mut cols[0],
            "top_directors",
            &views.top_directors,
            "Number of Titles",
        );
        cols[1].strong("Top Actors");
        plot::ranking_chart(
            &mut cols[1],
            "top_actors",
            &views.top_actors,
            "Number of Appearances",
        );
    });

    ui.add_space(8.0);
    ui.strong("Director's Genre Preferences");
    let tab = &views.director_genre;
    plot::heat_grid(
        ui,
        "director_genre",
        &tab.rows,
        &tab.columns,
        &tab.counts,
        tab.max(),
    );
}

// ---------------------------------------------------------------------------
// Country / year / month explorer
// ---------------------------------------------------------------------------

fn explorer(ui: &mut Ui, state: &mut AppState) {
    ui.label("Select a year and month to see the number of titles posted by country.");

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        let year_text = state
            .explorer
            .year
            .map_or("All".to_string(), |y| y.to_string());
        egui::ComboBox::from_id_salt("explorer_year")
            .selected_text(year_text)
            .show_ui(ui, |ui: &mut Ui| {
                changed |= ui
                    .selectable_value(&mut state.explorer.year, None, "All")
                    .changed();
                for &year in &state.explorer_years {
                    changed |= ui
                        .selectable_value(&mut state.explorer.year, Some(year), year.to_string())
                        .changed();
                }
            });

        let month_text = state
            .explorer
            .month
            .map_or("All", |m| MONTH_LABELS[(m - 1) as usize]);
        egui::ComboBox::from_id_salt("explorer_month")
            .selected_text(month_text)
            .show_ui(ui, |ui: &mut Ui| {
                changed |= ui
                    .selectable_value(&mut state.explorer.month, None, "All")
                    .changed();
                for (i, label) in MONTH_LABELS.iter().enumerate() {
                    changed |= ui
                        .selectable_value(&mut state.explorer.month, Some(i as u32 + 1), *label)
                        .changed();
                }
            });
    });
    if changed {
        state.refresh_explorer();
    }

    egui::CollapsingHeader::new(RichText::new(format!(
        "Countries  ({}/{})",
        state.explorer.countries.len(),
        state.explorer_countries.len()
    )))
    .id_salt("explorer_countries")
    .default_open(false)
    .show(ui, |ui: &mut Ui| {
        let options = state.explorer_countries.clone();
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for country in &options {
                let mut checked = state.explorer.countries.contains(country);
                if ui.checkbox(&mut checked, country).changed() {
                    state.toggle_explorer_country(country);
                }
            }
        });
    });

    ui.add_space(8.0);
    ui.strong("Titles Posted by Country");
    if state.explorer_counts.is_empty() {
        ui.label("No content found for the selected year/month/country filters.");
        return;
    }
    plot::bar_chart(ui, "explorer_counts", &state.explorer_counts, "Number of Titles");
    plot::counts_table(ui, "explorer_table", "Country", &state.explorer_counts);
}

// ---------------------------------------------------------------------------
// Content details
// ---------------------------------------------------------------------------

fn details(ui: &mut Ui, rows: &[DetailRow]) {
    ui.push_id("details_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(240.0))
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Title", "Type", "Release year", "Duration", "Rating"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(&r.title);
                    });
                    row.col(|ui| {
                        ui.label(r.content_type.label());
                    });
                    row.col(|ui| {
                        ui.label(r.release_year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&r.duration);
                    });
                    row.col(|ui| {
                        ui.label(&r.rating);
                    });
                });
            });
    });
}
