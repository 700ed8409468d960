use eframe::egui::{self, Color32, RichText, Ui};

use catalog_dashboard::data::model::ContentType;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(catalog) = state.catalog.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Content type ----
    ui.strong("Content type");
    for kind in ContentType::ALL {
        let mut checked = state.filters.types.contains(&kind);
        if ui.checkbox(&mut checked, kind.label()).changed() {
            state.toggle_type(kind);
        }
    }
    ui.separator();

    // ---- Release year range ----
    ui.strong("Release year range");
    let Some((min_year, max_year)) = catalog.release_year_span() else {
        ui.label("No release years.");
        return;
    };
    let (mut from, mut to) = state.filters.year_range;
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut from, min_year..=max_year).text("from"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut to, min_year..=max_year).text("to"))
        .changed();
    if changed {
        // Keep the range ordered whichever handle moved.
        if from > to {
            if from != state.filters.year_range.0 {
                to = from;
            } else {
                from = to;
            }
        }
        state.filters.year_range = (from, to);
        state.refilter();
    }

    ui.separator();
    ui.label(format!(
        "{} of {} titles shown",
        state.views.visible,
        catalog.canonical_len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_reload = state.dataset_path.is_some();
            if ui
                .add_enabled(can_reload, egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} titles loaded, {} with director and cast",
                catalog.len(),
                catalog.canonical_len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open content catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
