use eframe::egui;

use catalog_dashboard::config::DashboardConfig;

use crate::state::AppState;
use crate::ui::{panels, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CatalogDashboardApp {
    pub state: AppState,
}

impl CatalogDashboardApp {
    /// Build the app and open the configured dataset, if any.
    pub fn new(config: DashboardConfig) -> Self {
        let dataset = config.dataset_path.clone();
        let mut state = AppState::new(config);
        if let Some(path) = dataset {
            state.open(&path);
        }
        Self { state }
    }
}

impl eframe::App for CatalogDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tabs::central_panel(ui, &mut self.state);
        });
    }
}
