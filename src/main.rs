mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::CatalogDashboardApp;
use catalog_dashboard::config::DashboardConfig;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let mut config = DashboardConfig::load().context("loading dashboard config")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.dataset_path = Some(path.into());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Content Catalog Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CatalogDashboardApp::new(config)))),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}
