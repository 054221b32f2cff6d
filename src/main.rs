mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context};
use app::SalaryDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    log::debug!("Using {config:?}");

    // Without data there is nothing to show: a load failure ends the process.
    let mut state = AppState::new(config.top_titles);
    state
        .open(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load startup dataset: {e}"))
        .with_context(|| format!("loading startup dataset {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tech Job Salary Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard: {e}"))
}
