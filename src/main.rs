mod app;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::SurveyDashApp;
use eframe::egui;
use state::AppState;
use survey_dash::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = DashboardConfig::discover(&cwd).context("loading dashboard configuration")?;
    log::info!("Survey source: {}", config.dataset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Saúde Mental na Tecnologia",
        options,
        Box::new(move |_cc| Ok(Box::new(SurveyDashApp::new(AppState::new(config))))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
