mod app;
mod cache;
mod color;
mod config;
mod data;
mod error;
mod export;
mod state;
mod ui;

use app::NamesDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::discover();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "National Names Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(NamesDashboardApp::new(config)))),
    )
}
