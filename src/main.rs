mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::BikeDashApp;
use data::loader;
use eframe::egui;
use state::AppState;

/// The rental dataset is expected next to the executable.
const DATA_PATH: &str = "train.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let state = match loader::shared_table(Path::new(DATA_PATH)) {
        Ok(table) => {
            log::info!("loaded {} rows from {DATA_PATH}", table.len());
            AppState::with_table(table)
        }
        Err(err) => {
            log::error!("{err}");
            AppState::failed(err.to_string())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Dash – Rental Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(BikeDashApp::new(state)))),
    )
}
