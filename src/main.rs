mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::CrashviewApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = config::Config::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Crashview – NYC Motor Vehicle Collisions",
        options,
        Box::new(move |_cc| Ok(Box::new(CrashviewApp::new(&config)))),
    )
}
