mod app;
mod color;
mod data;
mod engine;
mod settings;
mod state;
mod ui;

use app::NoiseAtlasApp;
use clap::Parser;
use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();
    let settings = Settings::parse();
    log::debug!("Starting with {settings:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Noise Atlas – Europe",
        options,
        Box::new(move |cc| Ok(Box::new(NoiseAtlasApp::new(&cc.egui_ctx, &settings)))),
    )
}
