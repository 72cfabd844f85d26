use eframe::egui;

use crate::data::worker::{DatasetKind, DatasetLoader};
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NoiseAtlasApp {
    state: AppState,
    loader: DatasetLoader,
}

impl NoiseAtlasApp {
    /// Build the app and kick off both dataset loads; either may land first.
    pub fn new(ctx: &egui::Context, settings: &Settings) -> Self {
        let mut app = Self {
            state: AppState::new(settings.classifier()),
            loader: DatasetLoader::default(),
        };
        panels::start_load(
            ctx,
            &mut app.state,
            &app.loader,
            DatasetKind::Boundaries,
            settings.boundaries.clone(),
        );
        panels::start_load(
            ctx,
            &mut app.state,
            &app.loader,
            DatasetKind::Exposure,
            settings.exposure.clone(),
        );
        app
    }
}

impl eframe::App for NoiseAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.loader.poll() {
            self.state.handle_load(event);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.loader);
        });

        // ---- Left side panel: regions ----
        egui::SidePanel::left("region_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selection details and chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::detail_panel(ui, &mut self.state);
        });
    }
}
