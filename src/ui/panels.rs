use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::to_color32;
use crate::data::worker::{DatasetKind, DatasetLoader};
use crate::engine::bands::TOP_THRESHOLD;
use crate::engine::risk::RiskLabel;
use crate::state::AppState;
use crate::ui::chart;

// ---------------------------------------------------------------------------
// Left side panel – region list
// ---------------------------------------------------------------------------

/// Render the region picker. A click is the region-selection event.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Countries");
    if state.store.is_empty() && !state.is_loading() {
        ui.weak("No exposure data loaded; figures show as --");
    }
    ui.separator();

    let band_color = state.view.chart.color;
    if let Some(name) = state.map.show(ui, &state.store, band_color) {
        state.select_region(&name);
    }
}

// ---------------------------------------------------------------------------
// Central panel – selection details
// ---------------------------------------------------------------------------

/// Render the band selector, the resolved figures and the chart.
pub fn detail_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(&state.view.region_text);
    ui.add_space(8.0);

    // One persistent control; each change is exactly one band event.
    let lowest = state.sync.catalog().lowest().threshold;
    let mut threshold = state.sync.selection().band();
    let slider = egui::Slider::new(&mut threshold, lowest..=TOP_THRESHOLD)
        .step_by(5.0)
        .suffix(" dB")
        .text("Noise level");
    if ui.add(slider).changed() {
        state.select_band(threshold);
    }

    let view = &state.view;
    ui.label(RichText::new(&view.band_label).strong());
    ui.label(RichText::new(&view.band_example).italics());
    ui.separator();

    egui::Grid::new("exposure_figures")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Population exposed:");
            ui.label(RichText::new(&view.percent_text).strong());
            ui.end_row();

            ui.label(format!("Impact (cutoff {}%):", state.sync.classifier().cutoff()));
            let risk_color = match view.risk {
                Some(RiskLabel::Elevated) => Color32::from_rgb(0xc6, 0x28, 0x28),
                Some(RiskLabel::Low) => Color32::from_rgb(0x2e, 0x7d, 0x32),
                None => ui.visuals().weak_text_color(),
            };
            ui.label(RichText::new(&view.risk_text).color(risk_color));
            ui.end_row();

            ui.label("Exposed across all bands:");
            ui.label(&view.total_text);
            ui.end_row();
        });

    ui.add_space(8.0);
    chart::exposure_chart(ui, &view.chart);

    ui.separator();
    band_table(ui, state);
}

/// Reference table of all bands.
fn band_table(ui: &mut Ui, state: &AppState) {
    let selected = state.sync.selection().band();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(18.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|_| {});
            header.col(|ui: &mut Ui| {
                ui.strong("Band");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Comparable to");
            });
        })
        .body(|mut body| {
            for band in state.sync.catalog().bands() {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.colored_label(to_color32(band.color()), "■");
                    });
                    row.col(|ui: &mut Ui| {
                        let mut text = RichText::new(band.label);
                        if band.threshold == selected {
                            text = text.strong();
                        }
                        ui.label(text);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(band.example);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, loader: &DatasetLoader) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open exposure table…").clicked() {
                open_file_dialog(ui.ctx(), state, loader, DatasetKind::Exposure);
                ui.close_menu();
            }
            if ui.button("Open boundaries…").clicked() {
                open_file_dialog(ui.ctx(), state, loader, DatasetKind::Boundaries);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.is_loading() {
            ui.spinner();
            ui.label("Loading…");
        } else {
            let sources = [&state.exposure_source, &state.boundaries_source]
                .iter()
                .filter_map(|p| p.as_ref().map(|p| p.display().to_string()))
                .collect::<Vec<_>>()
                .join("\n");
            ui.label(format!(
                "{} countries with exposure data, {} regions on the map",
                state.store.len(),
                state.map.regions().len()
            ))
            .on_hover_text(sources);
        }

        for msg in state.status_lines() {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Queue a background load; the UI repaints when it lands.
pub fn start_load(
    ctx: &egui::Context,
    state: &mut AppState,
    loader: &DatasetLoader,
    kind: DatasetKind,
    path: PathBuf,
) {
    state.pending_loads += 1;
    let ctx = ctx.clone();
    loader.spawn(kind, path, move || ctx.request_repaint());
}

fn open_file_dialog(
    ctx: &egui::Context,
    state: &mut AppState,
    loader: &DatasetLoader,
    kind: DatasetKind,
) {
    let dialog = match kind {
        DatasetKind::Exposure => rfd::FileDialog::new()
            .set_title("Open exposure table")
            .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
            .add_filter("JSON", &["json"])
            .add_filter("CSV", &["csv"])
            .add_filter("Parquet", &["parquet", "pq"]),
        DatasetKind::Boundaries => rfd::FileDialog::new()
            .set_title("Open country boundaries")
            .add_filter("GeoJSON", &["geojson", "json"]),
    };

    if let Some(path) = dialog.pick_file() {
        start_load(ctx, state, loader, kind, path);
    }
}
