use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use palette::Srgb;

use crate::color::highlight_fill;
use crate::data::model::ExposureDataStore;
use crate::engine::sync::MapInstruction;

// ---------------------------------------------------------------------------
// Region map layer
// ---------------------------------------------------------------------------

/// Clickable list of boundary regions standing in for the map layer.
///
/// It only knows region names and which one is highlighted; highlighting is
/// driven by [`MapInstruction`]s, never decided here.
#[derive(Debug, Default)]
pub struct RegionMap {
    regions: Vec<String>,
    highlighted: Option<String>,
    search: String,
}

impl RegionMap {
    pub fn set_regions(&mut self, regions: Vec<String>) {
        self.regions = regions;
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn apply(&mut self, instruction: &MapInstruction) {
        match instruction {
            MapInstruction::Highlight(name) => self.highlighted = Some(name.clone()),
            MapInstruction::Reset(name) => {
                if self.highlighted.as_deref() == Some(name.as_str()) {
                    self.highlighted = None;
                }
            }
        }
    }

    /// Draw the region list; returns the region the user clicked, if any.
    pub fn show(&mut self, ui: &mut Ui, store: &ExposureDataStore, band_color: Srgb<u8>) -> Option<String> {
        if self.regions.is_empty() {
            ui.label("No boundary data loaded.");
            return None;
        }

        ui.horizontal(|ui: &mut Ui| {
            ui.label("🔍");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.separator();

        let needle = self.search.to_lowercase();
        let fill = highlight_fill(band_color);
        let mut clicked = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                for name in self.regions.iter().filter(|n| n.to_lowercase().contains(&needle)) {
                    let is_highlighted = self.highlighted() == Some(name.as_str());
                    let mut text = RichText::new(name);
                    if store.lookup(name).is_none() {
                        text = text.color(Color32::GRAY).italics();
                    }
                    if is_highlighted {
                        text = text.strong().background_color(fill);
                    }
                    if ui.add(egui::SelectableLabel::new(is_highlighted, text)).clicked() {
                        clicked = Some(name.clone());
                    }
                }
            });

        clicked
    }
}
