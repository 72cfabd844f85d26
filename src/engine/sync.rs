use palette::Srgb;
use serde::Serialize;

use super::bands::BandCatalog;
use super::resolver::{resolve, resolve_total};
use super::risk::{RiskClassifier, RiskLabel};
use super::selection::SelectionState;
use crate::data::model::ExposureDataStore;

/// Region text shown while nothing is selected.
pub const NO_REGION_TEXT: &str = "Select a country";
/// Stand-in for any unavailable number or label.
pub const PLACEHOLDER: &str = "--";

// ---------------------------------------------------------------------------
// View-model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationState {
    NoRegion,
    RegionSelectedNoBandData,
    RegionSelectedWithBandData,
}

/// Proportions for the exposure chart: `[exposed, remainder]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartModel {
    pub segments: [f64; 2],
    pub color: Srgb<u8>,
}

/// Everything the rendering side needs to draw the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub state: PresentationState,
    pub region_text: String,
    pub percent: Option<f64>,
    pub percent_text: String,
    pub risk: Option<RiskLabel>,
    pub risk_text: String,
    pub total_text: String,
    pub band_threshold: u32,
    pub band_label: String,
    pub band_example: String,
    pub chart: ChartModel,
}

/// Declarative instruction for the map layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapInstruction {
    Highlight(String),
    Reset(String),
}

/// Result of handling one selection event. Map instructions are ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncUpdate {
    pub map: Vec<MapInstruction>,
    pub view: ViewModel,
}

// ---------------------------------------------------------------------------
// PresentationSync
// ---------------------------------------------------------------------------

/// Owns the selection and turns each selection event into exactly one
/// recomputed [`ViewModel`].
#[derive(Debug, Clone, Default)]
pub struct PresentationSync {
    catalog: BandCatalog,
    classifier: RiskClassifier,
    selection: SelectionState,
}

impl PresentationSync {
    pub fn new(classifier: RiskClassifier) -> Self {
        Self {
            catalog: BandCatalog,
            classifier,
            selection: SelectionState::default(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }

    pub fn catalog(&self) -> &BandCatalog {
        &self.catalog
    }

    /// Region-selection event. The previous region is reset before the new
    /// one is highlighted; re-selecting the current region changes nothing
    /// on the map.
    pub fn select_region(&mut self, name: &str, store: &ExposureDataStore) -> SyncUpdate {
        log::info!("Country clicked: {name}");
        let previous = self.selection.select_region(name);

        let map = match previous {
            Some(prev) if prev == name => Vec::new(),
            Some(prev) => vec![
                MapInstruction::Reset(prev),
                MapInstruction::Highlight(name.to_string()),
            ],
            None => vec![MapInstruction::Highlight(name.to_string())],
        };

        SyncUpdate {
            map,
            view: self.view(store),
        }
    }

    /// Band-selection event. Unknown thresholds are kept and render with the
    /// fallback descriptor and an unavailable value.
    pub fn select_band(&mut self, threshold: u32, store: &ExposureDataStore) -> SyncUpdate {
        if self.catalog.band(threshold).is_none() {
            log::warn!("Band threshold {threshold} dB is not in the catalog");
        }
        self.selection.select_band(threshold);

        SyncUpdate {
            map: Vec::new(),
            view: self.view(store),
        }
    }

    /// Recompute the view-model for the current selection. Pure.
    pub fn view(&self, store: &ExposureDataStore) -> ViewModel {
        let current = self.selection.current();
        let percent = resolve(current.region, current.band, store);
        let risk = self.classifier.classify(percent);
        let descriptor = self.catalog.describe(current.band);

        let state = match (current.region, percent) {
            (None, _) => PresentationState::NoRegion,
            (Some(_), None) => PresentationState::RegionSelectedNoBandData,
            (Some(_), Some(_)) => PresentationState::RegionSelectedWithBandData,
        };

        let exposed = percent.unwrap_or(0.0);

        ViewModel {
            state,
            region_text: current.region.unwrap_or(NO_REGION_TEXT).to_string(),
            percent,
            percent_text: percent_text(percent),
            risk,
            risk_text: risk.map_or(PLACEHOLDER, |r| r.as_str()).to_string(),
            total_text: percent_text(resolve_total(current.region, store)),
            band_threshold: current.band,
            band_label: descriptor.label.to_string(),
            band_example: descriptor.example.to_string(),
            chart: ChartModel {
                segments: [exposed, 100.0 - exposed],
                color: self.catalog.color_for(current.band),
            },
        }
    }
}

fn percent_text(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => PLACEHOLDER.to_string(),
    }
}
