use std::path::PathBuf;

use crate::data::model::ExposureDataStore;
use crate::data::worker::{DatasetKind, LoadEvent};
use crate::engine::risk::RiskClassifier;
use crate::engine::sync::{PresentationSync, SyncUpdate, ViewModel};
use crate::ui::map::RegionMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Exposure table; empty until (and unless) a load succeeds.
    pub store: ExposureDataStore,

    /// Selection owner and view-model producer.
    pub sync: PresentationSync,

    /// Latest view-model, replaced on every selection event.
    pub view: ViewModel,

    /// Map layer stand-in fed by the boundary dataset.
    pub map: RegionMap,

    /// Where the current datasets came from.
    pub exposure_source: Option<PathBuf>,
    pub boundaries_source: Option<PathBuf>,

    /// Last load failure per dataset, shown as status lines. A success
    /// clears only its own dataset's entry.
    pub exposure_error: Option<String>,
    pub boundaries_error: Option<String>,

    /// Loads still in flight.
    pub pending_loads: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RiskClassifier::default())
    }
}

impl AppState {
    pub fn new(classifier: RiskClassifier) -> Self {
        let store = ExposureDataStore::default();
        let sync = PresentationSync::new(classifier);
        let view = sync.view(&store);
        Self {
            store,
            sync,
            view,
            map: RegionMap::default(),
            exposure_source: None,
            boundaries_source: None,
            exposure_error: None,
            boundaries_error: None,
            pending_loads: 0,
        }
    }

    /// Region-selection event from the map layer.
    pub fn select_region(&mut self, name: &str) {
        let update = self.sync.select_region(name, &self.store);
        self.apply(update);
    }

    /// Band-selection event from the band slider.
    pub fn select_band(&mut self, threshold: u32) {
        let update = self.sync.select_band(threshold, &self.store);
        self.apply(update);
    }

    fn apply(&mut self, update: SyncUpdate) {
        for instruction in &update.map {
            self.map.apply(instruction);
        }
        self.view = update.view;
    }

    /// Fold a finished background load into the state.
    pub fn handle_load(&mut self, event: LoadEvent) {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match event {
            LoadEvent::Exposure { path, records } => {
                self.store = ExposureDataStore::from_records(records);
                log::info!(
                    "Loaded exposure data for {} countries from {}",
                    self.store.len(),
                    path.display()
                );
                self.exposure_source = Some(path);
                self.exposure_error = None;
                // Same selection, new data.
                log::debug!("Recomputing view for {:?}", self.sync.selection().region());
                self.view = self.sync.view(&self.store);
            }
            LoadEvent::Boundaries { path, regions } => {
                log::info!("Loaded {} boundary regions from {}", regions.len(), path.display());
                self.map.set_regions(regions);
                self.boundaries_source = Some(path);
                self.boundaries_error = None;
            }
            LoadEvent::Failed(failure) => {
                log::error!("{failure}");
                match failure.kind {
                    DatasetKind::Exposure => {
                        // Degraded mode: nothing from an earlier table survives.
                        self.store = ExposureDataStore::default();
                        self.exposure_source = None;
                        self.view = self.sync.view(&self.store);
                        self.exposure_error = Some(format!("No exposure data: {}", failure.reason));
                    }
                    DatasetKind::Boundaries => {
                        self.boundaries_error = Some(format!("No map data: {}", failure.reason));
                    }
                }
            }
        }
    }

    /// Failure messages to show, exposure first.
    pub fn status_lines(&self) -> impl Iterator<Item = &str> {
        [&self.exposure_error, &self.boundaries_error]
            .into_iter()
            .filter_map(|e| e.as_deref())
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }
}
