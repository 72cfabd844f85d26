use super::bands::BandCatalog;

/// What the user currently has selected: at most one region, always one band.
///
/// Pure state holder. It raises no events; [`super::sync::PresentationSync`]
/// queries it after each external selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    region: Option<String>,
    band: u32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            region: None,
            band: BandCatalog.lowest().threshold,
        }
    }
}

/// Snapshot returned by [`SelectionState::current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub region: Option<&'a str>,
    pub band: u32,
}

impl SelectionState {
    /// Replace the region selection, returning the one it displaced.
    pub fn select_region(&mut self, name: &str) -> Option<String> {
        self.region.replace(name.to_string())
    }

    /// Replace the band selection. The region selection is untouched.
    pub fn select_band(&mut self, threshold: u32) {
        self.band = threshold;
    }

    pub fn current(&self) -> Selection<'_> {
        Selection {
            region: self.region.as_deref(),
            band: self.band,
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn band(&self) -> u32 {
        self.band
    }
}
