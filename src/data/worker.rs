use std::fmt;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;

use super::loader;
use super::model::RawRecord;

// ---------------------------------------------------------------------------
// Load events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Exposure,
    Boundaries,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Exposure => write!(f, "exposure"),
            DatasetKind::Boundaries => write!(f, "boundary"),
        }
    }
}

/// A dataset that could not be read. The affected store stays empty.
#[derive(Debug, Clone, Error)]
#[error("could not load {kind} dataset from {}: {reason}", .path.display())]
pub struct DatasetLoadFailure {
    pub kind: DatasetKind,
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a background load, delivered to the UI thread.
#[derive(Debug)]
pub enum LoadEvent {
    Exposure { path: PathBuf, records: Vec<RawRecord> },
    Boundaries { path: PathBuf, regions: Vec<String> },
    Failed(DatasetLoadFailure),
}

// ---------------------------------------------------------------------------
// Loader handle
// ---------------------------------------------------------------------------

/// Runs dataset loads off the UI thread. Each load finishes at most once, in
/// any order; results are drained with [`DatasetLoader::poll`].
pub struct DatasetLoader {
    tx: Sender<LoadEvent>,
    rx: Receiver<LoadEvent>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

impl DatasetLoader {
    /// Start loading `path`. `notify` runs on the worker thread after the
    /// event is queued (the app uses it to request a repaint).
    pub fn spawn<F>(&self, kind: DatasetKind, path: PathBuf, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        log::debug!("Loading {kind} dataset from {}", path.display());
        thread::spawn(move || {
            let event = load(kind, &path);
            if tx.send(event).is_err() {
                log::debug!("UI gone before {kind} dataset finished loading");
            }
            notify();
        });
    }

    /// Every event that arrived since the last poll. Never blocks.
    pub fn poll(&self) -> Vec<LoadEvent> {
        self.rx.try_iter().collect()
    }
}

/// Load one dataset synchronously and wrap the result as an event.
pub fn load(kind: DatasetKind, path: &Path) -> LoadEvent {
    let result = match kind {
        DatasetKind::Exposure => {
            loader::load_exposure_file(path).map(|records| LoadEvent::Exposure {
                path: path.to_path_buf(),
                records,
            })
        }
        DatasetKind::Boundaries => {
            loader::load_boundaries(path).map(|regions| LoadEvent::Boundaries {
                path: path.to_path_buf(),
                regions,
            })
        }
    };

    result.unwrap_or_else(|e| {
        LoadEvent::Failed(DatasetLoadFailure {
            kind,
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })
    })
}
