/// Data layer: raw table parsing, the exposure store, and background loads.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet        .geojson
///        │                           │
///        ▼                           ▼
///   ┌──────────┐              ┌─────────────┐
///   │  loader  │ → RawRecord  │   loader    │ → region names
///   └──────────┘              └─────────────┘
///        │       (worker thread, LoadEvent channel)
///        ▼
///   ┌───────────────────┐
///   │ ExposureDataStore │  country → ExposureRecord
///   └───────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod worker;
