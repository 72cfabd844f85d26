/// Selection & exposure presentation engine.
///
/// Architecture:
/// ```text
///  region click ─┐        band slider ─┐
///                ▼                     ▼
///           ┌────────────────────────────┐
///           │ sync (PresentationSync)    │ owns SelectionState
///           └────────────────────────────┘
///                │                 │
///                ▼                 ▼
///          ┌──────────┐      ┌──────────┐
///          │ resolver │      │  risk    │  percent → label
///          └──────────┘      └──────────┘
///                │
///                ▼
///        ExposureDataStore + BandCatalog
///                │
///                ▼
///        ViewModel + MapInstruction list
/// ```

pub mod bands;
pub mod resolver;
pub mod risk;
pub mod selection;
pub mod sync;
