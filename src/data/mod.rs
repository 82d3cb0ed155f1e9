/// Data layer: scan types, loading and reports.
///
/// Architecture:
/// ```text
///   .json / .csv  (plain numeric sample lists)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<Scan>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Scan    │  name + intensities, fed to the pipeline
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ ScanReport  │  peaks, smoothed, normalized (or the error)
///   └────────────┘
/// ```
pub mod loader;
pub mod model;
pub mod synthetic;
