//! Trailview scenario harness
//!
//! Feeds deterministic synthetic trajectories through the ribbon converters
//! and reports what came out: mesh statistics per run, optional JSON export
//! of the full scene updates. Everything derives from a single u64 seed.

pub mod exporter;
pub mod scenarios;

pub use exporter::{ScenarioExport, ScenarioRun};
pub use scenarios::ScenarioId;
