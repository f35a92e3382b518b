//! Trailview Core - vehicle trajectories rendered as velocity ribbons
//!
//! Converts Autoware-style planning trajectories into Foxglove-style scene
//! updates: a strip of colored triangles following the planned path, with
//! color encoding longitudinal velocity (red stopped, yellow mid-range,
//! green at speed). Two ribbon styles share one parameterized builder:
//! straight per-segment quads and Bezier-smoothed sampling.

pub mod converter;
pub mod geometry;
pub mod gradient;
pub mod ribbon;
pub mod scene;
pub mod trajectory;

// Re-export key types for convenience
pub use converter::{ConverterRegistry, MessageConverter, TrajectoryRibbonConverter};
pub use ribbon::{build_ribbon, RibbonConfig, RibbonMesh};
pub use scene::{Color, SceneEntity, SceneUpdate};
pub use trajectory::{Trajectory, TrajectoryPoint};
