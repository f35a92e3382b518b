//! JSON export of converted scenarios.
//!
//! Dumps the scene updates the converters produced, plus enough metadata to
//! reproduce the run, for offline inspection or plotting.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use trailview_core::scene::SceneUpdate;

/// One scenario/style conversion, ready for offline inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRun {
    /// Scenario name
    pub scenario: String,

    /// Ribbon style used ("straight" or "smooth")
    pub style: String,

    /// Number of trajectory points fed in
    pub point_count: usize,

    /// Vertices in the produced ribbon
    pub vertex_count: usize,

    /// Triangles in the produced ribbon
    pub triangle_count: usize,

    /// The scene update handed to the host
    pub scene: SceneUpdate,
}

/// Complete harness export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioExport {
    /// Seed used
    pub seed: u64,

    /// All conversion runs
    pub runs: Vec<ScenarioRun>,
}

impl ScenarioExport {
    /// Creates a new export container.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            runs: Vec::new(),
        }
    }

    /// Adds a run.
    pub fn add_run(&mut self, run: ScenarioRun) {
        self.runs.push(run);
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_serializes_runs() {
        let mut export = ScenarioExport::new(42);
        export.add_run(ScenarioRun {
            scenario: "straight_run".to_string(),
            style: "straight".to_string(),
            point_count: 2,
            vertex_count: 4,
            triangle_count: 2,
            scene: SceneUpdate {
                deletions: Vec::new(),
                entities: Vec::new(),
            },
        });

        let json = serde_json::to_string(&export).unwrap();
        let back: ScenarioExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 42);
        assert_eq!(back.runs.len(), 1);
        assert_eq!(back.runs[0].vertex_count, 4);
    }
}
