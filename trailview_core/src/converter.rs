//! Message conversion boundary.
//!
//! The host invokes converters as pure functions registered under a
//! (source schema, target schema) pair. Converters hold immutable
//! configuration only: same input, same output, nothing retained between
//! calls, safe to invoke concurrently.

use std::collections::HashMap;

use thiserror::Error;

use crate::ribbon::{build_ribbon, ConfigError, RibbonConfig};
use crate::scene::{SceneEntity, SceneUpdate};
use crate::trajectory::Trajectory;

/// Source schema the converters consume.
pub const TRAJECTORY_SCHEMA: &str = "autoware_auto_planning_msgs/msg/Trajectory";

/// Target schema the converters produce.
pub const SCENE_UPDATE_SCHEMA: &str = "foxglove.SceneUpdate";

/// Registration name of the straight-segment ribbon converter.
pub const STRAIGHT_CONVERTER: &str = "velocity_ribbon";

/// Registration name of the Bezier-smoothed ribbon converter.
pub const SMOOTH_CONVERTER: &str = "velocity_ribbon_smooth";

/// Capability interface the host registration mechanism consumes.
pub trait MessageConverter: Send + Sync {
    /// Schema name of the consumed message.
    fn from_schema(&self) -> &str;

    /// Schema name of the produced message.
    fn to_schema(&self) -> &str;

    /// Convert one trajectory message into one scene update.
    fn convert(&self, msg: &Trajectory) -> SceneUpdate;
}

/// Trajectory-to-ribbon converter for a fixed ribbon configuration.
#[derive(Debug, Clone)]
pub struct TrajectoryRibbonConverter {
    config: RibbonConfig,
}

impl TrajectoryRibbonConverter {
    /// Converter with a custom, validated configuration.
    pub fn new(config: RibbonConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Preset straight-segment converter.
    pub fn straight() -> Self {
        Self {
            config: RibbonConfig::straight(),
        }
    }

    /// Preset Bezier-smoothed converter.
    pub fn smooth() -> Self {
        Self {
            config: RibbonConfig::smooth(),
        }
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }
}

impl MessageConverter for TrajectoryRibbonConverter {
    fn from_schema(&self) -> &str {
        TRAJECTORY_SCHEMA
    }

    fn to_schema(&self) -> &str {
        SCENE_UPDATE_SCHEMA
    }

    fn convert(&self, msg: &Trajectory) -> SceneUpdate {
        let mesh = build_ribbon(&self.config, &msg.points);
        let entity = SceneEntity::path_ribbon(&msg.header, mesh.into_primitive());
        SceneUpdate::single(entity)
    }
}

/// Failed registry operation.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("converter {0:?} is already registered")]
    Duplicate(String),
}

/// Named converter registrations, looked up by name or schema pair.
///
/// Stands in for the host's registration surface so both ribbon styles can
/// live behind one interface.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Box<dyn MessageConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with both ribbon styles.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // Distinct constant names on a fresh registry cannot collide.
        registry.converters.insert(
            STRAIGHT_CONVERTER.to_string(),
            Box::new(TrajectoryRibbonConverter::straight()),
        );
        registry.converters.insert(
            SMOOTH_CONVERTER.to_string(),
            Box::new(TrajectoryRibbonConverter::smooth()),
        );
        registry
    }

    /// Register a converter under a unique name.
    pub fn register(
        &mut self,
        name: &str,
        converter: Box<dyn MessageConverter>,
    ) -> Result<(), RegistryError> {
        if self.converters.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.converters.insert(name.to_string(), converter);
        Ok(())
    }

    /// Look up a converter by registration name.
    pub fn get(&self, name: &str) -> Option<&dyn MessageConverter> {
        self.converters.get(name).map(|c| c.as_ref())
    }

    /// All converters registered for a schema pair.
    pub fn converters_for<'a>(
        &'a self,
        from_schema: &'a str,
        to_schema: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a dyn MessageConverter)> + 'a {
        self.converters.iter().filter_map(move |(name, c)| {
            (c.from_schema() == from_schema && c.to_schema() == to_schema)
                .then(|| (name.as_str(), c.as_ref()))
        })
    }

    /// Convert `msg` with the named converter, if registered.
    pub fn convert(&self, name: &str, msg: &Trajectory) -> Option<SceneUpdate> {
        self.get(name).map(|c| c.convert(msg))
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
