//! Output message schema - Foxglove-style scene update.
//!
//! Shapes match the host's scene-graph schema: one `SceneUpdate` carrying
//! entity upserts, each entity carrying the full complement of primitive
//! collections. The ribbon converter only ever populates `triangles`; the
//! other collections stay empty but present so the entity serializes with
//! the complete schema surface.

use serde::{Deserialize, Serialize};

use crate::trajectory::{Duration, Header, Point3, Pose, Time};

/// RGBA color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Directional arrow marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowPrimitive {
    pub pose: Pose,
    pub shaft_length: f64,
    pub shaft_diameter: f64,
    pub head_length: f64,
    pub head_diameter: f64,
    pub color: Color,
}

/// Axis-aligned box marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubePrimitive {
    pub pose: Pose,
    pub size: Point3,
    pub color: Color,
}

/// Ellipsoid marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpherePrimitive {
    pub pose: Pose,
    pub size: Point3,
    pub color: Color,
}

/// Cylinder or truncated-cone marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderPrimitive {
    pub pose: Pose,
    pub size: Point3,
    pub bottom_scale: f64,
    pub top_scale: f64,
    pub color: Color,
}

/// Topology of a `LinePrimitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    LineStrip,
    LineLoop,
    LineList,
}

/// Connected or disjoint line set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePrimitive {
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub pose: Pose,
    pub thickness: f64,
    pub scale_invariant: bool,
    pub points: Vec<Point3>,
    pub color: Color,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

/// Indexed triangle list with optional per-vertex colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleListPrimitive {
    pub pose: Pose,
    pub points: Vec<Point3>,
    pub color: Color,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

impl TriangleListPrimitive {
    /// Base color the host falls back to where per-vertex colors are absent.
    pub const BASE_COLOR: Color = Color::new(1.0, 0.0, 1.0, 1.0);

    /// Triangle list with identity pose and the standard base color.
    pub fn new(points: Vec<Point3>, colors: Vec<Color>, indices: Vec<u32>) -> Self {
        Self {
            pose: Pose::identity(),
            points,
            color: Self::BASE_COLOR,
            colors,
            indices,
        }
    }
}

/// Billboard or in-scene text marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub pose: Pose,
    pub billboard: bool,
    pub font_size: f64,
    pub scale_invariant: bool,
    pub color: Color,
    pub text: String,
}

/// External 3D model reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPrimitive {
    pub pose: Pose,
    pub scale: Point3,
    pub color: Color,
    pub override_color: bool,
    pub url: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Free-form entity metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

/// Request to remove a previously published entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntityDeletion {
    pub timestamp: Time,
    pub id: String,
}

/// One renderable entity in the scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEntity {
    pub timestamp: Time,
    pub frame_id: String,
    pub id: String,
    pub lifetime: Duration,
    pub frame_locked: bool,
    pub metadata: Vec<KeyValuePair>,
    pub arrows: Vec<ArrowPrimitive>,
    pub cubes: Vec<CubePrimitive>,
    pub spheres: Vec<SpherePrimitive>,
    pub cylinders: Vec<CylinderPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub triangles: Vec<TriangleListPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub models: Vec<ModelPrimitive>,
}

impl SceneEntity {
    /// Entity id every ribbon update publishes under, so successive
    /// trajectories replace rather than accumulate.
    pub const PATH_ENTITY_ID: &'static str = "path";

    /// How long a ribbon entity survives without a refreshing update.
    pub const RIBBON_LIFETIME: Duration = Duration::from_secs(1);

    /// Wrap one ribbon triangle list into the entity the host expects.
    ///
    /// The entity reuses the trajectory's stamp and frame, is not frame
    /// locked, and leaves every other primitive collection empty.
    pub fn path_ribbon(header: &Header, triangles: TriangleListPrimitive) -> Self {
        Self {
            timestamp: header.stamp,
            frame_id: header.frame_id.clone(),
            id: Self::PATH_ENTITY_ID.to_string(),
            lifetime: Self::RIBBON_LIFETIME,
            frame_locked: false,
            metadata: Vec::new(),
            arrows: Vec::new(),
            cubes: Vec::new(),
            spheres: Vec::new(),
            cylinders: Vec::new(),
            lines: Vec::new(),
            triangles: vec![triangles],
            texts: Vec::new(),
            models: Vec::new(),
        }
    }
}

/// Top-level scene-graph delta handed back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneUpdate {
    pub deletions: Vec<SceneEntityDeletion>,
    pub entities: Vec<SceneEntity>,
}

impl SceneUpdate {
    /// Update carrying a single entity and no deletions.
    pub fn single(entity: SceneEntity) -> Self {
        Self {
            deletions: Vec::new(),
            entities: vec![entity],
        }
    }
}
