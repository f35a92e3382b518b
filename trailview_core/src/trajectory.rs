//! Input message schema - Autoware planning trajectory.
//!
//! Mirrors `autoware_auto_planning_msgs/msg/Trajectory` as the host delivers
//! it: a stamped header plus an ordered list of trajectory points. Only the
//! pose position and the longitudinal velocity feed the ribbon geometry; the
//! remaining kinematic fields are carried for schema fidelity.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// ROS-style timestamp (seconds + nanoseconds since epoch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub sec: u32,
    pub nsec: u32,
}

/// ROS-style duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub sec: i32,
    pub nsec: u32,
}

impl Duration {
    pub const fn from_secs(sec: i32) -> Self {
        Self { sec, nsec: 0 }
    }
}

/// Message header carrying the trajectory's frame and stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

/// 3D point in the trajectory's frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// In-plane projection consumed by the ribbon geometry.
    pub fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

/// Quaternion (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Pose of a trajectory point (position + heading).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    pub orientation: Quaternion,
}

impl Pose {
    /// Identity transform: origin position, no rotation.
    pub fn identity() -> Self {
        Self::default()
    }
}

/// One point of the planned trajectory for the controller.
///
/// The field set matches the Autoware contract; the converter reads
/// `pose.position` and `longitudinal_velocity_mps` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time_from_start: Duration,
    pub pose: Pose,
    pub longitudinal_velocity_mps: f64,
    pub lateral_velocity_mps: f64,
    pub heading_rate_rps: f64,
    pub acceleration_mps2: f64,
    pub front_wheel_angle_rad: f64,
    pub rear_wheel_angle_rad: f64,
}

impl TrajectoryPoint {
    /// Point at `position` moving at `velocity` m/s along the path.
    pub fn new(position: Point3, velocity: f64) -> Self {
        Self {
            pose: Pose {
                position,
                ..Default::default()
            },
            longitudinal_velocity_mps: velocity,
            ..Default::default()
        }
    }
}

/// Ordered set of trajectory points.
///
/// Points are assumed temporally and spatially ordered; the converter does
/// not verify monotonic arc length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub header: Header,
    pub points: Vec<TrajectoryPoint>,
}
