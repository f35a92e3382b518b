//! Synthetic trajectory scenarios.
//!
//! Each scenario produces a deterministic trajectory from a seed: a fixed
//! path shape, a plausible velocity profile, and a little seeded lateral
//! noise so consecutive runs with different seeds are distinguishable.

use nalgebra::UnitQuaternion;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trailview_core::trajectory::{
    Duration, Header, Point3, Pose, Quaternion, Time, Trajectory, TrajectoryPoint,
};

/// Longitudinal spacing between generated points, meters.
const POINT_SPACING_M: f64 = 1.0;

/// Time between generated points, nanoseconds (10 Hz trajectory).
const TICK_NANOS: u64 = 100_000_000;

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioId {
    /// Constant-speed run down a straight lane
    StraightRun,

    /// Lateral shift into the adjacent lane across the middle third
    LaneChange,

    /// Accelerate from rest, brake to a stop, pull away again
    StopAndGo,

    /// Continuous S-curves at varying speed
    Serpentine,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::StraightRun,
            ScenarioId::LaneChange,
            ScenarioId::StopAndGo,
            ScenarioId::Serpentine,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::StraightRun => "straight_run",
            ScenarioId::LaneChange => "lane_change",
            ScenarioId::StopAndGo => "stop_and_go",
            ScenarioId::Serpentine => "serpentine",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::StraightRun => "Constant 8 m/s down a straight lane",
            ScenarioId::LaneChange => "3.5 m lateral shift across the middle third at 6 m/s",
            ScenarioId::StopAndGo => "Full stop at the midpoint, acceleration on both sides",
            ScenarioId::Serpentine => "S-curves with a 2-3.5 m/s speed swing",
        }
    }

    /// Generate the scenario trajectory.
    ///
    /// Deterministic for a given `(seed, num_points)` pair.
    pub fn generate(&self, seed: u64, num_points: usize) -> Trajectory {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut centerline = Vec::with_capacity(num_points);
        let mut velocities = Vec::with_capacity(num_points);
        for i in 0..num_points {
            let x = i as f64 * POINT_SPACING_M;
            let frac = if num_points > 1 {
                i as f64 / (num_points - 1) as f64
            } else {
                0.0
            };
            let (y, v) = match self {
                ScenarioId::StraightRun => (0.0, 8.0),
                ScenarioId::LaneChange => {
                    // Smoothstep into the adjacent lane across the middle third.
                    let t = ((frac - 0.33) / 0.34).clamp(0.0, 1.0);
                    (3.5 * t * t * (3.0 - 2.0 * t), 6.0)
                }
                ScenarioId::StopAndGo => {
                    // Triangle speed profile with a full stop at the midpoint.
                    let v = if frac < 0.5 {
                        8.0 * (1.0 - 2.0 * frac)
                    } else {
                        8.0 * (2.0 * frac - 1.0)
                    };
                    (0.0, v)
                }
                ScenarioId::Serpentine => {
                    (2.5 * (x / 8.0).sin(), 2.0 + 1.5 * (x / 16.0).cos())
                }
            };
            let jitter = rng.gen_range(-0.02..0.02);
            centerline.push((x, y + jitter));
            velocities.push(v);
        }

        let mut points = Vec::with_capacity(num_points);
        for i in 0..num_points {
            let (x, y) = centerline[i];
            // Heading from the forward neighbor, backward at the tail.
            let ((ax, ay), (bx, by)) = if i + 1 < num_points {
                (centerline[i], centerline[i + 1])
            } else if i > 0 {
                (centerline[i - 1], centerline[i])
            } else {
                (centerline[i], centerline[i])
            };
            let yaw = (by - ay).atan2(bx - ax);
            let rotation = UnitQuaternion::from_euler_angles(0.0, 0.0, yaw);
            let q = rotation.as_ref();

            let elapsed = i as u64 * TICK_NANOS;
            points.push(TrajectoryPoint {
                time_from_start: Duration {
                    sec: (elapsed / 1_000_000_000) as i32,
                    nsec: (elapsed % 1_000_000_000) as u32,
                },
                pose: Pose {
                    position: Point3::new(x, y, 0.0),
                    orientation: Quaternion {
                        x: q.i,
                        y: q.j,
                        z: q.k,
                        w: q.w,
                    },
                },
                longitudinal_velocity_mps: velocities[i],
                ..Default::default()
            });
        }

        Trajectory {
            header: Header {
                stamp: Time { sec: 0, nsec: 0 },
                frame_id: "map".to_string(),
            },
            points,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "straight_run" | "straightrun" | "straight" => Ok(ScenarioId::StraightRun),
            "lane_change" | "lanechange" => Ok(ScenarioId::LaneChange),
            "stop_and_go" | "stopandgo" => Ok(ScenarioId::StopAndGo),
            "serpentine" => Ok(ScenarioId::Serpentine),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}
