//! Tilt Maze - a ball-in-a-maze physics environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tilt state, ball integration, collisions)
//! - `config`: Environment configuration (control mode, RL gain flag)
//!
//! The simulation is headless. A controller feeds [`sim::TiltInput`]s into
//! [`sim::step`] and reads back [`sim::StepResult`]s; a renderer, if any,
//! consumes read-only [`sim::BoardPose`] snapshots. Neither can mutate the
//! board directly.

pub mod config;
pub mod sim;

pub use config::{ControlMode, EnvConfig};
pub use sim::{Board, GridLayout, StepResult, TiltInput};

use glam::Vec2;

/// Physics tuning constants
pub mod consts {
    /// Real-world edge length of one grid cell
    pub const CELL_SIZE: f32 = 43.615993;
    /// Ball diameter - equal to the cell size, the ball fills a corridor
    pub const BALL_DIAMETER: f32 = 43.615993;

    /// Rotation bound per axis (radians)
    pub const MAX_X_ROTATION: f32 = 0.5;
    pub const MAX_Y_ROTATION: f32 = 0.5;
    /// Discrete tilt steps from level to the rotation bound
    pub const DISCRETE_STEPS_FROM_CENTER: f32 = 5.0;
    /// Control-to-angle gain in continuous mode
    pub const CONTINUOUS_TILT_GAIN: f32 = 0.03;
    /// Reduced x-rotation gain when the RL flag is set
    pub const RL_TILT_GAIN: f32 = 0.01;

    /// Gravity resolved onto the tilted plane: accel = gain * rotation
    pub const TILT_ACCEL_GAIN: f32 = 0.1;
    /// Per-step integration gain; the physics rate is per tick, not per second
    pub const INTEGRATION_GAIN: f32 = 1.5;

    /// Velocity multiplier on an inelastic bounce
    pub const DAMPING_FACTOR: f32 = 0.3;
    /// Axis speeds below this come to rest on contact instead of bouncing
    pub const REST_SPEED: f32 = 0.1;
    /// Slow-contact threshold for the frontier redirection formulas
    pub const SLIDE_SPEED: f32 = 1.5;

    /// Ball-center distance at which a hole captures the ball (inclusive)
    pub const HOLE_CAPTURE_RADIUS: f32 = CELL_SIZE / 2.0;
}

/// Polar angle of a point from the board center, in degrees.
///
/// The right half-plane maps to [-90, 90] and the left half-plane to
/// (90, 270). The exact center has no direction and yields 0.
#[inline]
pub fn angle_from_center(p: Vec2) -> f32 {
    if p.x == 0.0 && p.y == 0.0 {
        return 0.0;
    }
    if p.x >= 0.0 {
        (p.y / p.x).atan().to_degrees()
    } else {
        180.0 + (p.y / p.x).atan().to_degrees()
    }
}

/// Perpendicular distance from point `p0` to the infinite line through `p1`
/// and `p2`. A zero-length segment defines no line and yields infinity, so
/// it can never register a contact.
#[inline]
pub fn distance_from_line(p2: Vec2, p1: Vec2, p0: Vec2) -> f32 {
    let seg = p2 - p1;
    let len = seg.length();
    if len == 0.0 {
        return f32::INFINITY;
    }
    seg.perp_dot(p1 - p0).abs() / len
}
