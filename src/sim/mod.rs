//! Deterministic maze simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One `step` call advances the whole simulation by exactly one tick
//! - No RNG, no wall-clock time, no platform dependencies
//! - Controllers and renderers only ever see value snapshots

pub mod collision;
pub mod frontier;
pub mod layout;
pub mod state;
pub mod tick;

pub use layout::{GridLayout, LayoutError};
pub use state::{Ball, Board, BoardPose, Hole, Wall, WallPose};
pub use tick::{step, AxisCommand, StepResult, TiltInput};
