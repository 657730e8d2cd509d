//! Per-step simulation advance
//!
//! One `step` call applies the controller's tilt command, integrates the
//! ball, resolves collisions and reports the outcome. There is no hidden
//! state between calls; a step always completes in bounded time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::axis_bounce;
use super::frontier::resolve_frontier;
use super::state::Board;
use crate::consts::{BALL_DIAMETER, INTEGRATION_GAIN, TILT_ACCEL_GAIN};

/// Signed unit command for one tilt axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisCommand {
    #[default]
    None,
    Increase,
    Decrease,
}

impl AxisCommand {
    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            AxisCommand::None => 0.0,
            AxisCommand::Increase => 1.0,
            AxisCommand::Decrease => -1.0,
        }
    }
}

/// Two-axis tilt command for a single step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TiltInput {
    /// Unit steps per axis
    Discrete { x: AxisCommand, y: AxisCommand },
    /// Real-valued commands, clamped to [-1, 1]
    Continuous { x: f32, y: f32 },
}

impl Default for TiltInput {
    fn default() -> Self {
        TiltInput::Discrete {
            x: AxisCommand::None,
            y: AxisCommand::None,
        }
    }
}

impl TiltInput {
    /// Collapse to one signed unit command per axis. Out-of-range
    /// continuous values are clamped, never rejected.
    pub fn commands(self) -> (f32, f32) {
        match self {
            TiltInput::Discrete { x, y } => (x.as_f32(), y.as_f32()),
            TiltInput::Continuous { x, y } => (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)),
        }
    }

    /// Decode a discrete controller's action index into a two-axis command.
    /// Indices outside the action table yield `None`.
    pub fn from_action_index(action: u8) -> Option<Self> {
        let (x, y) = match action {
            1 | 13 => (1, 0),
            2 | 14 => (-1, 0),
            4 | 7 => (0, 1),
            5 => (1, 1),
            6 => (-1, 1),
            8 | 11 => (0, -1),
            9 => (1, -1),
            10 => (-1, -1),
            _ => return None,
        };
        let decode = |v: i8| match v {
            1 => AxisCommand::Increase,
            -1 => AxisCommand::Decrease,
            _ => AxisCommand::None,
        };
        Some(TiltInput::Discrete {
            x: decode(x),
            y: decode(y),
        })
    }
}

/// Outcome of one simulation step; constructed fresh each step, consumed by
/// the controller and discarded
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepResult {
    /// Ball center after the position commit
    pub position: Vec2,
    /// The x axis hit the rim or a full-block wall this step
    pub collided_x: bool,
    /// The y axis hit the rim or a full-block wall this step
    pub collided_y: bool,
    /// Ball captured by a hole after the commit
    pub goal_reached: bool,
}

/// Advance the whole simulation by exactly one tick.
pub fn step(board: &mut Board, input: TiltInput) -> StepResult {
    board.apply_tilt(input);
    let (collided_x, collided_y) = integrate_ball(board);

    let position = board.ball_position();
    let goal_reached = board.holes().iter().any(|h| h.is_captured(position));
    if goal_reached {
        log::debug!("goal reached at ({:.1}, {:.1})", position.x, position.y);
    }

    StepResult {
        position,
        collided_x,
        collided_y,
        goal_reached,
    }
}

/// One integration pass: tilt-induced acceleration, lookahead grid probes,
/// axis bounces, frontier resolution, position commit.
fn integrate_ball(board: &mut Board) -> (bool, bool) {
    let ball = *board.ball();

    // gravity resolved onto the tilted plane; x follows the y tilt and
    // vice versa
    let accel = Vec2::new(-TILT_ACCEL_GAIN * board.rot_y, TILT_ACCEL_GAIN * board.rot_x);
    let mut vel = ball.vel + accel * INTEGRATION_GAIN;

    let next = ball.pos + vel;
    let probe_x = next.x + BALL_DIAMETER / 2.0 * sign(vel.x);
    let probe_y = next.y + BALL_DIAMETER / 2.0 * sign(vel.y);

    // each axis probes ahead on its own, holding the other coordinate
    let collided_x = board.probe_square(probe_x, ball.pos.y);
    let collided_y = board.probe_square(ball.pos.x, probe_y);

    if collided_x {
        vel.x = axis_bounce(vel.x);
    }
    if collided_y {
        vel.y = axis_bounce(vel.y);
    }

    resolve_frontier(&mut vel, next);

    let ball = board.ball_mut();
    ball.vel = vel;
    ball.pos += vel;
    (collided_x, collided_y)
}

/// Sign with a zero branch: a still axis gets no lookahead bias
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use crate::consts::DAMPING_FACTOR;
    use crate::sim::layout::GridLayout;

    fn default_board() -> Board {
        Board::new(GridLayout::default_maze(), EnvConfig::default())
    }

    /// Empty walled arena with the start at (2,2) and the hole two cells
    /// to its right along an open corridor.
    fn corridor_board() -> Board {
        let mut cells = vec![vec![0u8; 15]; 15];
        for i in 0..15 {
            cells[0][i] = 1;
            cells[14][i] = 1;
            cells[i][0] = 1;
            cells[i][14] = 1;
        }
        cells[2][2] = 3;
        cells[2][4] = 2;
        Board::from_cells(cells, EnvConfig::default()).unwrap()
    }

    #[test]
    fn test_corridor_run_reaches_goal_cleanly() {
        let mut board = corridor_board();
        // tilting y down accelerates the ball toward +x
        let input = TiltInput::Discrete {
            x: AxisCommand::None,
            y: AxisCommand::Decrease,
        };

        let mut captured_at = None;
        for n in 1..=500 {
            let result = step(&mut board, input);
            assert!(!result.collided_x, "unexpected x collision at step {n}");
            assert!(!result.collided_y, "unexpected y collision at step {n}");
            if result.goal_reached {
                captured_at = Some(n);
                break;
            }
        }
        let n = captured_at.expect("ball should reach the hole within 500 steps");
        assert!(n > 1);
    }

    #[test]
    fn test_head_on_bounce_damps_exactly() {
        let mut board = default_board();
        // aim straight at the full block in cell (3,3), fast enough to
        // bounce instead of rest
        board.ball_mut().pos = Vec2::new(-130.0, -180.0);
        board.ball_mut().vel = Vec2::new(-5.0, 0.0);

        let result = step(&mut board, TiltInput::default());
        assert!(result.collided_x);
        assert!(!result.collided_y);
        assert_eq!(board.ball().vel.x, -DAMPING_FACTOR * -5.0);
        assert_eq!(result.position.x, -130.0 + board.ball().vel.x);
    }

    #[test]
    fn test_slow_contact_comes_to_rest() {
        let mut board = default_board();
        board.ball_mut().pos = Vec2::new(-152.0, -180.0);
        board.ball_mut().vel = Vec2::new(-0.05, 0.0);

        let result = step(&mut board, TiltInput::default());
        assert!(result.collided_x);
        assert_eq!(board.ball().vel.x, 0.0);
        assert_eq!(result.position.x, -152.0);
    }

    #[test]
    fn test_rim_never_penetrated() {
        let mut board = default_board();
        let rim_inner_x = board.layout().world_pos(0, 1).x;
        let r = board.ball().radius;
        // drive into the left rim at full tilt for a long stretch
        let input = TiltInput::Discrete {
            x: AxisCommand::None,
            y: AxisCommand::Increase,
        };
        for _ in 0..400 {
            step(&mut board, input);
            let edge = board.ball_position().x - r;
            assert!(
                edge >= rim_inner_x - 0.5,
                "ball edge {edge} penetrated the rim at {rim_inner_x}"
            );
        }
    }

    #[test]
    fn test_determinism_bitwise() {
        let mut a = default_board();
        let mut b = default_board();
        let script = [
            TiltInput::Discrete {
                x: AxisCommand::Increase,
                y: AxisCommand::Decrease,
            },
            TiltInput::Continuous { x: 0.37, y: -0.91 },
            TiltInput::default(),
            TiltInput::Discrete {
                x: AxisCommand::Decrease,
                y: AxisCommand::Increase,
            },
        ];
        for n in 0..200 {
            let input = script[n % script.len()];
            let ra = step(&mut a, input);
            let rb = step(&mut b, input);
            assert_eq!(ra.position, rb.position);
            assert_eq!(ra.collided_x, rb.collided_x);
            assert_eq!(ra.collided_y, rb.collided_y);
        }
        assert_eq!(a.rot_x, b.rot_x);
        assert_eq!(a.rot_y, b.rot_y);
        assert_eq!(a.ball().vel, b.ball().vel);
    }

    #[test]
    fn test_action_index_decoding() {
        assert_eq!(
            TiltInput::from_action_index(5),
            Some(TiltInput::Discrete {
                x: AxisCommand::Increase,
                y: AxisCommand::Increase,
            })
        );
        assert_eq!(
            TiltInput::from_action_index(10),
            Some(TiltInput::Discrete {
                x: AxisCommand::Decrease,
                y: AxisCommand::Decrease,
            })
        );
        // 7 aliases 4, 13 aliases 1
        assert_eq!(
            TiltInput::from_action_index(7),
            TiltInput::from_action_index(4)
        );
        assert_eq!(
            TiltInput::from_action_index(13),
            TiltInput::from_action_index(1)
        );
        assert_eq!(TiltInput::from_action_index(0), None);
        assert_eq!(TiltInput::from_action_index(3), None);
        assert_eq!(TiltInput::from_action_index(12), None);
        assert_eq!(TiltInput::from_action_index(99), None);
    }

    #[test]
    fn test_zero_velocity_has_no_lookahead_bias() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.001), -1.0);
    }

    mod props {
        use super::*;
        use crate::consts::{MAX_X_ROTATION, MAX_Y_ROTATION};
        use crate::sim::collision::axis_bounce;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_rotation_stays_bounded(
                cmds in proptest::collection::vec(
                    (-1.5f32..=1.5, -1.5f32..=1.5),
                    1..200,
                )
            ) {
                let config = EnvConfig {
                    control: crate::config::ControlMode::Continuous,
                    rl_mode: false,
                };
                let mut board = Board::new(GridLayout::default_maze(), config);
                for (x, y) in cmds {
                    board.apply_tilt(TiltInput::Continuous { x, y });
                    prop_assert!(board.rot_x.abs() <= MAX_X_ROTATION);
                    prop_assert!(board.rot_y.abs() <= MAX_Y_ROTATION);
                    if board.rot_x.abs() == MAX_X_ROTATION {
                        prop_assert_eq!(board.angular_vel.x, 0.0);
                    }
                    if board.rot_y.abs() == MAX_Y_ROTATION {
                        prop_assert_eq!(board.angular_vel.y, 0.0);
                    }
                }
            }

            #[test]
            fn prop_axis_bounce_never_gains_energy(v in -1000.0f32..1000.0) {
                let out = axis_bounce(v);
                prop_assert!(out.abs() <= v.abs());
            }
        }
    }
}
