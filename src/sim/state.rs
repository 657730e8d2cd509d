//! Environment state and core entity types
//!
//! The board exclusively owns every spatial entity. Walls and holes are
//! plain immutable data; nothing holds a reference back to its board.

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use super::layout::{GridLayout, LayoutError, CELL_BALL_START, CELL_EMPTY, CELL_HOLE};
use super::tick::TiltInput;
use crate::config::{ControlMode, EnvConfig};
use crate::consts::{
    BALL_DIAMETER, CONTINUOUS_TILT_GAIN, DISCRETE_STEPS_FROM_CENTER, HOLE_CAPTURE_RADIUS,
    MAX_X_ROTATION, MAX_Y_ROTATION, RL_TILT_GAIN,
};

/// An immutable obstacle occupying one grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub row: usize,
    pub col: usize,
    /// Corner-cut shape id, 0..=13. Raw layout codes 6 and 7 alias to the
    /// full block. Only the full block takes part in collision; the rest
    /// matter to renderers alone.
    pub shape_variant: u8,
    /// World-space position of the cell
    pub pos: Vec2,
}

impl Wall {
    fn new(row: usize, col: usize, code: u8, pos: Vec2) -> Self {
        let code = if code == 6 || code == 7 { 1 } else { code };
        Self {
            row,
            col,
            shape_variant: code - 1,
            pos,
        }
    }

    /// Whether this wall fills its whole cell and blocks axis motion
    #[inline]
    pub fn is_full_block(&self) -> bool {
        self.shape_variant == 0
    }
}

/// The goal pocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hole {
    pub row: usize,
    pub col: usize,
    pub pos: Vec2,
}

impl Hole {
    /// Capture test. The threshold is inclusive: a ball center exactly at
    /// the capture radius counts as captured.
    pub fn is_captured(&self, ball_pos: Vec2) -> bool {
        self.pos.distance(ball_pos) <= HOLE_CAPTURE_RADIUS
    }
}

/// The single dynamic body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_DIAMETER / 2.0,
        }
    }
}

/// Wall entry of a render snapshot
#[derive(Debug, Clone, Serialize)]
pub struct WallPose {
    pub pos: Vec2,
    pub shape_variant: u8,
}

/// Read-only pose snapshot for renderers. Derived data; carries no physics
/// semantics.
#[derive(Debug, Clone, Serialize)]
pub struct BoardPose {
    pub tilt: Mat4,
    pub ball: Vec2,
    pub holes: Vec<Vec2>,
    pub walls: Vec<WallPose>,
}

/// The tilting board: tilt state plus the maze entities it owns
#[derive(Debug, Clone)]
pub struct Board {
    layout: GridLayout,
    walls: Vec<Wall>,
    /// Row-major index from grid cell to `walls`
    wall_grid: Vec<Option<u16>>,
    holes: Vec<Hole>,
    ball: Ball,
    start_pos: Vec2,

    pub rot_x: f32,
    pub rot_y: f32,
    /// Angular velocity per rotation axis; zeroed the instant an axis
    /// clamps at its bound
    pub angular_vel: Vec2,
    gain_rot_x: f32,
    gain_rot_y: f32,
}

impl Board {
    /// Assemble a board from a validated layout.
    pub fn new(layout: GridLayout, config: EnvConfig) -> Self {
        let base_gain = match config.control {
            ControlMode::Discrete => MAX_X_ROTATION / DISCRETE_STEPS_FROM_CENTER,
            ControlMode::Continuous => CONTINUOUS_TILT_GAIN,
        };
        let gain_rot_x = if config.rl_mode {
            RL_TILT_GAIN
        } else {
            base_gain
        };

        let mut walls = Vec::new();
        let mut wall_grid = vec![None; layout.rows() * layout.cols()];
        let mut holes = Vec::new();
        let mut start_pos = Vec2::ZERO;
        for row in 0..layout.rows() {
            for col in 0..layout.cols() {
                let code = layout.cell(row, col).unwrap_or(CELL_EMPTY);
                let pos = layout.world_pos(row, col);
                match code {
                    CELL_EMPTY => {}
                    CELL_HOLE => holes.push(Hole { row, col, pos }),
                    CELL_BALL_START => start_pos = pos,
                    _ => {
                        wall_grid[row * layout.cols() + col] = Some(walls.len() as u16);
                        walls.push(Wall::new(row, col, code, pos));
                    }
                }
            }
        }

        log::info!(
            "Board built: {}x{} grid, {} walls, {} hole(s)",
            layout.rows(),
            layout.cols(),
            walls.len(),
            holes.len()
        );

        Self {
            layout,
            walls,
            wall_grid,
            holes,
            ball: Ball::at(start_pos),
            start_pos,
            rot_x: 0.0,
            rot_y: 0.0,
            angular_vel: Vec2::ZERO,
            gain_rot_x,
            gain_rot_y: base_gain,
        }
    }

    /// Validate raw cell codes and build the board in one go.
    pub fn from_cells(cells: Vec<Vec<u8>>, config: EnvConfig) -> Result<Self, LayoutError> {
        Ok(Self::new(GridLayout::new(cells)?, config))
    }

    /// Apply one tilt command per axis. Commands are clamped, never
    /// rejected; an axis that reaches its rotation bound stops there with
    /// zero angular velocity until the command reverses.
    pub fn apply_tilt(&mut self, input: TiltInput) {
        let (cmd_x, cmd_y) = input.commands();

        self.angular_vel.x = self.gain_rot_x * cmd_x;
        self.rot_x += self.angular_vel.x;
        if self.rot_x >= MAX_X_ROTATION {
            self.rot_x = MAX_X_ROTATION;
            self.angular_vel.x = 0.0;
        } else if self.rot_x <= -MAX_X_ROTATION {
            self.rot_x = -MAX_X_ROTATION;
            self.angular_vel.x = 0.0;
        }

        self.angular_vel.y = self.gain_rot_y * cmd_y;
        self.rot_y += self.angular_vel.y;
        if self.rot_y >= MAX_Y_ROTATION {
            self.rot_y = MAX_Y_ROTATION;
            self.angular_vel.y = 0.0;
        } else if self.rot_y <= -MAX_Y_ROTATION {
            self.rot_y = -MAX_Y_ROTATION;
            self.angular_vel.y = 0.0;
        }
    }

    /// Level the board and put the ball back on its start cell.
    pub fn reset(&mut self) {
        self.ball = Ball::at(self.start_pos);
        self.rot_x = 0.0;
        self.rot_y = 0.0;
        self.angular_vel = Vec2::ZERO;
    }

    /// Render-facing tilt transform; a pure function of the two rotation
    /// angles. The physics never reads it.
    pub fn tilt_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rot_y) * Mat4::from_rotation_x(self.rot_x)
    }

    /// Read-only pose snapshot for a renderer
    pub fn pose(&self) -> BoardPose {
        BoardPose {
            tilt: self.tilt_matrix(),
            ball: self.ball.pos,
            holes: self.holes.iter().map(|h| h.pos).collect(),
            walls: self
                .walls
                .iter()
                .map(|w| WallPose {
                    pos: w.pos,
                    shape_variant: w.shape_variant,
                })
                .collect(),
        }
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[inline]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    /// Current ball center, board-local coordinates
    #[inline]
    pub fn ball_position(&self) -> Vec2 {
        self.ball.pos
    }

    #[inline]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    #[inline]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    #[inline]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub(crate) fn wall_at(&self, row: usize, col: usize) -> Option<&Wall> {
        let idx = (*self.wall_grid.get(row * self.layout.cols() + col)?)?;
        self.walls.get(idx as usize)
    }
}
