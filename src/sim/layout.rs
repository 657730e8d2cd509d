//! Maze grid layout
//!
//! A layout is a rectangular grid of small integer cell codes describing
//! walls, the goal pocket and the ball's start cell. Validation happens once
//! at construction; the grid is immutable afterwards. Layouts deserialize
//! from plain JSON arrays so controllers can ship custom mazes.

use std::error::Error;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::CELL_SIZE;

/// Empty, passable cell
pub const CELL_EMPTY: u8 = 0;
/// Full-block wall
pub const CELL_WALL: u8 = 1;
/// Goal pocket
pub const CELL_HOLE: u8 = 2;
/// Ball start cell (exactly one per layout)
pub const CELL_BALL_START: u8 = 3;
/// Highest valid wall shape code
pub const CELL_MAX_CODE: u8 = 14;

/// Validation failure when constructing a [`GridLayout`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The grid is empty or its rows have differing lengths
    NotRectangular,
    /// No cell carries the ball-start code
    NoBallStart,
    /// More than one cell carries the ball-start code
    MultipleBallStarts,
    /// No cell carries the hole code
    NoHole,
    /// A cell code outside the known set
    UnknownCell { row: usize, col: usize, code: u8 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NotRectangular => write!(f, "layout is empty or not rectangular"),
            LayoutError::NoBallStart => write!(f, "layout has no ball-start cell"),
            LayoutError::MultipleBallStarts => write!(f, "layout has more than one ball-start cell"),
            LayoutError::NoHole => write!(f, "layout has no hole cell"),
            LayoutError::UnknownCell { row, col, code } => {
                write!(f, "unknown cell code {code} at row {row}, col {col}")
            }
        }
    }
}

impl Error for LayoutError {}

/// Validated, immutable maze grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct GridLayout {
    cells: Vec<Vec<u8>>,
    rows: usize,
    cols: usize,
    ball_start: (usize, usize),
    holes: Vec<(usize, usize)>,
}

impl GridLayout {
    /// Validate a grid of cell codes.
    ///
    /// Requires a non-empty rectangular grid, exactly one ball-start cell,
    /// at least one hole cell, and no unknown codes.
    pub fn new(cells: Vec<Vec<u8>>) -> Result<Self, LayoutError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 || cells.iter().any(|row| row.len() != cols) {
            return Err(LayoutError::NotRectangular);
        }

        let mut ball_start = None;
        let mut holes = Vec::new();
        for (row, row_cells) in cells.iter().enumerate() {
            for (col, &code) in row_cells.iter().enumerate() {
                match code {
                    CELL_EMPTY | CELL_WALL => {}
                    CELL_HOLE => holes.push((row, col)),
                    CELL_BALL_START => {
                        if ball_start.replace((row, col)).is_some() {
                            return Err(LayoutError::MultipleBallStarts);
                        }
                    }
                    4..=CELL_MAX_CODE => {}
                    _ => return Err(LayoutError::UnknownCell { row, col, code }),
                }
            }
        }

        let ball_start = ball_start.ok_or(LayoutError::NoBallStart)?;
        if holes.is_empty() {
            return Err(LayoutError::NoHole);
        }

        Ok(Self {
            cells,
            rows,
            cols,
            ball_start,
            holes,
        })
    }

    /// The standard 15x15 maze the environment ships with
    pub fn default_maze() -> Self {
        let cells = DEFAULT_MAZE.iter().map(|row| row.to_vec()).collect();
        Self::new(cells).expect("bundled default maze is valid")
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell code at a grid position, `None` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Grid position of the single ball-start cell
    pub fn ball_start(&self) -> (usize, usize) {
        self.ball_start
    }

    /// Grid positions of every hole cell
    pub fn holes(&self) -> &[(usize, usize)] {
        &self.holes
    }

    /// World-space position of a cell, board-centered coordinates
    pub fn world_pos(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            CELL_SIZE * col as f32 - self.cols as f32 * CELL_SIZE / 2.0,
            CELL_SIZE * row as f32 - self.rows as f32 * CELL_SIZE / 2.0,
        )
    }

    /// Grid cell under a world-space point as `(col, row)`; indices are
    /// signed because probe points may fall outside the grid
    pub fn cell_under(&self, x: f32, y: f32) -> (i64, i64) {
        let col = ((x + self.cols as f32 * CELL_SIZE / 2.0) / CELL_SIZE).floor() as i64;
        let row = ((y + self.rows as f32 * CELL_SIZE / 2.0) / CELL_SIZE).floor() as i64;
        (col, row)
    }
}

impl TryFrom<Vec<Vec<u8>>> for GridLayout {
    type Error = LayoutError;

    fn try_from(cells: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<GridLayout> for Vec<Vec<u8>> {
    fn from(layout: GridLayout) -> Self {
        layout.cells
    }
}

/// The standard maze: perimeter ring, a corner-cut diagonal channel across
/// the middle, a couple of interior pillars, hole top-right, start
/// bottom-left.
const DEFAULT_MAZE: [[u8; 15]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 10, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 12, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];
