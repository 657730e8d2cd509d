//! Grid-cell collision probe and axis bounce response
//!
//! Each axis is tested independently against the cell under a lookahead
//! probe point. A probe collides when it leaves the playfield's interior
//! band or lands in a full-block wall cell; the response is an inelastic
//! bounce, or rest when the axis is already nearly still.

use crate::consts::{DAMPING_FACTOR, REST_SPEED};

use super::state::{Board, Wall};

impl Board {
    /// Probe the grid cell under a world-space point.
    ///
    /// The outermost ring of cells is the tray rim and always collides, so
    /// the valid band per axis is `1 ..= n - 2`.
    pub(crate) fn probe_square(&self, x: f32, y: f32) -> bool {
        let (col, row) = self.layout().cell_under(x, y);
        let cols = self.layout().cols() as i64;
        let rows = self.layout().rows() as i64;
        if col < 1 || row < 1 || col > cols - 2 || row > rows - 2 {
            return true;
        }
        self.wall_at(row as usize, col as usize)
            .is_some_and(Wall::is_full_block)
    }
}

/// Per-axis collision response: slow contacts come to rest, fast ones
/// invert and lose energy to the damping factor.
#[inline]
pub(crate) fn axis_bounce(v: f32) -> f32 {
    if v.abs() < REST_SPEED {
        0.0
    } else {
        -DAMPING_FACTOR * v
    }
}
