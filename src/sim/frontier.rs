//! Diagonal corner-cut boundary resolution
//!
//! The maze frontier is axis-aligned except for two opposite corners cut at
//! 45 degrees, forming triangular wedges mirrored about the board center.
//! When the ball's tentative position gets within a radius of a wedge's
//! cutting line, its velocity is redirected by angle- and quadrant-dependent
//! trigonometric projections that encode the exact shape of the cut. The
//! tentative point is first classified into a closed set of named regions,
//! then one resolution function per region applies that region's formulas.
//!
//! Angles here are polar degrees from the board center (see
//! [`angle_from_center`]); a handful of projection terms deliberately mix
//! the degree value into a radian argument, matching the observed cut
//! geometry - marked at each site.

use glam::Vec2;

use crate::consts::{BALL_DIAMETER, CELL_SIZE, DAMPING_FACTOR, SLIDE_SPEED};
use crate::{angle_from_center, distance_from_line};

/// Where a tentative position sits relative to a wedge's cutting line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrontierRegion {
    /// Doorway through the frontier; motion passes unimpeded
    Opening,
    /// Within contact distance but on the open side of the corner
    Clear,
    /// First named corner block of the wedge
    CornerBlockOne,
    /// Second named corner block of the wedge
    CornerBlockTwo,
    /// Anywhere else along the cut; resolved by velocity quadrant
    General,
}

/// Resolve the frontier for a tentative next position.
///
/// The upper wedge covers polar angles in [-45, 135] degrees and the lower
/// wedge takes everything else, so the two ranges partition the full circle.
/// Openings are classified from the incoming velocity, before any
/// redirection is applied.
pub(crate) fn resolve_frontier(vel: &mut Vec2, next: Vec2) {
    let theta = angle_from_center(next);
    if (-45.0..=135.0).contains(&theta) {
        resolve_upper(vel, next, theta);
    } else {
        resolve_lower(vel, next, theta);
    }
}

fn resolve_upper(vel: &mut Vec2, next: Vec2, theta: f32) {
    // cutting line of the upper wedge, one cell out from center
    let p1 = Vec2::new(0.0, CELL_SIZE);
    let p2 = Vec2::new(CELL_SIZE, 0.0);
    if distance_from_line(p2, p1, next) > BALL_DIAMETER / 2.0 {
        return;
    }
    match classify_upper(next, *vel, theta) {
        FrontierRegion::Opening | FrontierRegion::Clear => {}
        FrontierRegion::CornerBlockTwo => {
            if vel.y < 0.0 {
                vel.y *= -DAMPING_FACTOR;
                vel.x += vel.y * theta.to_radians().sin();
            }
        }
        FrontierRegion::CornerBlockOne => {
            // both vertical directions take the same redirection
            if vel.x < 0.0 {
                vel.x *= -DAMPING_FACTOR;
                vel.y += vel.x * theta.to_radians().sin();
            }
        }
        FrontierRegion::General => general_upper(vel, theta),
    }
}

fn classify_upper(next: Vec2, vel: Vec2, theta: f32) -> FrontierRegion {
    let r = BALL_DIAMETER / 2.0;
    // doorway check: heading down-right across the cut
    if vel.x > 0.0 && vel.y < 0.0 && theta >= 90.0 {
        if next.x - BALL_DIAMETER / 3.0 > -CELL_SIZE / 2.0 {
            return FrontierRegion::Opening;
        }
        if next.x - r < -CELL_SIZE / 2.0 && next.y - r <= CELL_SIZE * 1.5 {
            return FrontierRegion::Opening;
        }
    }
    if -CELL_SIZE / 2.0 <= next.x - r && -CELL_SIZE / 2.0 <= next.y - r {
        FrontierRegion::Clear
    } else if next.x - r <= CELL_SIZE * 1.5 && next.y - r < -CELL_SIZE / 2.0 {
        FrontierRegion::CornerBlockTwo
    } else if next.x - r < -r && next.y - r <= 48.0 {
        FrontierRegion::CornerBlockOne
    } else {
        FrontierRegion::General
    }
}

fn general_upper(vel: &mut Vec2, theta: f32) {
    let rad = theta.to_radians();
    if vel.x > 0.0 && vel.y < 0.0 {
        // sliding down-right along the cut
        if theta > 90.0 {
            vel.x = 0.4 * vel.x + vel.y * (-rad).cos();
            vel.y *= rad.cos() * (90.0 - theta).to_radians().sin();
        } else {
            vel.y *= (-rad).cos() * (-rad).sin();
            vel.x += vel.y * (theta - 90.0).to_radians().sin();
        }
    } else if vel.x <= 0.0 && vel.y <= 0.0 {
        // heading down-left
        if theta > 90.0 && vel.length() <= SLIDE_SPEED {
            vel.x = vel.y * rad.cos();
        } else if theta < 0.0 && vel.length() <= SLIDE_SPEED {
            vel.x = vel.y * (180.0 - theta).to_radians().cos();
            vel.y *= (-rad).sin();
        } else {
            vel.x *= -DAMPING_FACTOR;
            vel.y *= -DAMPING_FACTOR;
        }
    } else if vel.x <= 0.0 && vel.y >= 0.0 {
        // climbing up-left along the cut
        if theta >= 0.0 {
            vel.x *= (90.0 - theta).to_radians().sin() * rad.cos();
            vel.y += vel.x * rad.cos();
        } else {
            vel.x *= rad.sin() * (90.0 - theta).to_radians().cos();
            // degree/radian mix kept from the cut geometry
            vel.y += vel.x * (90.0 - rad).cos();
        }
    }
}

fn resolve_lower(vel: &mut Vec2, next: Vec2, theta: f32) {
    // cutting line of the lower wedge, mirrored about center
    let p1 = Vec2::new(0.0, -CELL_SIZE);
    let p2 = Vec2::new(-CELL_SIZE, 0.0);
    if distance_from_line(p2, p1, next) > BALL_DIAMETER / 2.0 {
        return;
    }
    match classify_lower(next, *vel, theta) {
        FrontierRegion::Opening | FrontierRegion::Clear => {}
        FrontierRegion::CornerBlockTwo => {
            if vel.x > 0.0 {
                vel.x *= -DAMPING_FACTOR;
                vel.y += vel.x * theta.to_radians().cos();
            }
        }
        FrontierRegion::CornerBlockOne => {
            if vel.y > 0.0 {
                vel.y *= -DAMPING_FACTOR;
                vel.x += vel.y * (180.0 - theta).to_radians().cos();
            }
        }
        FrontierRegion::General => general_lower(vel, theta),
    }
}

fn classify_lower(next: Vec2, vel: Vec2, theta: f32) -> FrontierRegion {
    let r = BALL_DIAMETER / 2.0;
    // doorway check: heading down-right out of the wedge
    if vel.x > 0.0 && vel.y < 0.0 && theta >= 180.0 {
        if next.x + BALL_DIAMETER / 3.0 > CELL_SIZE / 2.0 {
            return FrontierRegion::Opening;
        }
        if next.x + r > CELL_SIZE / 2.0 && next.y - r <= 0.0 {
            return FrontierRegion::Opening;
        }
    }
    if next.x + r <= CELL_SIZE / 2.0 && next.y + r <= CELL_SIZE / 2.0 {
        FrontierRegion::Clear
    } else if CELL_SIZE / 2.0 < next.x + r && -CELL_SIZE * 1.5 <= next.y + r {
        FrontierRegion::CornerBlockTwo
    } else if -CELL_SIZE * 1.5 <= next.x + r && CELL_SIZE / 2.0 < next.y + r {
        FrontierRegion::CornerBlockOne
    } else {
        FrontierRegion::General
    }
}

fn general_lower(vel: &mut Vec2, theta: f32) {
    let rad = theta.to_radians();
    if vel.x < 0.0 && vel.y > 0.0 {
        if theta < -45.0 {
            vel.y *= (-rad).sin() * rad.cos();
            // degree/radian mix kept from the cut geometry
            vel.x += vel.y * (-90.0 - rad).sin();
        } else {
            vel.y *= rad.sin() * (180.0 - theta).to_radians().cos();
            vel.x += vel.y * (-rad).cos();
        }
    } else if vel.x >= 0.0 && vel.y >= 0.0 {
        // two gated redirections run in sequence; the second reads the
        // first's output and owns the fallback bounce
        if theta <= -45.0 && vel.length() <= SLIDE_SPEED {
            vel.x = vel.y * rad.cos();
            vel.y *= (-rad).sin();
        }
        if theta <= 180.0 && vel.length() <= SLIDE_SPEED {
            vel.y = vel.x * rad.cos();
            vel.x *= rad.sin();
        } else {
            vel.x *= -DAMPING_FACTOR;
            vel.y *= DAMPING_FACTOR;
        }
    } else if vel.x >= 0.0 && vel.y <= 0.0 {
        if theta < -45.0 {
            vel.x *= (90.0 - theta).to_radians().sin() * rad.cos();
            vel.y += vel.x * rad.sin();
        } else {
            vel.y = vel.x * rad.cos();
            vel.x *= rad.sin();
        }
    }
}
