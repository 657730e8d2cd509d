//! Headless episode runner
//!
//! Drives the environment with a scripted controller that tilts toward the
//! hole, the way an experiment loop would drive it with a learned policy.
//! Usage: `tilt-maze [layout.json] [config.json]`

use std::path::Path;
use std::process::ExitCode;

use glam::Vec2;

use tilt_maze::config::EnvConfig;
use tilt_maze::sim::{step, AxisCommand, Board, GridLayout, TiltInput};

/// Steps allowed per episode before it counts as a timeout
const MAX_EPISODE_STEPS: u32 = 3000;
/// Episodes to run back to back
const EPISODES: u32 = 3;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let layout = match args.next() {
        Some(path) => match load_layout(Path::new(&path)) {
            Ok(layout) => layout,
            Err(err) => {
                log::error!("failed to load layout {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => GridLayout::default_maze(),
    };
    let config = match args.next() {
        Some(path) => match EnvConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load config {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => EnvConfig::default(),
    };

    let mut board = Board::new(layout, config);
    let mut reached = 0;
    for episode in 1..=EPISODES {
        board.reset();
        let outcome = run_episode(&mut board);
        if outcome.reached_goal {
            reached += 1;
            log::info!(
                "episode {episode}: goal reached in {} steps ({} collisions)",
                outcome.steps,
                outcome.collisions
            );
        } else {
            log::info!(
                "episode {episode}: timeout after {} steps at ({:.1}, {:.1})",
                outcome.steps,
                outcome.final_pos.x,
                outcome.final_pos.y
            );
        }
    }
    log::info!("{reached}/{EPISODES} episodes reached the goal");

    ExitCode::SUCCESS
}

fn load_layout(path: &Path) -> Result<GridLayout, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    let layout = serde_json::from_str(&json)?;
    log::info!("Loaded layout from {}", path.display());
    Ok(layout)
}

struct EpisodeOutcome {
    steps: u32,
    reached_goal: bool,
    collisions: u32,
    final_pos: Vec2,
}

fn run_episode(board: &mut Board) -> EpisodeOutcome {
    let target = board.holes()[0].pos;
    let mut collisions = 0;
    for n in 1..=MAX_EPISODE_STEPS {
        let input = steer(board.ball_position(), target);
        let result = step(board, input);
        if result.collided_x || result.collided_y {
            collisions += 1;
        }
        if result.goal_reached {
            return EpisodeOutcome {
                steps: n,
                reached_goal: true,
                collisions,
                final_pos: result.position,
            };
        }
    }
    EpisodeOutcome {
        steps: MAX_EPISODE_STEPS,
        reached_goal: false,
        collisions,
        final_pos: board.ball_position(),
    }
}

/// Greedy discrete policy: tilt each axis so gravity pulls toward the
/// target. X acceleration follows the negative y rotation and y
/// acceleration the positive x rotation, hence the crossed commands.
fn steer(ball: Vec2, target: Vec2) -> TiltInput {
    let delta = target - ball;
    let y = if delta.x > 0.0 {
        AxisCommand::Decrease
    } else if delta.x < 0.0 {
        AxisCommand::Increase
    } else {
        AxisCommand::None
    };
    let x = if delta.y > 0.0 {
        AxisCommand::Increase
    } else if delta.y < 0.0 {
        AxisCommand::Decrease
    } else {
        AxisCommand::None
    };
    TiltInput::Discrete { x, y }
}
