//! Demo-mode controller
//!
//! Picks inputs for the current frame: starts a session from Ready, restarts
//! after a crash, and while active flaps whenever the bird is predicted to
//! drop below an aim line inside the next gap.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Frames of velocity to look ahead when predicting the bird's height
const LOOKAHEAD_FRAMES: f32 = 4.0;
/// Where in the gap to aim (fraction of the gap height from its top)
const AIM_FRACTION: f32 = 0.7;

/// Height the bird should stay above, for the pipe it has not cleared yet
pub fn aim_line(state: &GameState) -> f32 {
    let bird_left = state.bird.x - state.bird.width / 2.0;
    state
        .pipes
        .iter()
        .find(|p| p.right() > bird_left)
        .map(|p| p.gap_top + p.gap_height * AIM_FRACTION)
        .unwrap_or(state.ground_y() / 2.0)
}

/// Choose the input for this frame
pub fn decide(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Ready => TickInput::FLAP,
        GamePhase::Ended => TickInput::RESTART,
        GamePhase::Active => {
            let predicted = state.bird.y + state.bird.vy * LOOKAHEAD_FRAMES;
            TickInput {
                flap: predicted > aim_line(state),
                restart: false,
            }
        }
    }
}
