//! Per-frame simulation step
//!
//! `tick` advances the game by one display frame of `dt_ms` milliseconds.
//! Per-frame tuning values are scaled by `dt_ms / REFERENCE_FRAME_MS`, the
//! spawn timer counts raw milliseconds.

use rand::Rng;

use super::collision::first_collision;
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Pipe};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (space, click, tap). Also starts a session from Ready.
    pub flap: bool,
    /// Restart after a crash (R)
    pub restart: bool,
}

impl TickInput {
    pub const FLAP: TickInput = TickInput {
        flap: true,
        restart: false,
    };
    pub const RESTART: TickInput = TickInput {
        flap: false,
        restart: true,
    };
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

    state.frame += 1;
    state.time_ms += dt_ms;
    state.phase_ms += dt_ms;

    // Input-driven transitions
    match state.phase {
        GamePhase::Ready if input.flap => start_session(state),
        GamePhase::Active if input.flap => {
            state.bird.flap(state.tuning.flap_velocity);
            state.events.push(GameEvent::Flapped);
        }
        GamePhase::Ended if input.restart => restart(state),
        _ => {}
    }

    match state.phase {
        GamePhase::Ready => {
            let ground_y = state.ground_y();
            state.bird.bob(state.phase_ms, ground_y);
        }
        GamePhase::Active => step_active(state, dt_ms),
        // Frozen where the bird crashed
        GamePhase::Ended => {}
    }
}

/// Ready -> Active: fresh session with the initial upward impulse
fn start_session(state: &mut GameState) {
    state.reset_session();
    state.enter_phase(GamePhase::Active);
    state.bird.flap(state.tuning.flap_velocity);
    state.events.push(GameEvent::SessionStarted);
    state.events.push(GameEvent::Flapped);
    log::info!("Session started");
}

/// Ended -> Ready
fn restart(state: &mut GameState) {
    state.reset_session();
    state.enter_phase(GamePhase::Ready);
    state.events.push(GameEvent::Restarted);
    log::info!("Restarted, best {}", state.best);
}

/// Active -> Ended
fn end_session(state: &mut GameState, cause: CrashCause) {
    state.enter_phase(GamePhase::Ended);
    let new_best = state.score > state.best;
    state.best = state.best.max(state.score);

    state.events.push(GameEvent::Crashed { cause });
    state.events.push(GameEvent::SessionEnded {
        score: state.score,
        best: state.best,
        new_best,
    });
    log::info!(
        "Session ended ({:?}) at frame {}: score {}, best {}",
        cause,
        state.frame,
        state.score,
        state.best
    );
}

fn step_active(state: &mut GameState, dt_ms: f32) {
    let frames = dt_ms / REFERENCE_FRAME_MS;

    // Physics
    state.bird.integrate(&state.tuning, frames);

    // Spawner
    state.spawn_timer += dt_ms;
    if state.spawn_timer >= state.tuning.spawn_interval_ms {
        state.spawn_timer = 0.0;
        spawn_pipe(state);
    }

    // Scroll and score
    let shift = state.tuning.pipe_speed * frames;
    let bird_x = state.bird.x;
    for pipe in &mut state.pipes {
        pipe.x -= shift;
        if !pipe.scored && pipe.right() < bird_x {
            pipe.scored = true;
            state.score += 1;
            state.events.push(GameEvent::Scored { score: state.score });
            log::debug!("Passed pipe {}, score {}", pipe.id, state.score);
        }
    }

    // Retire pipes that scrolled off, survivors keep their order
    state.pipes.retain(|p| p.right() > -RETIRE_MARGIN);

    if let Some(cause) = first_collision(&state.bird, &state.pipes, state.ground_y()) {
        end_session(state, cause);
    }
}

/// Push a pipe at the right edge with a random gap position
pub fn spawn_pipe(state: &mut GameState) {
    let min = state.tuning.min_gap_top();
    let max = state.tuning.max_gap_top();
    let gap_top = if max > min {
        state.rng.random_range(min..max).floor().max(min)
    } else {
        min
    };

    let id = state.next_pipe_id();
    state.pipes.push(Pipe {
        id,
        x: WIDTH + SPAWN_OFFSET,
        gap_top,
        gap_height: state.tuning.gap_height,
        width: state.tuning.pipe_width,
        scored: false,
    });
    state.events.push(GameEvent::PipeSpawned { id });
    log::debug!("Spawned pipe {} with gap at {}", id, gap_top);
}
