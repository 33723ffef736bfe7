//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes in through `tick`, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, boundary_collision, first_collision, pipe_collision};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, spawn_pipe, tick};
