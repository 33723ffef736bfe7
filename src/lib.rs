//! Skyflap - a one-button gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, scoring, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: Heads-up text derived from the simulation
//! - `game`: Frame driver tying input, simulation and persistence together
//! - `persistence`: Best-score storage collaborators
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod best_score;
pub mod game;
pub mod hud;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical surface width (pixels)
    pub const WIDTH: f32 = 400.0;
    /// Logical surface height (pixels)
    pub const HEIGHT: f32 = 600.0;

    /// Reference frame length that per-frame tuning values are expressed in (ms)
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Longest frame the driver will simulate (ms), avoids tunnelling after a stall
    pub const MAX_FRAME_MS: f32 = 40.0;

    /// Bird horizontal position (fixed)
    pub const BIRD_X: f32 = 80.0;
    /// Bird bounding box
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;

    /// Visual tilt range (radians) and velocity divisor
    pub const MIN_ROTATION: f32 = -0.4;
    pub const MAX_ROTATION: f32 = 0.9;
    pub const ROTATION_PER_VELOCITY: f32 = 1.0 / 20.0;

    /// Idle bob in the ready phase
    pub const BOB_PERIOD_MS: f32 = 400.0;
    pub const BOB_AMPLITUDE: f32 = 12.0;
    pub const BOB_MARGIN: f32 = 60.0;
    pub const BOB_TILT: f32 = 0.15;

    /// Pipes spawn this far right of the visible area
    pub const SPAWN_OFFSET: f32 = 10.0;
    /// Pipes are retired once their right edge is this far left of the surface
    pub const RETIRE_MARGIN: f32 = 10.0;

    /// LocalStorage keys (used only in wasm32)
    pub const BEST_SCORE_KEY: &str = "skyflap_best";
    pub const SETTINGS_KEY: &str = "skyflap_settings";
    pub const TUNING_KEY: &str = "skyflap_tuning";
}
