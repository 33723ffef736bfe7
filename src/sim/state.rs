//! Game state and core simulation types
//!
//! Everything the update step mutates lives in `GameState`; the renderer only
//! ever borrows it immutably.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle, bird bobbing, waiting for the first flap
    Ready,
    /// Active gameplay
    Active,
    /// Crashed, waiting for an explicit restart
    Ended,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Hit the segment above the gap of the pipe with this id
    PipeTop(u32),
    /// Hit the segment below the gap of the pipe with this id
    PipeBottom(u32),
    Ground,
    Ceiling,
}

/// Things that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Active
    SessionStarted,
    Flapped,
    PipeSpawned { id: u32 },
    Scored { score: u32 },
    Crashed { cause: CrashCause },
    /// Active -> Ended; `new_best` is set when `best` was raised by this session
    SessionEnded { score: u32, best: u32, new_best: bool },
    /// Ended -> Ready
    Restarted,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Center x (fixed during play)
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Vertical velocity (px per reference frame, positive is down)
    pub vy: f32,
    /// Visual tilt (radians), not part of collision geometry
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: HEIGHT / 2.0,
            vy: 0.0,
            rotation: 0.0,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
        }
    }
}

impl Bird {
    /// Axis-aligned bounding box (top-left origin)
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.width / 2.0,
            self.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Override the current velocity with the flap impulse
    pub fn flap(&mut self, impulse: f32) {
        self.vy = impulse;
    }

    /// Integrate gravity over `frames` reference frames
    pub fn integrate(&mut self, tuning: &Tuning, frames: f32) {
        self.vy = (self.vy + tuning.gravity * frames).min(tuning.max_fall_speed);
        self.y += self.vy * frames;
        self.rotation = (self.vy * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION, MAX_ROTATION);
    }

    /// Idle hover used while waiting in the ready phase
    pub fn bob(&mut self, time_ms: f32, ground_y: f32) {
        let t = time_ms / BOB_PERIOD_MS;
        let low = BOB_MARGIN;
        let high = (ground_y - BOB_MARGIN).max(low);
        self.y = (HEIGHT / 2.0 + t.sin() * BOB_AMPLITUDE).clamp(low, high);
        self.rotation = t.sin() * BOB_TILT;
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Y where the gap starts (bottom of the top segment)
    pub gap_top: f32,
    pub gap_height: f32,
    pub width: f32,
    /// Set once the bird has passed it
    pub scored: bool,
}

impl Pipe {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Segment above the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    /// Segment below the gap, down to the ground line
    pub fn bottom_rect(&self, ground_y: f32) -> Rect {
        let y = self.gap_bottom();
        Rect::new(self.x, y, self.width, ground_y - y)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Balance values this state runs with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Best score across sessions (only ever raised)
    pub best: u32,
    /// Milliseconds accumulated toward the next pipe
    pub spawn_timer: f32,
    /// Simulation clock (ms)
    pub time_ms: f32,
    /// Time spent in the current phase (ms), drives the idle bob
    pub phase_ms: f32,
    /// Ticks processed
    pub frame: u64,
    pub bird: Bird,
    /// Live pipes in spawn order (oldest / leftmost first)
    pub pipes: Vec<Pipe>,
    /// Events produced since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Next pipe id
    next_id: u32,
}

impl GameState {
    /// Create a state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a state with the given tuning.
    ///
    /// Invalid tuning is replaced by the defaults.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                Tuning::default()
            }
        };

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            best: 0,
            spawn_timer: 0.0,
            time_ms: 0.0,
            phase_ms: 0.0,
            frame: 0,
            bird: Bird::default(),
            pipes: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Builder-style best score seed (value read from storage at startup)
    pub fn with_best(mut self, best: u32) -> Self {
        self.best = best;
        self
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.tuning.ground_y()
    }

    /// Allocate a new pipe ID
    pub fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear per-session data: score, pipes, spawn timer and the bird
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.pipes.clear();
        self.spawn_timer = 0.0;
        self.bird = Bird::default();
    }

    /// Switch phase and restart the phase clock
    pub fn enter_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.phase_ms = 0.0;
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird, Bird::default());
    }

    #[test]
    fn test_invalid_tuning_falls_back() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        let state = GameState::with_tuning(1, tuning);
        assert_eq!(state.tuning, Tuning::default());
    }

    #[test]
    fn test_nan_margin_falls_back_and_gaps_stay_in_range() {
        let tuning = Tuning {
            gap_top_margin: f32::NAN,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(2, tuning);
        assert_eq!(state.tuning, Tuning::default());

        for _ in 0..20 {
            crate::sim::spawn_pipe(&mut state);
        }
        for pipe in &state.pipes {
            assert!(pipe.gap_top >= state.tuning.min_gap_top());
            assert!(pipe.gap_top < state.tuning.max_gap_top());
        }
    }

    #[test]
    fn test_bird_bounds_centered() {
        let bird = Bird::default();
        let r = bird.bounds();
        assert_eq!(r.x, BIRD_X - BIRD_WIDTH / 2.0);
        assert_eq!(r.y, HEIGHT / 2.0 - BIRD_HEIGHT / 2.0);
        assert_eq!(r.w, BIRD_WIDTH);
        assert_eq!(r.h, BIRD_HEIGHT);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut bird = Bird::default();
        bird.vy = 12.0;
        bird.flap(-5.5);
        assert_eq!(bird.vy, -5.5);
        bird.vy = -30.0;
        bird.flap(-5.5);
        assert_eq!(bird.vy, -5.5);
    }

    #[test]
    fn test_bob_stays_in_band() {
        let mut bird = Bird::default();
        for t in 0..2000 {
            bird.bob(t as f32 * 7.3, 530.0);
            assert!(bird.y >= BOB_MARGIN && bird.y <= 530.0 - BOB_MARGIN);
            assert!(bird.rotation.abs() <= BOB_TILT + f32::EPSILON);
        }
    }

    #[test]
    fn test_pipe_rects() {
        let pipe = Pipe {
            id: 1,
            x: 100.0,
            gap_top: 200.0,
            gap_height: 160.0,
            width: 45.0,
            scored: false,
        };
        assert_eq!(pipe.top_rect(), Rect::new(100.0, 0.0, 45.0, 200.0));
        assert_eq!(pipe.bottom_rect(530.0), Rect::new(100.0, 360.0, 45.0, 170.0));
        assert_eq!(pipe.right(), 145.0);
    }

    #[test]
    fn test_reset_session_keeps_best() {
        let mut state = GameState::new(3).with_best(9);
        state.score = 4;
        state.spawn_timer = 700.0;
        state.bird.y = 12.0;
        let id = state.next_pipe_id();
        state.pipes.push(Pipe {
            id,
            x: 10.0,
            gap_top: 50.0,
            gap_height: 160.0,
            width: 45.0,
            scored: true,
        });

        state.reset_session();
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 9);
        assert!(state.pipes.is_empty());
        assert_eq!(state.spawn_timer, 0.0);
        assert_eq!(state.bird, Bird::default());
    }
}
