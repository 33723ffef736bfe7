//! Frame driver
//!
//! Owns the simulation, the pending player input and the best-score store.
//! Whoever drives the display (requestAnimationFrame, a test loop, the
//! headless harness) calls `frame` once per refresh and renders afterwards.

use crate::best_score::BestScore;
use crate::consts::{MAX_FRAME_MS, REFERENCE_FRAME_MS};
use crate::hud::Hud;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, autopilot, tick};
use crate::tuning::Tuning;

/// Number of frame timestamps kept for the FPS readout
const FPS_WINDOW: usize = 60;

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    best: BestScore,
    /// Input collected since the last frame
    input: TickInput,
    /// Demo mode, the autopilot chooses inputs
    autopilot: bool,
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
    /// Events produced by the last frame
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, store: Box<dyn ScoreStore>) -> Self {
        let best = BestScore::load(store);
        let state = GameState::with_tuning(seed, tuning).with_best(best.get());
        log::info!("Game initialized with seed {}, best {}", state.seed, state.best);
        Self {
            state,
            settings,
            best,
            input: TickInput::default(),
            autopilot: false,
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
            events: Vec::new(),
        }
    }

    /// Queue a flap for the next frame
    pub fn flap(&mut self) {
        self.input.flap = true;
    }

    /// Queue a restart for the next frame
    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot: {}", self.autopilot);
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Best score as persisted
    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    /// Advance to the display timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> &[GameEvent] {
        let dt = match self.last_time {
            Some(last) => (now_ms - last) as f32,
            None => REFERENCE_FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.update(dt, now_ms)
    }

    /// Forget the previous timestamp (after the page was hidden), so the next
    /// frame does not see the whole pause as elapsed time
    pub fn reset_clock(&mut self) {
        self.last_time = None;
    }

    /// Run one simulation tick of `dt_ms` (clamped to `MAX_FRAME_MS`)
    pub fn update(&mut self, dt_ms: f32, now_ms: f64) -> &[GameEvent] {
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };

        let input = if self.autopilot {
            autopilot::decide(&self.state)
        } else {
            self.input
        };
        // One-shot inputs are consumed by exactly one tick
        self.input = TickInput::default();

        tick(&mut self.state, &input, dt_ms);
        self.track_fps(now_ms);

        self.events = self.state.drain_events();
        for event in &self.events {
            if let GameEvent::SessionEnded { score, .. } = *event {
                self.best.record(score);
                self.state.best = self.best.get();
            }
        }

        &self.events
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    /// Measured frames per second (0 until the window has filled)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Text overlay for the current state
    pub fn hud(&self) -> Hud {
        let fps = self.settings.show_fps.then_some(self.fps);
        Hud::from_state(&self.state, fps)
    }
}
