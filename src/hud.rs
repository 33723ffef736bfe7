//! Heads-up text
//!
//! The renderer draws geometry only; everything textual is produced here as
//! plain strings and handed to whatever owns fonts (the DOM overlay on web,
//! the log on native).

use crate::sim::{GamePhase, GameState};

/// A centered message block shown over the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub lines: Vec<String>,
}

/// Text for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Top-left corner
    pub score: String,
    /// Top-right corner
    pub best: String,
    /// Phase message, if any
    pub banner: Option<Banner>,
    /// FPS readout when enabled
    pub fps: Option<String>,
}

impl Hud {
    pub fn from_state(state: &GameState, fps: Option<u32>) -> Self {
        let banner = match state.phase {
            GamePhase::Ready => Some(Banner {
                title: "Tap/Space to start".to_string(),
                lines: vec!["Fly through the gaps!".to_string()],
            }),
            GamePhase::Active => None,
            GamePhase::Ended => Some(Banner {
                title: "Game Over".to_string(),
                lines: vec![
                    format!("Score: {}  \u{2022}  Best: {}", state.score, state.best),
                    "Press R to restart".to_string(),
                ],
            }),
        };

        Self {
            score: format!("Score: {}", state.score),
            best: format!("Best: {}", state.best),
            banner,
            fps: fps.map(|f| format!("{} FPS", f)),
        }
    }
}
