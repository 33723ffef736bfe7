//! Data-driven game balance
//!
//! Per-frame quantities (gravity, velocities, pipe speed) are expressed for a
//! 16.67 ms reference frame and scaled by the frame ratio in `sim::tick`.
//! Durations are in milliseconds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::HEIGHT;

/// Reasons a tuning table is rejected
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("flap velocity must point upward (negative), got {0}")]
    FlapNotUpward(f32),
    #[error("gap of {gap} does not fit between margins (playfield {playfield})")]
    GapDoesNotFit { gap: f32, playfield: f32 },
    #[error("invalid tuning json: {0}")]
    Json(String),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px per reference frame²)
    pub gravity: f32,
    /// Velocity a flap sets (px per reference frame, negative is up)
    pub flap_velocity: f32,
    /// Terminal fall speed (px per reference frame)
    pub max_fall_speed: f32,
    /// Vertical size of the passable gap
    pub gap_height: f32,
    /// Pipe width
    pub pipe_width: f32,
    /// Leftward pipe speed (px per reference frame)
    pub pipe_speed: f32,
    /// Time between pipe spawns (ms)
    pub spawn_interval_ms: f32,
    /// Height of the ground strip at the bottom of the surface
    pub ground_height: f32,
    /// Minimum distance from the top of the surface to a gap
    pub gap_top_margin: f32,
    /// Minimum distance from the ground line to a gap
    pub gap_bottom_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.25,
            flap_velocity: -5.5,
            max_fall_speed: 13.0,
            gap_height: 160.0,
            pipe_width: 45.0,
            pipe_speed: 3.0,
            spawn_interval_ms: 1500.0,
            ground_height: 70.0,
            gap_top_margin: 40.0,
            gap_bottom_margin: 40.0,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        HEIGHT - self.ground_height
    }

    /// Smallest gap-top a spawned pipe may use
    #[inline]
    pub fn min_gap_top(&self) -> f32 {
        self.gap_top_margin
    }

    /// Exclusive upper bound for a spawned pipe's gap-top
    #[inline]
    pub fn max_gap_top(&self) -> f32 {
        self.ground_y() - self.gap_height - self.gap_bottom_margin
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("max_fall_speed", self.max_fall_speed),
            ("gap_height", self.gap_height),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("ground_height", self.ground_height),
            ("gap_top_margin", self.gap_top_margin),
            ("gap_bottom_margin", self.gap_bottom_margin),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TuningError::NonFinite(*name));
        }

        let positive = [
            ("gravity", self.gravity),
            ("max_fall_speed", self.max_fall_speed),
            ("gap_height", self.gap_height),
            ("pipe_width", self.pipe_width),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("ground_height", self.ground_height),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }

        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapNotUpward(self.flap_velocity));
        }

        if self.gap_top_margin < 0.0 || self.gap_bottom_margin < 0.0 {
            return Err(TuningError::NonPositive("gap margins"));
        }

        if self.max_gap_top() <= self.min_gap_top() {
            return Err(TuningError::GapDoesNotFit {
                gap: self.gap_height,
                playfield: self.ground_y(),
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Json(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load the override from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(crate::consts::TUNING_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native builds always run the default balance
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert_eq!(tuning.validate(), Ok(()));
        assert_eq!(tuning.ground_y(), 530.0);
        assert_eq!(tuning.min_gap_top(), 40.0);
        assert_eq!(tuning.max_gap_top(), 330.0);
    }

    #[test]
    fn test_gap_too_tall() {
        let tuning = Tuning {
            gap_height: 460.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_downward_flap_rejected() {
        let tuning = Tuning {
            flap_velocity: 2.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::FlapNotUpward(2.0)));
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            pipe_speed: f32::NAN,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NonFinite("pipe_speed")));
    }

    #[test]
    fn test_nan_margin_rejected() {
        let tuning = Tuning {
            gap_top_margin: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite("gap_top_margin"))
        );
    }

    #[test]
    fn test_infinite_values_rejected() {
        let tuning = Tuning {
            spawn_interval_ms: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite("spawn_interval_ms"))
        );

        let tuning = Tuning {
            flap_velocity: f32::NEG_INFINITY,
            ..Default::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::NonFinite("flap_velocity"))
        );
    }

    #[test]
    fn test_zero_gravity_rejected() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(TuningError::NonPositive("gravity")));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "pipe_speed": 4.5 }"#).unwrap();
        assert_eq!(tuning.pipe_speed, 4.5);
        assert_eq!(tuning.gap_height, 160.0);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }
}
