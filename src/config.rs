//! Game tuning and layout
//!
//! Every gameplay constant lives here so a round can be rebuilt with
//! different feel without touching simulation code. Loaded from JSON,
//! falling back to defaults on any problem.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which pair the scoring check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Only the most recently spawned pair can score
    NewestPair,
    /// The oldest pair not yet passed scores, one after another
    #[default]
    Sequential,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::NewestPair => "newest_pair",
            ScoringMode::Sequential => "sequential",
        }
    }
}

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Layout ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Avatar start, as fractions of the screen
    pub avatar_start_x_frac: f32,
    pub avatar_start_y_frac: f32,
    pub avatar_radius: f32,

    // === Avatar physics ===
    pub gravity: f32,
    pub flap_impulse: f32,
    pub collision_residual_velocity: f32,
    pub ground_margin: f32,
    /// Frames per second that one unit of velocity is measured against
    pub reference_frame_rate: f32,

    // === Obstacles ===
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    pub obstacle_half_height: f32,
    pub obstacle_velocity: f32,
    pub gap_floor_min: f32,
    pub gap_floor_max: f32,
    pub spawn_offset: f32,
    pub spawn_trigger_distance: f32,
    pub retire_x: f32,

    // === Scoring ===
    pub score_clearance: f32,
    pub scoring_mode: ScoringMode,

    // === Diagnostics ===
    pub min_healthy_fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            avatar_start_x_frac: AVATAR_START_X_FRAC,
            avatar_start_y_frac: AVATAR_START_Y_FRAC,
            avatar_radius: AVATAR_RADIUS,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            collision_residual_velocity: COLLISION_RESIDUAL_VELOCITY,
            ground_margin: GROUND_MARGIN,
            reference_frame_rate: REFERENCE_FRAME_RATE,

            obstacle_gap: OBSTACLE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_half_height: OBSTACLE_HALF_HEIGHT,
            obstacle_velocity: OBSTACLE_VELOCITY,
            gap_floor_min: GAP_FLOOR_MIN,
            gap_floor_max: GAP_FLOOR_MAX,
            spawn_offset: SPAWN_OFFSET,
            spawn_trigger_distance: SPAWN_TRIGGER_DISTANCE,
            retire_x: RETIRE_X,

            score_clearance: SCORE_CLEARANCE,
            scoring_mode: ScoringMode::default(),

            min_healthy_fps: MIN_HEALTHY_FPS,
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields take their defaults; a
    /// config that fails [`Config::validate`] is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        let problems = config.validate();
        if problems.is_empty() {
            Ok(config)
        } else {
            Err(serde::de::Error::custom(problems.join("; ")))
        }
    }

    /// Load a config file, falling back to defaults if it is missing,
    /// malformed or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read config {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Rejected config {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// This config if it validates, otherwise the defaults
    pub fn or_default(self) -> Self {
        let problems = self.validate();
        if problems.is_empty() {
            return self;
        }
        for problem in &problems {
            log::warn!("Config: {}", problem);
        }
        log::warn!("Unplayable config - using defaults");
        Self::default()
    }

    /// Describe every setting that would make a round unplayable
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let values = [
            self.screen_width,
            self.screen_height,
            self.avatar_start_x_frac,
            self.avatar_start_y_frac,
            self.avatar_radius,
            self.gravity,
            self.flap_impulse,
            self.collision_residual_velocity,
            self.ground_margin,
            self.reference_frame_rate,
            self.obstacle_gap,
            self.obstacle_width,
            self.obstacle_half_height,
            self.obstacle_velocity,
            self.gap_floor_min,
            self.gap_floor_max,
            self.spawn_offset,
            self.spawn_trigger_distance,
            self.retire_x,
            self.score_clearance,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            problems.push("every numeric setting must be finite".to_string());
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            problems.push("screen dimensions must be positive".to_string());
        }
        if self.avatar_radius <= 0.0 {
            problems.push("avatar_radius must be positive".to_string());
        }
        if self.gravity < 0.0 {
            problems.push("gravity must not be negative".to_string());
        }
        if self.reference_frame_rate <= 0.0 {
            problems.push("reference_frame_rate must be positive".to_string());
        }
        if self.obstacle_velocity >= 0.0 {
            problems.push("obstacle_velocity must be negative (leftward)".to_string());
        }
        if self.gap_floor_min > self.gap_floor_max {
            problems.push(format!(
                "gap_floor_min {} exceeds gap_floor_max {}",
                self.gap_floor_min, self.gap_floor_max
            ));
        }
        if self.obstacle_gap <= 2.0 * self.avatar_radius {
            problems.push(format!(
                "obstacle_gap {} leaves no room for an avatar of radius {}",
                self.obstacle_gap, self.avatar_radius
            ));
        }
        if self.spawn_x() <= self.spawn_trigger_x() {
            problems.push("spawn edge must lie right of the spawn trigger".to_string());
        }
        if self.retire_x >= self.spawn_trigger_x() {
            problems.push("retire_x must lie left of the spawn trigger".to_string());
        }

        problems
    }

    /// X where new pairs appear
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.screen_width + self.spawn_offset
    }

    /// X the latest pair must cross before the next one spawns
    #[inline]
    pub fn spawn_trigger_x(&self) -> f32 {
        self.screen_width - self.spawn_trigger_distance
    }

    #[inline]
    pub fn avatar_start_x(&self) -> f32 {
        self.avatar_start_x_frac * self.screen_width
    }

    #[inline]
    pub fn avatar_start_y(&self) -> f32 {
        self.avatar_start_y_frac * self.screen_height
    }

    /// Y at or below which the avatar is on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.avatar_radius + self.ground_margin
    }
}
