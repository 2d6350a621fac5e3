use serde::{Deserialize, Serialize};

use crate::combat::ShockwaveConfig;
use crate::error::MatchError;

/// Rounds played when the configured count is missing or non-positive.
pub const DEFAULT_ROUND_COUNT: u32 = 3;

/// Match config looked up when `RINGOUT_CONFIG` is unset or unreadable.
pub const DEFAULT_CONFIG_PATH: &str = "config/ringout.toml";

/// Data-driven configuration for one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of rounds in the match. Zero or negative falls back to
    /// [`DEFAULT_ROUND_COUNT`].
    pub round_count: i32,
    /// World width (units).
    pub world_width: f32,
    /// World height (units).
    pub world_height: f32,
    /// Arena diameter is `world_height - arena_margin`.
    pub arena_margin: f32,
    /// Start positions sit this far inside the arena boundary.
    pub start_edge_offset: f32,
    /// Collision circle radius of a craft (used by the physics host).
    pub player_collision_radius: f32,
    /// Pause between a round's result and the next countdown (seconds).
    pub round_transition_delay_secs: f32,
    /// Pre-round countdown length (seconds).
    pub countdown_secs: f32,
    /// Velocity delta applied per tick of held directional input.
    pub velocity_step: f32,
    /// Roster slot driven by local input.
    pub controlled_player: usize,
    /// Display names, one per craft, in roster order.
    pub roster: Vec<String>,
    pub weapon: ShockwaveConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            round_count: DEFAULT_ROUND_COUNT as i32,
            world_width: 1000.0,
            world_height: 1000.0,
            arena_margin: 100.0,
            start_edge_offset: 50.0,
            player_collision_radius: 28.0,
            round_transition_delay_secs: 2.0,
            countdown_secs: 3.0,
            velocity_step: 5.0,
            controlled_player: 0,
            roster: ["Tome", "Dirda", "Bube", "Wojte", "Karole", "Pawele"]
                .into_iter()
                .map(String::from)
                .collect(),
            weapon: ShockwaveConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("RINGOUT_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Some(config) = Self::parse_file(&path, &contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string(DEFAULT_CONFIG_PATH)
            && let Some(config) = Self::parse_file(DEFAULT_CONFIG_PATH, &contents)
        {
            return config;
        }
        Self::default()
    }

    /// Parse one config file, logging and discarding it when malformed.
    fn parse_file(path: &str, contents: &str) -> Option<Self> {
        match toml::from_str::<Self>(contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(%path, error = %e, "Failed to parse match config");
                None
            },
        }
    }

    /// Total rounds with non-positive values replaced by the default.
    pub fn normalized_round_count(&self) -> u32 {
        if self.round_count <= 0 {
            tracing::warn!(
                configured = self.round_count,
                fallback = DEFAULT_ROUND_COUNT,
                "round_count must be > 0, using default"
            );
            DEFAULT_ROUND_COUNT
        } else {
            self.round_count as u32
        }
    }

    pub fn arena_center(&self) -> (f32, f32) {
        (self.world_width / 2.0, self.world_height / 2.0)
    }

    pub fn arena_radius(&self) -> f32 {
        (self.world_height - self.arena_margin) / 2.0
    }

    /// Reject configurations the match cannot run with.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.roster.is_empty() {
            return Err(MatchError::EmptyRoster);
        }
        if self.controlled_player >= self.roster.len() {
            return Err(MatchError::ControlledPlayerOutOfRange {
                index: self.controlled_player,
                roster_len: self.roster.len(),
            });
        }
        if !self.world_width.is_finite() || self.world_width <= 0.0 {
            return Err(MatchError::InvalidGeometry(format!(
                "world_width must be > 0, got {}",
                self.world_width
            )));
        }
        let radius = self.arena_radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MatchError::InvalidGeometry(format!(
                "arena radius must be > 0, got {radius}"
            )));
        }
        if self.start_edge_offset < 0.0 || self.start_edge_offset >= radius {
            return Err(MatchError::InvalidGeometry(format!(
                "start_edge_offset {} must lie within the arena radius {radius}",
                self.start_edge_offset
            )));
        }
        if !self.countdown_secs.is_finite() || self.countdown_secs < 0.0 {
            return Err(MatchError::InvalidTiming(
                "countdown_secs must be finite and >= 0".to_string(),
            ));
        }
        if !self.round_transition_delay_secs.is_finite() || self.round_transition_delay_secs < 0.0 {
            return Err(MatchError::InvalidTiming(
                "round_transition_delay_secs must be finite and >= 0".to_string(),
            ));
        }
        if !self.velocity_step.is_finite() {
            return Err(MatchError::InvalidTuning(format!(
                "velocity_step must be finite, got {}",
                self.velocity_step
            )));
        }
        Ok(())
    }
}
