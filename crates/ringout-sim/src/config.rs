use serde::Deserialize;

use ringout_core::{MatchConfig, MatchError};

/// Host configuration, loaded from `ringout.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate.
    pub tick_rate_hz: u32,
    /// Seed for bot decisions. Same seed, same match.
    pub seed: u64,
    /// Hard stop for matches that never resolve.
    pub max_ticks: u64,
    /// Sleep between ticks to run at wall-clock speed.
    pub realtime: bool,
    /// Velocity multiplier applied every tick.
    pub damping: f32,
    /// How strongly bots steer (velocity added per tick, as a fraction of
    /// the match's `velocity_step`).
    pub bot_thrust: f32,
    /// `[match]` table. Falls back to [`MatchConfig::load`] when absent.
    #[serde(rename = "match")]
    pub match_config: Option<MatchConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            seed: 7,
            max_ticks: 60 * 60 * 5,
            realtime: false,
            damping: 0.985,
            bot_thrust: 0.6,
            match_config: None,
        }
    }
}

impl SimConfig {
    /// Load config from `ringout.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("ringout.toml") {
            Ok(content) => match toml::from_str::<SimConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from ringout.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse ringout.toml: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No ringout.toml found, using defaults");
                SimConfig::default()
            },
        };

        if let Ok(val) = std::env::var("RINGOUT_SEED")
            && let Ok(n) = val.parse::<u64>()
        {
            config.seed = n;
        }
        if let Ok(val) = std::env::var("RINGOUT_TICK_RATE")
            && let Ok(n) = val.parse::<u32>()
        {
            config.tick_rate_hz = n;
        }
        if let Ok(val) = std::env::var("RINGOUT_MAX_TICKS")
            && let Ok(n) = val.parse::<u64>()
        {
            config.max_ticks = n;
        }
        if let Ok(val) = std::env::var("RINGOUT_REALTIME")
            && let Ok(flag) = val.parse::<bool>()
        {
            config.realtime = flag;
        }
        if let Ok(val) = std::env::var("RINGOUT_ROUNDS")
            && let Ok(n) = val.parse::<i32>()
        {
            config
                .match_config
                .get_or_insert_with(MatchConfig::load)
                .round_count = n;
        }

        config
    }

    /// The match settings this host will run.
    pub fn resolve_match_config(&self) -> MatchConfig {
        self.match_config.clone().unwrap_or_else(MatchConfig::load)
    }

    /// Seconds per tick.
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.tick_rate_hz == 0 {
            return Err(MatchError::InvalidTiming(
                "tick_rate_hz must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(MatchError::InvalidTiming(format!(
                "damping must lie in 0..=1, got {}",
                self.damping
            )));
        }
        if let Some(ref game) = self.match_config {
            game.validate()?;
        }
        Ok(())
    }
}
