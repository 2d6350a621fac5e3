pub mod bot;
pub mod config;
pub mod physics;

use std::time::Duration;

use serde::Serialize;

use ringout_core::{Match, MatchError, MatchEvent, RoundPhase, Standing};

use crate::bot::BotDriver;
use crate::config::SimConfig;
use crate::physics::Physics;

/// Summary of a finished (or abandoned) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub ticks: u64,
    pub finished: bool,
    pub rounds_played: u32,
    pub eliminations: u32,
    pub draws: u32,
    pub standings: Vec<Standing>,
}

/// Fixed-tick host driving one match with bots and the physics stand-in.
pub struct Simulation {
    game: Match,
    bots: BotDriver,
    physics: Physics,
    dt: f32,
    realtime: bool,
    max_ticks: u64,
    ticks: u64,
    eliminations: u32,
    draws: u32,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let match_config = config.resolve_match_config();
        let physics = Physics::new(config.damping, match_config.player_collision_radius);
        let game = Match::new(match_config)?;
        Ok(Self {
            game,
            bots: BotDriver::new(config.seed, config.bot_thrust),
            physics,
            dt: config.tick_dt(),
            realtime: config.realtime,
            max_ticks: config.max_ticks,
            ticks: 0,
            eliminations: 0,
            draws: 0,
        })
    }

    /// One host frame: bot input, physics, then the match update.
    pub fn step(&mut self) -> Vec<MatchEvent> {
        let input = self.bots.control_input(&self.game);
        self.bots.drive_others(&mut self.game);
        self.physics.step_match(&mut self.game, self.dt);
        let events = self.game.update(self.dt, &input);
        self.ticks += 1;

        for event in &events {
            match event {
                MatchEvent::PlayerEliminated { .. } => self.eliminations += 1,
                MatchEvent::RoundDrawn { .. } => self.draws += 1,
                _ => {},
            }
            tracing::debug!(tick = self.ticks, ?event, "Match event");
        }
        events
    }

    /// Step until the match ends or the tick cap is hit.
    pub fn run(&mut self) -> SimReport {
        let pace = Duration::from_secs_f32(self.dt);
        while !self.game.is_finished() && self.ticks < self.max_ticks {
            self.step();
            if self.realtime {
                std::thread::sleep(pace);
            }
        }
        if !self.game.is_finished() {
            tracing::warn!(
                ticks = self.ticks,
                round = self.game.current_round(),
                "Tick limit reached before the match ended"
            );
        }
        self.report()
    }

    pub fn report(&self) -> SimReport {
        let finished = self.game.is_finished();
        // The current round only counts once its result is in
        let rounds_played = match self.game.phase() {
            RoundPhase::RoundEnding | RoundPhase::MatchEnded => self.game.current_round(),
            RoundPhase::Countdown | RoundPhase::Active => self.game.current_round() - 1,
        };
        SimReport {
            ticks: self.ticks,
            finished,
            rounds_played,
            eliminations: self.eliminations,
            draws: self.draws,
            standings: self.game.standings(),
        }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Match {
        &mut self.game
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
