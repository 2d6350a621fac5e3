use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::collision::{self, Contact};
use crate::combat::{Shockwave, Weapon};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::events::{EliminationCause, MatchEvent};
use crate::player::{Body, Player, PlayerColor, PlayerIndex};
use crate::scoreboard::{self, ScoreTable, Scoreboard, Standing};
use crate::timer::{CountdownStatus, GameTimer, RoundTimer, Scheduler};

/// Heading (degrees) set by each directional input.
pub const HEADING_LEFT: f32 = 90.0;
pub const HEADING_RIGHT: f32 = -90.0;
pub const HEADING_UP: f32 = 180.0;
pub const HEADING_DOWN: f32 = 0.0;

/// Where the match is in its round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Pre-round countdown; everyone is locked.
    Countdown,
    /// Players are free and the boundary is enforced.
    Active,
    /// Result decided; waiting for the delayed transition.
    RoundEnding,
    /// Terminal.
    MatchEnded,
}

/// Polled input state of the controlled player for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub attack: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduledAction {
    NextRound { from_round: u32 },
}

/// Round-based match between a fixed roster of craft.
///
/// The host calls [`Match::update`] once per frame after its physics step and
/// feeds body contacts through [`Match::record_contact`]. Everything else
/// (boundary eliminations, scoring, round transitions) happens inside
/// `update` and is reported as [`MatchEvent`]s.
pub struct Match<W: Weapon = Shockwave, S: Scoreboard = ScoreTable> {
    config: MatchConfig,
    total_rounds: u32,
    current_round: u32,
    phase: RoundPhase,
    players: Vec<Player>,
    controlled: PlayerIndex,
    arena: Arena,
    round_timer: RoundTimer,
    game_timer: GameTimer,
    scheduler: Scheduler<ScheduledAction>,
    weapon: W,
    scoreboard: S,
}

impl Match<Shockwave, ScoreTable> {
    /// Build a match with the configured shockwave and an in-memory scoreboard.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        let weapon = Shockwave::new(config.weapon.clone());
        Self::with_parts(config, weapon, ScoreTable::new())
    }
}

impl<W: Weapon, S: Scoreboard> Match<W, S> {
    pub fn with_parts(
        config: MatchConfig,
        weapon: W,
        mut scoreboard: S,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        let total_rounds = config.normalized_round_count();
        let arena = Arena::from_config(&config);

        let mut players: Vec<Player> = config
            .roster
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(i, name.clone(), PlayerColor::for_index(i)))
            .collect();
        for p in &players {
            scoreboard.add_player(&p.name, p.color);
        }
        arena.assign_start_positions(&mut players);

        let mut round_timer = RoundTimer::new(config.countdown_secs);
        round_timer.start_countdown();

        tracing::info!(
            players = players.len(),
            total_rounds,
            controlled = config.controlled_player,
            "Match created"
        );

        Ok(Self {
            controlled: config.controlled_player,
            config,
            total_rounds,
            current_round: 1,
            phase: RoundPhase::Countdown,
            players,
            arena,
            round_timer,
            game_timer: GameTimer::default(),
            scheduler: Scheduler::new(),
            weapon,
            scoreboard,
        })
    }

    /// Advance the match by one frame.
    pub fn update(&mut self, dt: f32, input: &ControlInput) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase == RoundPhase::MatchEnded {
            return events;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.weapon.tick(dt);

        // Pending actions age before this frame can schedule new ones
        let phase_before = self.phase;
        for action in self.scheduler.tick(dt) {
            self.run_scheduled(action, &mut events);
        }
        if self.phase != phase_before {
            return events;
        }

        match self.phase {
            RoundPhase::Countdown => self.advance_countdown(dt, &mut events),
            RoundPhase::Active => {
                self.game_timer.tick(dt);
                self.scan_boundary(&mut events);
                // The scan may have closed the round
                if self.phase == RoundPhase::Active {
                    self.apply_controls(input);
                    if input.attack {
                        self.weapon.use_weapon(self.controlled, &mut self.players);
                    }
                }
            },
            RoundPhase::RoundEnding | RoundPhase::MatchEnded => {},
        }
        events
    }

    /// Collision attribution hook for the physics host.
    pub fn record_contact(&mut self, contact: Contact) {
        collision::attribute_contact(&mut self.players, contact);
    }

    /// Eliminate a player from outside the boundary scan. Only honored while
    /// the round is active; round end is evaluated in the same call.
    pub fn eliminate(&mut self, index: PlayerIndex, cause: EliminationCause) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != RoundPhase::Active {
            tracing::debug!(
                player = index,
                phase = ?self.phase,
                "Ignored elimination outside active round"
            );
            return events;
        }
        if self.kill_player(index, cause, &mut events) {
            self.evaluate_round_end(&mut events);
        }
        events
    }

    fn advance_countdown(&mut self, dt: f32, events: &mut Vec<MatchEvent>) {
        match self.round_timer.tick(dt) {
            CountdownStatus::Running => {},
            CountdownStatus::Second(seconds_left) => events.push(MatchEvent::CountdownTick {
                round: self.current_round,
                seconds_left,
            }),
            CountdownStatus::Finished => self.start_round(events),
            CountdownStatus::Idle => {
                tracing::debug!(round = self.current_round, "Countdown phase without a timer");
                self.start_round(events);
            },
        }
    }

    fn start_round(&mut self, events: &mut Vec<MatchEvent>) {
        for p in self.players.iter_mut().filter(|p| p.is_alive()) {
            p.unlock();
        }
        self.game_timer.start();
        self.phase = RoundPhase::Active;
        tracing::info!(round = self.current_round, "Round started");
        events.push(MatchEvent::RoundStarted {
            round: self.current_round,
        });
    }

    /// Kill every living player whose center left the arena, then settle the
    /// round once for the whole batch.
    fn scan_boundary(&mut self, events: &mut Vec<MatchEvent>) {
        let escaped: Vec<PlayerIndex> = self
            .players
            .iter()
            .filter(|p| p.is_alive() && !p.fell_off_arena)
            .filter(|p| !self.arena.contains(p.body.x, p.body.y))
            .map(Player::index)
            .collect();
        if escaped.is_empty() {
            return;
        }
        for index in escaped {
            if self.kill_player(index, EliminationCause::FellOff, events) {
                self.players[index].fell_off_arena = true;
            }
        }
        self.evaluate_round_end(events);
    }

    fn kill_player(
        &mut self,
        index: PlayerIndex,
        cause: EliminationCause,
        events: &mut Vec<MatchEvent>,
    ) -> bool {
        let Some(player) = self.players.get_mut(index) else {
            tracing::debug!(player = index, "Elimination for unknown player");
            return false;
        };
        if !player.kill() {
            return false;
        }
        let credited_to = player.last_touched_by;
        tracing::info!(
            round = self.current_round,
            player = index,
            name = %player.name,
            ?cause,
            ?credited_to,
            "Player eliminated"
        );
        events.push(MatchEvent::PlayerEliminated {
            player: index,
            cause,
            credited_to,
        });
        true
    }

    fn evaluate_round_end(&mut self, events: &mut Vec<MatchEvent>) {
        if self.phase != RoundPhase::Active {
            return;
        }
        let mut alive = self.players.iter().filter(|p| p.is_alive()).map(Player::index);
        let survivor = alive.next();
        if alive.next().is_some() {
            return;
        }

        match survivor {
            Some(index) => self.award_round(index, events),
            None => {
                tracing::info!(round = self.current_round, "Round drawn, nobody survived");
                events.push(MatchEvent::RoundDrawn {
                    round: self.current_round,
                });
            },
        }
        self.conclude_round(events);
    }

    fn award_round(&mut self, index: PlayerIndex, events: &mut Vec<MatchEvent>) {
        let player = &mut self.players[index];
        player.score += 1;
        let score = player.score;
        self.arena.show_round_winner(&player.name);
        self.scoreboard.update_score(index);
        tracing::info!(
            round = self.current_round,
            player = index,
            name = %player.name,
            score,
            "Round won"
        );
        events.push(MatchEvent::RoundWon {
            round: self.current_round,
            player: index,
            score,
        });
    }

    fn conclude_round(&mut self, events: &mut Vec<MatchEvent>) {
        self.game_timer.stop();
        for p in &mut self.players {
            p.lock();
        }
        if self.current_round >= self.total_rounds {
            self.finish_match(events);
            return;
        }

        self.phase = RoundPhase::RoundEnding;
        let delay_secs = self.config.round_transition_delay_secs;
        self.scheduler.schedule(
            delay_secs,
            ScheduledAction::NextRound {
                from_round: self.current_round,
            },
        );
        events.push(MatchEvent::NextRoundScheduled {
            round: self.current_round + 1,
            delay_secs,
        });
    }

    fn finish_match(&mut self, events: &mut Vec<MatchEvent>) {
        self.phase = RoundPhase::MatchEnded;
        self.scheduler.clear();
        self.round_timer.cancel();
        let standings = scoreboard::standings(&self.players);
        self.scoreboard.show_results(&standings);
        tracing::info!(
            rounds = self.total_rounds,
            leader = standings.first().map(|s| s.name.as_str()).unwrap_or("-"),
            "Match ended"
        );
        events.push(MatchEvent::MatchEnded { standings });
    }

    fn run_scheduled(&mut self, action: ScheduledAction, events: &mut Vec<MatchEvent>) {
        match action {
            ScheduledAction::NextRound { from_round } => {
                if self.phase != RoundPhase::RoundEnding || from_round != self.current_round {
                    tracing::debug!(
                        from_round,
                        current_round = self.current_round,
                        phase = ?self.phase,
                        "Dropped stale round transition"
                    );
                    return;
                }
                self.next_round(events);
            },
        }
    }

    fn next_round(&mut self, events: &mut Vec<MatchEvent>) {
        self.current_round += 1;
        self.arena.reset();
        self.game_timer.reset();
        for p in &mut self.players {
            p.revive();
            p.clear_attribution();
        }
        self.arena.assign_start_positions(&mut self.players);
        self.round_timer.start_countdown();
        self.phase = RoundPhase::Countdown;
        tracing::info!(round = self.current_round, "Round countdown started");
        if let Some(seconds_left) = self.round_timer.seconds_left() {
            events.push(MatchEvent::CountdownTick {
                round: self.current_round,
                seconds_left,
            });
        }
    }

    fn apply_controls(&mut self, input: &ControlInput) {
        let step = self.config.velocity_step;
        let Some(player) = self.players.get_mut(self.controlled) else {
            return;
        };
        if !player.accepts_input() {
            return;
        }
        let body = &mut player.body;
        if input.left {
            body.vx -= step;
            body.angle = HEADING_LEFT;
        } else if input.right {
            body.vx += step;
            body.angle = HEADING_RIGHT;
        }
        if input.up {
            body.vy -= step;
            body.angle = HEADING_UP;
        } else if input.down {
            body.vy += step;
            body.angle = HEADING_DOWN;
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RoundPhase::MatchEnded
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: PlayerIndex) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn controlled_player(&self) -> PlayerIndex {
        self.controlled
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    /// Mutable body access for the physics host.
    pub fn body_mut(&mut self, index: PlayerIndex) -> Option<&mut Body> {
        self.players.get_mut(index).map(|p| &mut p.body)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn scoreboard(&self) -> &S {
        &self.scoreboard
    }

    pub fn weapon(&self) -> &W {
        &self.weapon
    }

    pub fn standings(&self) -> Vec<Standing> {
        scoreboard::standings(&self.players)
    }

    /// Seconds the current round has been active.
    pub fn round_elapsed(&self) -> f32 {
        self.game_timer.elapsed()
    }

    pub fn countdown_seconds_left(&self) -> Option<u32> {
        self.round_timer.seconds_left()
    }

    /// Round transitions waiting to fire.
    pub fn pending_transitions(&self) -> usize {
        self.scheduler.len()
    }
}
