pub mod arena;
pub mod collision;
pub mod combat;
pub mod config;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod player;
pub mod scoreboard;
pub mod timer;

pub use arena::Arena;
pub use collision::Contact;
pub use combat::{Shockwave, ShockwaveConfig, Unarmed, Weapon};
pub use config::MatchConfig;
pub use error::MatchError;
pub use events::{EliminationCause, MatchEvent};
pub use orchestrator::{ControlInput, Match, RoundPhase};
pub use player::{Body, Player, PlayerColor, PlayerIndex};
pub use scoreboard::{ScoreTable, Scoreboard, Standing};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::combat::Weapon;
    use crate::config::MatchConfig;
    use crate::events::MatchEvent;
    use crate::orchestrator::{ControlInput, Match, RoundPhase};
    use crate::player::PlayerIndex;
    use crate::scoreboard::Scoreboard;

    /// Config with `n` players named Player1..PlayerN and short timings.
    pub fn test_config(n: usize, rounds: i32) -> MatchConfig {
        MatchConfig {
            round_count: rounds,
            roster: (0..n).map(|i| format!("Player{}", i + 1)).collect(),
            countdown_secs: 2.0,
            round_transition_delay_secs: 2.0,
            ..MatchConfig::default()
        }
    }

    /// Build a default-weapon match from [`test_config`].
    pub fn make_match(n: usize, rounds: i32) -> Match {
        Match::new(test_config(n, rounds)).expect("test config is valid")
    }

    pub fn idle() -> ControlInput {
        ControlInput::default()
    }

    /// Tick with idle input until the countdown hands over to the active
    /// round, returning every event seen on the way.
    pub fn finish_countdown<W: Weapon, S: Scoreboard>(m: &mut Match<W, S>) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            if m.phase() != RoundPhase::Countdown {
                break;
            }
            events.extend(m.update(0.1, &idle()));
        }
        assert_eq!(m.phase(), RoundPhase::Active, "countdown never finished");
        events
    }

    /// Teleport a player well past the arena edge.
    pub fn push_out_of_arena<W: Weapon, S: Scoreboard>(m: &mut Match<W, S>, index: PlayerIndex) {
        let (cx, cy) = m.arena().center();
        let r = m.arena().radius();
        let body = m.body_mut(index).expect("player exists");
        body.x = cx + r * 2.0;
        body.y = cy;
    }

    /// Run `n` updates with the same input, returning all accumulated events.
    pub fn run_ticks<W: Weapon, S: Scoreboard>(
        m: &mut Match<W, S>,
        n: usize,
        dt: f32,
        input: &ControlInput,
    ) -> Vec<MatchEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(m.update(dt, input));
        }
        all_events
    }
}
