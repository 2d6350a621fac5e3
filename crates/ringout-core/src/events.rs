use serde::{Deserialize, Serialize};

use crate::player::PlayerIndex;
use crate::scoreboard::Standing;

/// Why a player was eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationCause {
    /// The craft's center left the arena boundary.
    FellOff,
    /// Removed by the host (e.g. a combat resolution outside the core).
    External,
}

/// Events emitted by the match during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// The pre-round countdown display changed.
    CountdownTick { round: u32, seconds_left: u32 },
    /// Countdown finished; players are unlocked.
    RoundStarted { round: u32 },
    PlayerEliminated {
        player: PlayerIndex,
        cause: EliminationCause,
        /// Last player to touch the victim, if any. Reported only; kills are
        /// not scored.
        credited_to: Option<PlayerIndex>,
    },
    /// A sole survivor took the round.
    RoundWon {
        round: u32,
        player: PlayerIndex,
        score: u32,
    },
    /// Nobody survived the round.
    RoundDrawn { round: u32 },
    NextRoundScheduled { round: u32, delay_secs: f32 },
    MatchEnded { standings: Vec<Standing> },
}

impl MatchEvent {
    /// Whether this event closes a round (won or drawn).
    pub fn ends_round(&self) -> bool {
        matches!(self, Self::RoundWon { .. } | Self::RoundDrawn { .. })
    }
}
