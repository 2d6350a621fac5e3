#![allow(dead_code)]

use ringout_core::{ControlInput, Match, MatchConfig, MatchEvent, RoundPhase};

/// Config with `n` players and quick timings.
pub fn quick_config(n: usize, rounds: i32) -> MatchConfig {
    MatchConfig {
        round_count: rounds,
        roster: (0..n).map(|i| format!("Player{}", i + 1)).collect(),
        countdown_secs: 1.0,
        round_transition_delay_secs: 0.5,
        ..MatchConfig::default()
    }
}

pub fn quick_match(n: usize, rounds: i32) -> Match {
    Match::new(quick_config(n, rounds)).unwrap()
}

/// Tick until the phase changes away from `from`, collecting events.
pub fn tick_until_not(m: &mut Match, from: RoundPhase) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for _ in 0..1_000 {
        if m.phase() != from {
            return events;
        }
        events.extend(m.update(0.05, &ControlInput::default()));
    }
    panic!("match stuck in {from:?}");
}

/// Move a player's body outside the arena.
pub fn shove_out(m: &mut Match, index: usize) {
    let (cx, cy) = m.arena().center();
    let r = m.arena().radius();
    let body = m.body_mut(index).unwrap();
    body.x = cx;
    body.y = cy - r - 1.0;
}
