use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::player::Player;

/// A start position on the spawn ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPosition {
    pub x: f32,
    pub y: f32,
    /// Angle around the arena center in degrees.
    pub angle_deg: f32,
}

/// The circular playing field. Leaving it eliminates a craft.
///
/// Geometry is fixed when the arena is built; only the round-winner overlay
/// changes between rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    center_x: f32,
    center_y: f32,
    radius: f32,
    edge_offset: f32,
    round_winner: Option<String>,
}

impl Arena {
    pub fn new(center_x: f32, center_y: f32, radius: f32, edge_offset: f32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            edge_offset,
            round_winner: None,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        let (cx, cy) = config.arena_center();
        Self::new(cx, cy, config.arena_radius(), config.start_edge_offset)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Radius of the ring start positions are placed on.
    pub fn spawn_radius(&self) -> f32 {
        self.radius - self.edge_offset
    }

    /// Whether a point lies inside the boundary. A point exactly on the
    /// boundary counts as inside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    /// Evenly spaced start positions for `count` players, slot `i` at
    /// `i * 360 / count` degrees. Returns nothing for an empty roster.
    pub fn start_positions(&self, count: usize) -> Vec<StartPosition> {
        if count == 0 {
            return Vec::new();
        }
        let step = 360.0 / count as f32;
        let ring = self.spawn_radius();
        (0..count)
            .map(|i| {
                let angle_deg = i as f32 * step;
                let rad = angle_deg.to_radians();
                StartPosition {
                    x: self.center_x + ring * rad.cos(),
                    y: self.center_y + ring * rad.sin(),
                    angle_deg,
                }
            })
            .collect()
    }

    /// Move every player onto its start position at rest. Safe to call each
    /// round; the result depends only on roster order and size.
    pub fn assign_start_positions(&self, players: &mut [Player]) {
        let positions = self.start_positions(players.len());
        for (player, pos) in players.iter_mut().zip(positions) {
            player.place_at(pos.x, pos.y);
        }
    }

    pub fn show_round_winner(&mut self, name: &str) {
        self.round_winner = Some(name.to_string());
    }

    pub fn round_winner(&self) -> Option<&str> {
        self.round_winner.as_deref()
    }

    /// Clear round-scoped overlay state before the next round.
    pub fn reset(&mut self) {
        self.round_winner = None;
    }
}
