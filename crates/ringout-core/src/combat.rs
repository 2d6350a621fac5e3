use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerIndex};

/// An attack the controlled player can trigger.
///
/// Weapons only push bodies and record attribution. They never eliminate
/// anyone directly; knocked-out craft are picked up by the boundary scan.
pub trait Weapon {
    /// Fire on behalf of `attacker`. Requests the weapon cannot honor are
    /// dropped silently.
    fn use_weapon(&mut self, attacker: PlayerIndex, players: &mut [Player]);

    /// Advance cooldowns.
    fn tick(&mut self, _dt: f32) {}
}

/// A weapon that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unarmed;

impl Weapon for Unarmed {
    fn use_weapon(&mut self, _attacker: PlayerIndex, _players: &mut [Player]) {}
}

/// Tuning for [`Shockwave`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShockwaveConfig {
    /// Reach of the blast, measured between body centers.
    pub radius: f32,
    /// Velocity added to each target, directed away from the attacker.
    pub impulse: f32,
    /// Seconds before the weapon can fire again.
    pub cooldown_secs: f32,
}

impl Default for ShockwaveConfig {
    fn default() -> Self {
        Self {
            radius: 120.0,
            impulse: 250.0,
            cooldown_secs: 1.0,
        }
    }
}

/// Radial knockback centered on the attacker.
#[derive(Debug, Clone)]
pub struct Shockwave {
    config: ShockwaveConfig,
    cooldown: f32,
}

impl Shockwave {
    pub fn new(config: ShockwaveConfig) -> Self {
        Self {
            config,
            cooldown: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn config(&self) -> &ShockwaveConfig {
        &self.config
    }
}

impl Default for Shockwave {
    fn default() -> Self {
        Self::new(ShockwaveConfig::default())
    }
}

impl Weapon for Shockwave {
    fn use_weapon(&mut self, attacker: PlayerIndex, players: &mut [Player]) {
        if !self.is_ready() {
            return;
        }
        let Some(origin) = players.get(attacker) else {
            tracing::debug!(attacker, "Shockwave fired by unknown player");
            return;
        };
        if !origin.accepts_input() {
            return;
        }
        let (ox, oy) = (origin.body.x, origin.body.y);
        let reach_sq = self.config.radius * self.config.radius;

        let mut hits = 0u32;
        for target in players.iter_mut() {
            if target.index() == attacker || !target.is_alive() {
                continue;
            }
            let dx = target.body.x - ox;
            let dy = target.body.y - oy;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > reach_sq {
                continue;
            }
            // Stacked bodies get pushed along +x
            let (nx, ny) = if dist_sq > 1e-6 {
                let dist = dist_sq.sqrt();
                (dx / dist, dy / dist)
            } else {
                (1.0, 0.0)
            };
            target.body.vx += nx * self.config.impulse;
            target.body.vy += ny * self.config.impulse;
            target.last_touched_by = Some(attacker);
            hits += 1;
        }

        tracing::debug!(attacker, hits, "Shockwave fired");
        self.cooldown = self.config.cooldown_secs;
    }

    fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerColor;

    fn unlocked_roster(positions: &[(f32, f32)]) -> Vec<Player> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let mut p = Player::new(i, format!("P{i}"), PlayerColor::for_index(i));
                p.place_at(x, y);
                p.unlock();
                p
            })
            .collect()
    }

    #[test]
    fn pushes_targets_in_range_away_from_attacker() {
        let mut players = unlocked_roster(&[(0.0, 0.0), (50.0, 0.0), (0.0, -60.0), (500.0, 0.0)]);
        let mut weapon = Shockwave::default();
        weapon.use_weapon(0, &mut players);

        assert!(players[1].body.vx > 0.0, "Target to the right pushed right");
        assert!(players[2].body.vy < 0.0, "Target above pushed up");
        assert_eq!(players[1].last_touched_by, Some(0));
        assert_eq!(players[2].last_touched_by, Some(0));

        assert_eq!(players[3].body.vx, 0.0, "Out of range target untouched");
        assert_eq!(players[3].last_touched_by, None);
        assert_eq!(players[0].body.vx, 0.0, "Attacker is not pushed");
    }

    #[test]
    fn cooldown_blocks_refire() {
        let mut players = unlocked_roster(&[(0.0, 0.0), (50.0, 0.0)]);
        let mut weapon = Shockwave::default();
        weapon.use_weapon(0, &mut players);
        let vx_after_first = players[1].body.vx;
        assert!(!weapon.is_ready());

        weapon.use_weapon(0, &mut players);
        assert_eq!(players[1].body.vx, vx_after_first, "Second shot blocked");

        weapon.tick(weapon.config().cooldown_secs);
        assert!(weapon.is_ready());
        weapon.use_weapon(0, &mut players);
        assert!(players[1].body.vx > vx_after_first);
    }

    #[test]
    fn locked_or_dead_attacker_cannot_fire() {
        let mut players = unlocked_roster(&[(0.0, 0.0), (50.0, 0.0)]);
        players[0].lock();
        let mut weapon = Shockwave::default();
        weapon.use_weapon(0, &mut players);
        assert_eq!(players[1].body.vx, 0.0);
        assert!(weapon.is_ready(), "Rejected shot does not start cooldown");

        players[0].unlock();
        players[0].kill();
        weapon.use_weapon(0, &mut players);
        assert_eq!(players[1].body.vx, 0.0);
    }

    #[test]
    fn eliminated_targets_are_skipped() {
        let mut players = unlocked_roster(&[(0.0, 0.0), (50.0, 0.0)]);
        players[1].kill();
        let mut weapon = Shockwave::default();
        weapon.use_weapon(0, &mut players);
        assert_eq!(players[1].body.vx, 0.0);
        assert_eq!(players[1].last_touched_by, None);
    }

    #[test]
    fn unknown_attacker_ignored() {
        let mut players = unlocked_roster(&[(0.0, 0.0)]);
        let mut weapon = Shockwave::default();
        weapon.use_weapon(9, &mut players);
        assert!(weapon.is_ready());
    }

    #[test]
    fn unarmed_changes_nothing() {
        let mut players = unlocked_roster(&[(0.0, 0.0), (10.0, 0.0)]);
        let before = players.clone();
        Unarmed.use_weapon(0, &mut players);
        assert_eq!(players, before);
    }
}
