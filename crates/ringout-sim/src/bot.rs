use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ringout_core::{ControlInput, Match, Player, PlayerIndex, Scoreboard, Weapon};

/// Fraction of the arena radius past which a bot heads back to the center.
const EDGE_CAUTION: f32 = 0.75;
/// Chance per tick that a bot ignores its plan and drifts randomly.
const WANDER_CHANCE: f64 = 0.15;
/// Chance per tick that the controlled bot fires when a rival is in reach.
const ATTACK_CHANCE: f64 = 0.2;
/// Dead zone for turning a steering vector into button presses.
const AXIS_DEAD_ZONE: f32 = 0.3;

/// Scripted stand-in for local input and remote players.
///
/// Every bot chases its nearest living rival, backs off from the edge, and
/// occasionally wanders. All randomness comes from one seeded RNG so a run
/// is reproducible.
pub struct BotDriver {
    rng: StdRng,
    thrust: f32,
}

impl BotDriver {
    pub fn new(seed: u64, thrust: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            thrust,
        }
    }

    /// Button state for the controlled player this tick.
    pub fn control_input<W: Weapon, S: Scoreboard>(&mut self, game: &Match<W, S>) -> ControlInput {
        let Some(me) = game.player(game.controlled_player()) else {
            return ControlInput::default();
        };
        if !me.accepts_input() {
            return ControlInput::default();
        }
        let (sx, sy) = self.steer(game, me);
        let attack = nearest_rival(game.players(), me).is_some_and(|(_, dist)| {
            dist <= game.config().weapon.radius && self.rng.random_bool(ATTACK_CHANCE)
        });
        ControlInput {
            left: sx < -AXIS_DEAD_ZONE,
            right: sx > AXIS_DEAD_ZONE,
            up: sy < -AXIS_DEAD_ZONE,
            down: sy > AXIS_DEAD_ZONE,
            attack,
        }
    }

    /// Push every other unlocked player along its own steering vector.
    pub fn drive_others<W: Weapon, S: Scoreboard>(&mut self, game: &mut Match<W, S>) {
        let accel = game.config().velocity_step * self.thrust;
        let controlled = game.controlled_player();
        let view: &Match<W, S> = game;
        let plans: Vec<(PlayerIndex, (f32, f32))> = view
            .players()
            .iter()
            .filter(|p| p.index() != controlled && p.accepts_input())
            .map(|p| (p.index(), self.steer(view, p)))
            .collect();

        for (index, (sx, sy)) in plans {
            if let Some(body) = game.body_mut(index) {
                body.vx += sx * accel;
                body.vy += sy * accel;
                if sx != 0.0 || sy != 0.0 {
                    body.angle = sy.atan2(sx).to_degrees();
                }
            }
        }
    }

    /// Unit steering vector for `me`.
    fn steer<W: Weapon, S: Scoreboard>(&mut self, game: &Match<W, S>, me: &Player) -> (f32, f32) {
        if self.rng.random_bool(WANDER_CHANCE) {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            return (angle.cos(), angle.sin());
        }

        let (cx, cy) = game.arena().center();
        let to_center = (cx - me.body.x, cy - me.body.y);
        let from_center = (to_center.0 * to_center.0 + to_center.1 * to_center.1).sqrt();
        if from_center > game.arena().radius() * EDGE_CAUTION {
            return normalize(to_center);
        }

        match nearest_rival(game.players(), me) {
            Some((rival, _)) => normalize((rival.body.x - me.body.x, rival.body.y - me.body.y)),
            None => normalize(to_center),
        }
    }
}

/// Closest other living player and its distance.
fn nearest_rival<'a>(players: &'a [Player], me: &Player) -> Option<(&'a Player, f32)> {
    players
        .iter()
        .filter(|p| p.index() != me.index() && p.is_alive())
        .map(|p| {
            let dx = p.body.x - me.body.x;
            let dy = p.body.y - me.body.y;
            (p, (dx * dx + dy * dy).sqrt())
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn normalize((x, y): (f32, f32)) -> (f32, f32) {
    let len = (x * x + y * y).sqrt();
    if len > 1e-6 { (x / len, y / len) } else { (0.0, 0.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringout_core::test_helpers::{finish_countdown, make_match};

    #[test]
    fn locked_players_get_no_input() {
        let mut game = make_match(3, 3);
        let mut bots = BotDriver::new(1, 1.0);
        assert_eq!(bots.control_input(&game), ControlInput::default());

        bots.drive_others(&mut game);
        assert!(game.players().iter().all(|p| p.body.vx == 0.0 && p.body.vy == 0.0));
    }

    #[test]
    fn same_seed_same_decisions() {
        let mut game_a = make_match(4, 3);
        let mut game_b = make_match(4, 3);
        finish_countdown(&mut game_a);
        finish_countdown(&mut game_b);
        let mut bots_a = BotDriver::new(42, 1.0);
        let mut bots_b = BotDriver::new(42, 1.0);

        for _ in 0..50 {
            assert_eq!(bots_a.control_input(&game_a), bots_b.control_input(&game_b));
            bots_a.drive_others(&mut game_a);
            bots_b.drive_others(&mut game_b);
        }
        assert_eq!(game_a.players(), game_b.players());
    }

    #[test]
    fn others_move_but_controlled_does_not() {
        let mut game = make_match(3, 3);
        finish_countdown(&mut game);
        let mut bots = BotDriver::new(5, 1.0);
        bots.drive_others(&mut game);

        let controlled = game.player(game.controlled_player()).unwrap();
        assert_eq!((controlled.body.vx, controlled.body.vy), (0.0, 0.0));
        for p in game.players().iter().skip(1) {
            let speed = (p.body.vx * p.body.vx + p.body.vy * p.body.vy).sqrt();
            assert!(speed > 0.0, "{} should be moving", p.name);
        }
    }

    #[test]
    fn nearest_rival_skips_self_and_dead() {
        let mut game = make_match(3, 3);
        finish_countdown(&mut game);
        game.eliminate(1, ringout_core::EliminationCause::External);
        let me = game.player(0).unwrap();
        let (rival, dist) = nearest_rival(game.players(), me).unwrap();
        assert_eq!(rival.index(), 2);
        assert!(dist > 0.0);
    }

    #[test]
    fn normalize_handles_zero() {
        assert_eq!(normalize((0.0, 0.0)), (0.0, 0.0));
        let (x, y) = normalize((3.0, 4.0));
        assert!((x - 0.6).abs() < 1e-6 && (y - 0.8).abs() < 1e-6);
    }
}
