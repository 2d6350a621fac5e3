use ringout_core::collision::circles_overlap;
use ringout_core::{Body, Contact, Match, PlayerIndex, Scoreboard, Weapon};

/// Minimal kinematic world: integrates velocities, applies damping and
/// resolves craft-to-craft overlaps as equal-mass elastic collisions.
#[derive(Debug, Clone, Copy)]
pub struct Physics {
    /// Velocity multiplier per step.
    pub damping: f32,
    /// Collision radius of every craft.
    pub body_radius: f32,
}

/// Velocity below which a craft is snapped to rest.
const REST_SPEED: f32 = 0.05;
/// Substeps per tick so fast craft don't tunnel through each other.
const SUBSTEPS: u32 = 2;

impl Physics {
    pub fn new(damping: f32, body_radius: f32) -> Self {
        Self {
            damping,
            body_radius,
        }
    }

    /// Advance every living craft by `dt` and return the contacts that
    /// occurred, both directions of each pair.
    pub fn step(&self, bodies: &mut [(PlayerIndex, Body)], dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let sub_dt = dt / SUBSTEPS as f32;

        for _ in 0..SUBSTEPS {
            for (_, body) in bodies.iter_mut() {
                body.x += body.vx * sub_dt;
                body.y += body.vy * sub_dt;
            }
            for i in 0..bodies.len() {
                for j in (i + 1)..bodies.len() {
                    let (head, tail) = bodies.split_at_mut(j);
                    let (a_index, a) = &mut head[i];
                    let (b_index, b) = &mut tail[0];
                    if self.resolve_pair(a, b) {
                        let contact = Contact::new(*a_index, *b_index);
                        if !contacts.contains(&contact) {
                            contacts.push(contact);
                            contacts.push(contact.mirrored());
                        }
                    }
                }
            }
        }

        for (_, body) in bodies.iter_mut() {
            body.vx *= self.damping;
            body.vy *= self.damping;
            if body.vx.abs() < REST_SPEED && body.vy.abs() < REST_SPEED {
                body.set_zero_velocity();
            }
        }
        contacts
    }

    /// Separate two overlapping craft and swap their normal velocities.
    fn resolve_pair(&self, a: &mut Body, b: &mut Body) -> bool {
        if !circles_overlap(a.x, a.y, b.x, b.y, self.body_radius) {
            return false;
        }
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = if dist > 1e-6 {
            (dx / dist, dy / dist)
        } else {
            (1.0, 0.0)
        };

        let push = (self.body_radius * 2.0 - dist) / 2.0;
        a.x -= nx * push;
        a.y -= ny * push;
        b.x += nx * push;
        b.y += ny * push;

        let a_normal = a.vx * nx + a.vy * ny;
        let b_normal = b.vx * nx + b.vy * ny;
        // Only exchange momentum when closing in
        if a_normal - b_normal > 0.0 {
            let delta = b_normal - a_normal;
            a.vx += nx * delta;
            a.vy += ny * delta;
            b.vx -= nx * delta;
            b.vy -= ny * delta;
        }
        true
    }

    /// Run one step against a match: copy out living bodies, simulate, write
    /// them back and feed contacts into collision attribution.
    pub fn step_match<W: Weapon, S: Scoreboard>(&self, game: &mut Match<W, S>, dt: f32) -> usize {
        let mut bodies: Vec<(PlayerIndex, Body)> = game
            .players()
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| (p.index(), p.body))
            .collect();

        let contacts = self.step(&mut bodies, dt);

        for (index, body) in bodies {
            if let Some(slot) = game.body_mut(index) {
                *slot = body;
            }
        }
        for &contact in &contacts {
            game.record_contact(contact);
        }
        contacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringout_core::test_helpers::{finish_countdown, make_match};

    fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        Body {
            vx,
            vy,
            ..Body::at(x, y)
        }
    }

    #[test]
    fn integrates_and_damps() {
        let physics = Physics::new(0.5, 10.0);
        let mut bodies = vec![(0, moving(0.0, 0.0, 10.0, -4.0))];
        let contacts = physics.step(&mut bodies, 1.0);
        assert!(contacts.is_empty());
        let body = bodies[0].1;
        assert!((body.x - 10.0).abs() < 1e-4);
        assert!((body.y + 4.0).abs() < 1e-4);
        assert!((body.vx - 5.0).abs() < 1e-4);
        assert!((body.vy + 2.0).abs() < 1e-4);
    }

    #[test]
    fn slow_bodies_come_to_rest() {
        let physics = Physics::new(0.5, 10.0);
        let mut bodies = vec![(0, moving(0.0, 0.0, 0.06, 0.0))];
        physics.step(&mut bodies, 0.1);
        assert_eq!(bodies[0].1.vx, 0.0);
    }

    #[test]
    fn head_on_collision_swaps_velocity_and_reports_both_sides() {
        let physics = Physics::new(1.0, 10.0);
        let mut bodies = vec![
            (0, moving(0.0, 0.0, 50.0, 0.0)),
            (3, moving(19.0, 0.0, 0.0, 0.0)),
        ];
        let contacts = physics.step(&mut bodies, 0.01);
        assert_eq!(contacts, vec![Contact::new(0, 3), Contact::new(3, 0)]);

        let (a, b) = (bodies[0].1, bodies[1].1);
        assert!(a.vx.abs() < 1e-3, "Striker stops");
        assert!((b.vx - 50.0).abs() < 1e-3, "Target takes the velocity");
        assert!(b.x - a.x >= 20.0 - 1e-3, "Overlap resolved");
    }

    #[test]
    fn separating_bodies_keep_velocity() {
        let physics = Physics::new(1.0, 10.0);
        let mut bodies = vec![
            (0, moving(0.0, 0.0, -5.0, 0.0)),
            (1, moving(15.0, 0.0, 5.0, 0.0)),
        ];
        physics.step(&mut bodies, 0.01);
        assert!((bodies[0].1.vx + 5.0).abs() < 1e-4);
        assert!((bodies[1].1.vx - 5.0).abs() < 1e-4);
    }

    #[test]
    fn step_match_records_attribution() {
        let mut game = make_match(2, 3);
        finish_countdown(&mut game);
        let (x, y) = {
            let p = game.player(0).unwrap();
            (p.body.x, p.body.y)
        };
        *game.body_mut(1).unwrap() = Body::at(x - 20.0, y);

        let physics = Physics::new(0.98, game.config().player_collision_radius);
        let contacts = physics.step_match(&mut game, 1.0 / 60.0);
        assert_eq!(contacts, 2);
        assert_eq!(game.player(0).unwrap().last_touched_by, Some(1));
        assert_eq!(game.player(1).unwrap().last_touched_by, Some(0));
    }

    #[test]
    fn eliminated_bodies_are_frozen() {
        let mut game = make_match(3, 3);
        finish_countdown(&mut game);
        game.body_mut(2).unwrap().vx = 100.0;
        game.eliminate(2, ringout_core::EliminationCause::External);
        let before = game.player(2).unwrap().body;

        Physics::new(1.0, 28.0).step_match(&mut game, 0.5);
        assert_eq!(game.player(2).unwrap().body, before);
    }
}
