//! Pairwise ball interactions
//!
//! One O(n²) pass over a fixed snapshot of the live balls. Nothing is removed
//! or inserted while scanning: deaths go into a kill mask indexed by scan
//! position and newborns into a pending list, both committed afterwards.
//!
//! Per overlapping pair, in order:
//! 1. Same kind: roll that kind's kill chance. On success one of the two
//!    (coin flip) dies and the pair is done.
//! 2. Otherwise, if approaching, an elastic collision (mass = radius²).
//! 3. After a resolved collision between different kinds, a breeding attempt.

use super::collision::{ball_ball_collision, resolve_elastic};
use super::factory::spawn_offspring;
use super::rng::SimRng;
use super::state::{Ball, IdAllocator, SimEvent};
use crate::SimulationConfig;
use crate::consts::TWIN_CHANCE;

/// Deferred results of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// `killed[i]` is set if the ball at scan index `i` died this tick
    pub killed: Vec<bool>,
    /// Newborns, not visited by the scan that produced them
    pub births: Vec<Ball>,
    pub events: Vec<SimEvent>,
    /// Number of elastic collisions resolved
    pub bounces: usize,
}

impl ScanOutcome {
    pub fn kill_count(&self) -> usize {
        self.killed.iter().filter(|&&k| k).count()
    }
}

/// Room left under the population cap, counting what this scan has already decided
#[inline]
fn breeding_room(live: usize, births: usize, deaths: usize, max_population: usize) -> usize {
    max_population.saturating_sub((live + births).saturating_sub(deaths))
}

/// Run the pairwise pass over `balls`
///
/// Positions and velocities are updated in place (collision response), but
/// the slice keeps its length and order.
pub fn scan<R: SimRng + ?Sized>(
    balls: &mut [Ball],
    config: &SimulationConfig,
    now_ms: f64,
    rng: &mut R,
    ids: &mut IdAllocator,
) -> ScanOutcome {
    let n = balls.len();
    let mut out = ScanOutcome {
        killed: vec![false; n],
        ..Default::default()
    };
    let mut deaths = 0usize;

    for i in 0..n {
        for j in (i + 1)..n {
            if out.killed[i] {
                break;
            }
            if out.killed[j] {
                continue;
            }

            let (left, right) = balls.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            let contact = ball_ball_collision(a.pos, a.radius, b.pos, b.radius);
            if !contact.hit {
                continue;
            }

            // Same-type contact: possible destruction, no momentum exchange
            if a.kind == b.kind && rng.chance(a.kind.kill_chance()) {
                let (victim, victim_id, survivor_id) = if rng.chance(0.5) {
                    (i, a.id, b.id)
                } else {
                    (j, b.id, a.id)
                };
                out.killed[victim] = true;
                deaths += 1;
                out.events.push(SimEvent::Killed {
                    id: victim_id,
                    by: survivor_id,
                });
                continue;
            }

            let Some(response) = resolve_elastic(
                a.vel,
                a.mass(),
                b.vel,
                b.mass(),
                contact.normal,
                contact.penetration,
            ) else {
                continue;
            };
            a.vel = response.a_vel;
            b.vel = response.b_vel;
            a.pos += response.a_shift;
            b.pos -= response.a_shift;
            out.bounces += 1;

            if a.kind == b.kind {
                continue;
            }

            let room = breeding_room(n, out.births.len(), deaths, config.max_population);
            if room == 0
                || !a.can_breed(now_ms, config.breed_cooldown_ms)
                || !b.can_breed(now_ms, config.breed_cooldown_ms)
            {
                continue;
            }

            if !rng.chance(config.breed_chance) {
                continue;
            }
            // Twins only when both still fit under the cap
            let twin = rng.chance(TWIN_CHANCE) && room >= 2;

            let kids = spawn_offspring(a, b, twin, config.ball_speed, now_ms, rng, ids);
            a.last_breed_ms = now_ms;
            b.last_breed_ms = now_ms;

            log::trace!("Balls {} and {} bred {} offspring", a.id, b.id, kids.len());
            for kid in &kids {
                out.events.push(SimEvent::Born {
                    id: kid.id,
                    kind: kid.kind,
                    parents: (a.id, b.id),
                });
            }
            out.births.extend(kids);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::BallKind;
    use glam::Vec2;

    fn ball(id: u32, kind: BallKind, pos: Vec2, vel: Vec2) -> Ball {
        // Born long ago so the cooldown never blocks
        Ball::new(id, kind, pos, vel, 5.0, -1.0e6)
    }

    fn head_on(kind_a: BallKind, kind_b: BallKind) -> Vec<Ball> {
        vec![
            ball(1, kind_a, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            ball(2, kind_b, Vec2::new(9.0, 0.0), Vec2::new(-1.0, 0.0)),
        ]
    }

    fn config(breed_chance: f32) -> SimulationConfig {
        SimulationConfig {
            breed_chance,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_overlap_no_interaction() {
        let mut balls = vec![
            ball(1, BallKind::A, Vec2::ZERO, Vec2::X),
            ball(2, BallKind::B, Vec2::new(10.0, 0.0), -Vec2::X),
        ];
        let mut rng = ScriptedRng::constant(0.0);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.bounces, 0);
        assert!(out.births.is_empty());
        assert_eq!(balls[0].vel, Vec2::X);
    }

    #[test]
    fn test_same_kind_kill_marks_exactly_one() {
        let mut balls = head_on(BallKind::A, BallKind::A);
        // kill roll succeeds (0.0 < chance), victim coin: 0.9 -> second ball
        let mut rng = ScriptedRng::new([0.0, 0.9], 0.5);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());

        assert_eq!(out.killed, vec![false, true]);
        assert_eq!(out.events, vec![SimEvent::Killed { id: 2, by: 1 }]);
        // No bounce on a kill
        assert_eq!(out.bounces, 0);
        assert_eq!(balls[0].vel, Vec2::X);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_same_kind_failed_kill_bounces_without_breeding() {
        let mut balls = head_on(BallKind::B, BallKind::B);
        let mut rng = ScriptedRng::constant(0.99);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());

        assert_eq!(out.kill_count(), 0);
        assert_eq!(out.bounces, 1);
        assert!(out.births.is_empty());
        assert!((balls[0].vel - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((balls[1].vel - Vec2::new(1.0, 0.0)).length() < 1e-5);
        // Separated by half the 1.0 penetration each
        assert!((balls[0].pos.x - (-0.5)).abs() < 1e-5);
        assert!((balls[1].pos.x - 9.5).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_kinds_breed_and_update_cooldown() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        let mut ids = IdAllocator::default();
        ids.allocate();
        ids.allocate();
        // breed roll 0.0 passes, twin roll 0.5 fails, rest arbitrary
        let mut rng = ScriptedRng::new([0.0, 0.5], 0.3);
        let out = scan(&mut balls, &config(0.5), 10_000.0, &mut rng, &mut ids);

        assert_eq!(out.births.len(), 1);
        assert_eq!(out.births[0].id, 3);
        assert!(matches!(out.events[0], SimEvent::Born { parents: (1, 2), .. }));
        assert_eq!(balls[0].last_breed_ms, 10_000.0);
        assert_eq!(balls[1].last_breed_ms, 10_000.0);
    }

    #[test]
    fn test_twin_roll_produces_two() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        let mut rng = ScriptedRng::new([0.0, 0.0], 0.3);
        let out = scan(&mut balls, &config(0.5), 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.births.len(), 2);
    }

    #[test]
    fn test_cooldown_blocks_breeding() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        balls[1].last_breed_ms = 9_000.0;
        let mut rng = ScriptedRng::constant(0.0);
        let out = scan(&mut balls, &config(1.0), 10_000.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.bounces, 1);
        assert!(out.births.is_empty());
        assert_eq!(balls[0].last_breed_ms, -1.0e6);
    }

    #[test]
    fn test_separating_pair_never_breeds() {
        let mut balls = vec![
            ball(1, BallKind::A, Vec2::ZERO, -Vec2::X),
            ball(2, BallKind::B, Vec2::new(9.0, 0.0), Vec2::X),
        ];
        let mut rng = ScriptedRng::constant(0.0);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.bounces, 0);
        assert!(out.births.is_empty());
    }

    #[test]
    fn test_cap_blocks_breeding() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        let config = SimulationConfig {
            breed_chance: 1.0,
            initial_population: 2,
            max_population: 2,
            ..Default::default()
        };
        let mut rng = ScriptedRng::constant(0.0);
        let out = scan(&mut balls, &config, 0.0, &mut rng, &mut IdAllocator::default());
        assert!(out.births.is_empty());
    }

    #[test]
    fn test_twin_dropped_when_only_one_slot_left() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        let config = SimulationConfig {
            breed_chance: 1.0,
            initial_population: 2,
            max_population: 3,
            ..Default::default()
        };
        let mut rng = ScriptedRng::constant(0.0);
        let out = scan(&mut balls, &config, 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.births.len(), 1);
    }

    #[test]
    fn test_dead_ball_skipped_for_later_pairs() {
        // Three A balls piled together; first pair kills ball 1 (index 0)
        let mut balls = vec![
            ball(1, BallKind::A, Vec2::new(0.0, 0.0), Vec2::X),
            ball(2, BallKind::A, Vec2::new(4.0, 0.0), -Vec2::X),
            ball(3, BallKind::A, Vec2::new(2.0, 3.0), Vec2::ZERO),
        ];
        // kill roll ok, coin 0.1 -> victim index 0; then (1,2) kill roll ok, coin 0.1 -> index 1
        let mut rng = ScriptedRng::new([0.0, 0.1, 0.0, 0.1], 0.99);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(out.killed, vec![true, true, false]);
        assert_eq!(
            out.events,
            vec![
                SimEvent::Killed { id: 1, by: 2 },
                SimEvent::Killed { id: 2, by: 3 },
            ]
        );
        // The (0, 2) pair is never rolled
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_newborns_not_scanned_and_slice_unchanged() {
        let mut balls = head_on(BallKind::A, BallKind::B);
        let mut rng = ScriptedRng::new([0.0, 0.5], 0.3);
        let out = scan(&mut balls, &config(1.0), 0.0, &mut rng, &mut IdAllocator::default());
        assert_eq!(balls.len(), 2);
        assert_eq!(out.killed.len(), 2);
        assert_eq!(out.births.len(), 1);
    }

    #[test]
    fn test_breeding_room() {
        assert_eq!(breeding_room(10, 0, 0, 12), 2);
        assert_eq!(breeding_room(10, 2, 0, 12), 0);
        assert_eq!(breeding_room(10, 2, 1, 12), 1);
        assert_eq!(breeding_room(20, 0, 0, 12), 0);
    }
}
