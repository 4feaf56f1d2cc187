//! Ball construction: initial population and offspring

use glam::Vec2;

use super::container::Container;
use super::rng::SimRng;
use super::state::{Ball, BallKind, IdAllocator};
use crate::consts::*;
use crate::{clamp_radius, polar_to_cartesian};

/// Random velocity for a ball of the given radius
///
/// Direction is uniform; speed is `uniform(0.5, 1.0) * speed_scale *
/// (BALL_RADIUS / radius)`, so small balls are fast and big ones slow.
pub fn spawn_kinematics<R: SimRng + ?Sized>(radius: f32, speed_scale: f32, rng: &mut R) -> Vec2 {
    let angle = rng.angle();
    let size_multiplier = BALL_RADIUS / radius.max(MIN_BALL_RADIUS);
    let speed = rng.range(0.5, 1.0) * speed_scale * size_multiplier;
    polar_to_cartesian(speed, angle)
}

/// Spawn `count` balls with alternating kinds, uniformly spread over the
/// current dish area
pub fn spawn_initial<R: SimRng + ?Sized>(
    count: usize,
    container: &Container,
    speed_scale: f32,
    now_ms: f64,
    rng: &mut R,
    ids: &mut IdAllocator,
) -> Vec<Ball> {
    let usable = (container.radius - BALL_RADIUS * 2.0).max(0.0);

    (0..count)
        .map(|i| {
            let kind = BallKind::alternating(i);

            // sqrt gives uniform density per unit area
            let angle = rng.angle();
            let r = rng.unit().sqrt() * usable;
            let pos = container.center + polar_to_cartesian(r, angle);

            let radius = clamp_radius(
                BALL_RADIUS + rng.range(-INITIAL_RADIUS_VARIANCE, INITIAL_RADIUS_VARIANCE),
            );
            let vel = spawn_kinematics(radius, speed_scale, rng);

            Ball::new(ids.allocate(), kind, pos, vel, radius, now_ms + NEWBORN_GRACE_MS)
        })
        .collect()
}

/// Offspring of two parents: one ball, or two when `twin` is set
///
/// Size is the parents' average plus a little noise; kind is a coin flip,
/// not inherited.
pub fn spawn_offspring<R: SimRng + ?Sized>(
    a: &Ball,
    b: &Ball,
    twin: bool,
    speed_scale: f32,
    now_ms: f64,
    rng: &mut R,
    ids: &mut IdAllocator,
) -> Vec<Ball> {
    let midpoint = (a.pos + b.pos) * 0.5;
    let avg_radius = (a.radius + b.radius) * 0.5;
    let count = if twin { 2 } else { 1 };

    (0..count)
        .map(|i| {
            let radius = clamp_radius(
                avg_radius + rng.range(-OFFSPRING_RADIUS_VARIANCE, OFFSPRING_RADIUS_VARIANCE),
            );
            let kind = if rng.chance(0.5) { BallKind::A } else { BallKind::B };
            let vel = spawn_kinematics(radius, speed_scale, rng);
            let pos = if i == 0 {
                midpoint
            } else {
                midpoint + Vec2::splat(TWIN_OFFSET)
            };
            Ball::new(ids.allocate(), kind, pos, vel, radius, now_ms + NEWBORN_GRACE_MS)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRng, create_rng};

    #[test]
    fn test_initial_population_balanced_and_inside() {
        let container = Container::default();
        let mut rng = create_rng(42);
        let mut ids = IdAllocator::default();
        let balls = spawn_initial(21, &container, 2.0, 0.0, &mut rng, &mut ids);

        assert_eq!(balls.len(), 21);
        let a = balls.iter().filter(|b| b.kind == BallKind::A).count();
        assert_eq!(a, 11);
        for ball in &balls {
            let dist = (ball.pos - container.center).length();
            assert!(dist <= container.radius - BALL_RADIUS * 2.0 + 1e-3);
            assert!((MIN_BALL_RADIUS..=MAX_BALL_RADIUS).contains(&ball.radius));
            assert_eq!(ball.last_breed_ms, NEWBORN_GRACE_MS);
        }
    }

    #[test]
    fn test_smaller_balls_move_faster() {
        let mut rng = ScriptedRng::constant(0.0);
        let small = spawn_kinematics(4.0, 1.0, &mut rng).length();
        let big = spawn_kinematics(16.0, 1.0, &mut rng).length();
        // uniform(0.5, 1.0) bottoms out at 0.5
        assert!((small - 1.0).abs() < 1e-5);
        assert!((big - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_zero_radius_does_not_produce_nan() {
        let mut rng = create_rng(1);
        let vel = spawn_kinematics(0.0, 2.0, &mut rng);
        assert!(vel.is_finite());
    }

    #[test]
    fn test_offspring_at_midpoint_with_twin_offset() {
        let a = Ball::new(1, BallKind::A, Vec2::new(0.0, 0.0), Vec2::ZERO, 6.0, 0.0);
        let b = Ball::new(2, BallKind::B, Vec2::new(10.0, 0.0), Vec2::ZERO, 10.0, 0.0);
        let mut rng = create_rng(3);
        let mut ids = IdAllocator::default();

        let kids = spawn_offspring(&a, &b, true, 2.0, 5000.0, &mut rng, &mut ids);
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].pos, Vec2::new(5.0, 0.0));
        assert_eq!(kids[1].pos, Vec2::new(5.0 + TWIN_OFFSET, TWIN_OFFSET));
        assert_ne!(kids[0].id, kids[1].id);
        for kid in &kids {
            assert!((7.0..=9.0).contains(&kid.radius));
            assert_eq!(kid.created_ms, 5000.0 + NEWBORN_GRACE_MS);
            assert_eq!(kid.age_ticks, 0);
        }
    }

    #[test]
    fn test_offspring_radius_clamped() {
        let a = Ball::new(1, BallKind::A, Vec2::ZERO, Vec2::ZERO, MAX_BALL_RADIUS, 0.0);
        let b = Ball::new(2, BallKind::B, Vec2::ZERO, Vec2::ZERO, MAX_BALL_RADIUS, 0.0);
        // variance roll 0.99 -> +0.98
        let mut rng = ScriptedRng::new([0.99], 0.5);
        let mut ids = IdAllocator::default();
        let kids = spawn_offspring(&a, &b, false, 1.0, 0.0, &mut rng, &mut ids);
        assert_eq!(kids[0].radius, MAX_BALL_RADIUS);
    }
}
