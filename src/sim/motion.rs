//! Motion integration and dish-wall reflection
//!
//! All balls move first, then all are checked against the wall, so no ball
//! sees another's half-updated position.

use super::collision::{ball_wall_collision, reflect_velocity};
use super::container::Container;
use super::state::Ball;

/// One explicit Euler step (one tick, no sub-stepping)
#[inline]
pub fn advance(ball: &mut Ball) {
    ball.pos += ball.vel;
    ball.age_ticks += 1;
}

pub fn advance_all(balls: &mut [Ball]) {
    for ball in balls.iter_mut() {
        advance(ball);
    }
}

/// Bounce a ball off the dish wall
///
/// Velocity is reflected and the ball pushed back inside along the same
/// normal. Returns whether the ball touched the wall.
pub fn reflect(ball: &mut Ball, container: &Container) -> bool {
    let hit = ball_wall_collision(ball.pos, ball.radius, container.center, container.radius);
    if !hit.hit {
        return false;
    }

    ball.vel = reflect_velocity(ball.vel, hit.normal);
    ball.pos -= hit.normal * hit.penetration;
    true
}

/// Reflect every ball; returns how many touched the wall
pub fn reflect_all(balls: &mut [Ball], container: &Container) -> usize {
    balls
        .iter_mut()
        .map(|ball| reflect(ball, container))
        .filter(|&hit| hit)
        .count()
}
