//! Collision detection and response for circles
//!
//! Two cases: a ball pressing against the inside of the dish wall, and two
//! overlapping balls exchanging momentum along their contact normal.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal (see each check for its orientation)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against the inside of the dish wall
///
/// The normal points outward from the dish center through the ball. A ball
/// sitting exactly on the center has no defined normal and never hits.
pub fn ball_wall_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    center: Vec2,
    wall_radius: f32,
) -> CollisionResult {
    let d = ball_pos - center;
    let dist = d.length();

    if dist + ball_radius > wall_radius && dist > 0.0 {
        return CollisionResult {
            hit: true,
            normal: d / dist,
            penetration: dist + ball_radius - wall_radius,
        };
    }

    CollisionResult::miss()
}

/// Check two balls for overlap
///
/// The normal points from `a` toward `b`. Touching exactly (distance equal
/// to the radius sum) is not an overlap. Coincident centers overlap but
/// report a zero normal.
pub fn ball_ball_collision(
    a_pos: Vec2,
    a_radius: f32,
    b_pos: Vec2,
    b_radius: f32,
) -> CollisionResult {
    let delta = b_pos - a_pos;
    let dist_sq = delta.length_squared();
    let min_dist = a_radius + b_radius;

    if dist_sq >= min_dist * min_dist {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0 { delta / dist } else { Vec2::ZERO };
    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// Velocity changes produced by an elastic collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElasticResponse {
    pub a_vel: Vec2,
    pub b_vel: Vec2,
    /// Positional correction for `a`; `b` moves by the negation
    pub a_shift: Vec2,
}

/// Elastic collision along `normal` (pointing from a to b)
///
/// Returns `None` when the pair is separating or sliding tangentially, so
/// resolving never adds energy. Mass is the caller's choice (the simulation
/// uses radius², an areal model). Momentum along the normal is conserved.
pub fn resolve_elastic(
    a_vel: Vec2,
    a_mass: f32,
    b_vel: Vec2,
    b_mass: f32,
    normal: Vec2,
    penetration: f32,
) -> Option<ElasticResponse> {
    let approach = (b_vel - a_vel).dot(normal);
    let total_mass = a_mass + b_mass;
    if approach >= 0.0 || total_mass <= 0.0 || normal == Vec2::ZERO {
        return None;
    }

    let impulse = 2.0 * approach / total_mass;
    Some(ElasticResponse {
        a_vel: a_vel + normal * (impulse * b_mass),
        b_vel: b_vel - normal * (impulse * a_mass),
        a_shift: -normal * (penetration * 0.5),
    })
}
