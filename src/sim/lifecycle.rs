//! Lifecycle bookkeeping: old-age expiry and committing a scan's deaths and births

use super::state::{Ball, SimEvent};

/// Remove every ball whose age has reached `lifetime_ms`
///
/// Runs before motion, so an expiring ball never moves or collides on the
/// tick that kills it.
pub fn expire_by_age(balls: &mut Vec<Ball>, now_ms: f64, lifetime_ms: f64) -> Vec<SimEvent> {
    let mut events = Vec::new();
    balls.retain(|ball| {
        if ball.is_expired(now_ms, lifetime_ms) {
            events.push(SimEvent::Expired { id: ball.id });
            false
        } else {
            true
        }
    });
    events
}

/// Apply a scan's deferred results: drop the killed, then append the newborns
///
/// `killed` is indexed by scan position and must match `balls` in length.
pub fn commit(balls: &mut Vec<Ball>, killed: &[bool], births: Vec<Ball>) {
    debug_assert_eq!(balls.len(), killed.len());
    let mut index = 0;
    balls.retain(|_| {
        let keep = !killed.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
    balls.extend(births);
}
