//! Transient collection sparkles
//!
//! Cosmetic only. Ids are a monotonic counter; removal is a scheduled task
//! at spawn time + display duration, so expiry tracks wall-clock and fires
//! even while the game is frozen for trivia.

use glam::Vec2;

use super::state::SimTask;
use crate::consts::SPARKLE_DURATION_MS;
use crate::sched::Scheduler;

/// A live sparkle effect
#[derive(Debug, Clone, Copy)]
pub struct Sparkle {
    pub id: u32,
    /// Top-left corner (sparkles render at the collected heart's position)
    pub pos: Vec2,
    pub spawned_at: f64,
}

/// Registry of live sparkle effects
#[derive(Debug, Default)]
pub struct SparkleEffects {
    live: Vec<Sparkle>,
    next_id: u32,
}

impl SparkleEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a sparkle and schedule its removal
    pub fn spawn(&mut self, pos: Vec2, now: f64, sched: &mut Scheduler<SimTask>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.push(Sparkle {
            id,
            pos,
            spawned_at: now,
        });
        sched.schedule(now + SPARKLE_DURATION_MS, SimTask::ExpireSparkle { id });
        id
    }

    /// Remove a sparkle whose timer fired. Unknown ids are a no-op.
    pub fn expire(&mut self, id: u32) {
        self.live.retain(|s| s.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sparkle> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPARKLE_DURATION_MS;

    #[test]
    fn test_ids_are_monotonic() {
        let mut sched = Scheduler::new();
        let mut sparkles = SparkleEffects::new();
        let a = sparkles.spawn(Vec2::ZERO, 0.0, &mut sched);
        let b = sparkles.spawn(Vec2::ZERO, 10.0, &mut sched);
        let c = sparkles.spawn(Vec2::ZERO, 20.0, &mut sched);
        assert!(a < b && b < c);
        assert_eq!(sparkles.len(), 3);
    }

    #[test]
    fn test_expiry_is_scheduled_for_display_duration() {
        let mut sched = Scheduler::new();
        let mut sparkles = SparkleEffects::new();
        let id = sparkles.spawn(Vec2::new(5.0, 6.0), 100.0, &mut sched);

        // Just before expiry: nothing due
        assert!(sched.drain_due(100.0 + SPARKLE_DURATION_MS - 1.0).is_empty());

        let due = sched.drain_due(100.0 + SPARKLE_DURATION_MS);
        assert_eq!(due, vec![SimTask::ExpireSparkle { id }]);
        sparkles.expire(id);
        assert!(sparkles.is_empty());
    }

    #[test]
    fn test_expire_unknown_id_is_noop() {
        let mut sparkles = SparkleEffects::new();
        sparkles.expire(42);
        assert!(sparkles.is_empty());
    }
}
