//! Scheduled-task dispatcher
//!
//! Every "wait" in the game (sparkle expiry, collection pause, completion
//! delay, trivia feedback, stage fades) is a task queued here and applied at
//! a tick boundary, never a blocking call or a bare platform timer. Tasks
//! carry a generation token: `invalidate` bumps the generation so anything
//! already queued is discarded on drain instead of firing against state that
//! has since been torn down.

/// A pending task of kind `T`, due at `fire_at` (ms timebase)
#[derive(Debug, Clone)]
struct Task<T> {
    fire_at: f64,
    generation: u64,
    kind: T,
}

/// Time-ordered task queue processed at tick boundaries
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: Vec<Task<T>>,
    generation: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            generation: 0,
        }
    }

    /// Queue `kind` to fire once `now >= fire_at`
    pub fn schedule(&mut self, fire_at: f64, kind: T) {
        self.tasks.push(Task {
            fire_at,
            generation: self.generation,
            kind,
        });
    }

    /// Remove and return every due task of the current generation, in firing
    /// order. Due tasks from older generations are dropped silently.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        if self.tasks.is_empty() {
            return Vec::new();
        }

        let generation = self.generation;
        let mut due: Vec<Task<T>> = Vec::new();
        let mut remaining: Vec<Task<T>> = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.generation != generation {
                // Stale generation: the owning session is gone, drop it
                continue;
            }
            if task.fire_at <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;

        // Stable sort keeps same-instant tasks in insertion order
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due.into_iter().map(|t| t.kind).collect()
    }

    /// Invalidate everything queued so far; tasks scheduled afterwards are
    /// unaffected. Stale tasks are discarded on the next drain.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        A,
        B,
        C,
    }

    #[test]
    fn test_fires_in_time_order() {
        let mut sched = Scheduler::new();
        sched.schedule(300.0, Probe::C);
        sched.schedule(100.0, Probe::A);
        sched.schedule(200.0, Probe::B);

        assert_eq!(sched.drain_due(50.0), vec![]);
        assert_eq!(sched.drain_due(250.0), vec![Probe::A, Probe::B]);
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.drain_due(300.0), vec![Probe::C]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_same_instant_keeps_insertion_order() {
        let mut sched = Scheduler::new();
        sched.schedule(100.0, Probe::B);
        sched.schedule(100.0, Probe::A);

        assert_eq!(sched.drain_due(100.0), vec![Probe::B, Probe::A]);
    }

    #[test]
    fn test_invalidated_tasks_never_fire() {
        let mut sched = Scheduler::new();
        sched.schedule(100.0, Probe::A);
        sched.invalidate();
        sched.schedule(100.0, Probe::B);

        assert_eq!(sched.drain_due(500.0), vec![Probe::B]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_drain_is_exactly_once() {
        let mut sched = Scheduler::new();
        sched.schedule(100.0, Probe::A);

        assert_eq!(sched.drain_due(100.0), vec![Probe::A]);
        assert_eq!(sched.drain_due(1000.0), vec![]);
    }
}
