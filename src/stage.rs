//! Stage flow
//!
//! One-way forward sequence Landing -> Game -> Trivia (optional interlude)
//! -> Reveal. Each switch is wrapped in a fixed fade: `advance` queues the
//! switch, the screen reports blanked while it is pending, and the switch
//! lands at the fade deadline on the next tick. No backward transitions, no
//! skipping.

use crate::consts::STAGE_FADE_MS;
use crate::sched::Scheduler;

/// Top-level screens in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Landing,
    Game,
    /// Legacy standalone question run, used when in-game gating is off
    Trivia,
    Reveal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageTask {
    Switch,
}

/// Forward-only stage state machine with fade-gated switching
#[derive(Debug)]
pub struct StageFlow {
    current: Stage,
    pending: Option<Stage>,
    sched: Scheduler<StageTask>,
    trivia_interlude: bool,
}

impl StageFlow {
    pub fn new(trivia_interlude: bool) -> Self {
        Self {
            current: Stage::Landing,
            pending: None,
            sched: Scheduler::new(),
            trivia_interlude,
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    fn next_stage(&self) -> Option<Stage> {
        match self.current {
            Stage::Landing => Some(Stage::Game),
            Stage::Game => Some(if self.trivia_interlude {
                Stage::Trivia
            } else {
                Stage::Reveal
            }),
            Stage::Trivia => Some(Stage::Reveal),
            Stage::Reveal => None,
        }
    }

    /// Begin the fade into the next stage. A second call while a switch is
    /// already pending, or at the final stage, is a no-op.
    pub fn advance(&mut self, now: f64) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let Some(next) = self.next_stage() else {
            return false;
        };
        self.pending = Some(next);
        self.sched.schedule(now + STAGE_FADE_MS, StageTask::Switch);
        log::info!("stage fade out: {:?} -> {:?}", self.current, next);
        true
    }

    /// Apply a due switch. Returns the new stage when one landed this tick.
    pub fn tick(&mut self, now: f64) -> Option<Stage> {
        let mut switched = None;
        for StageTask::Switch in self.sched.drain_due(now) {
            if let Some(next) = self.pending.take() {
                self.current = next;
                switched = Some(next);
                log::info!("stage now {:?}", next);
            }
        }
        switched
    }

    /// Screen is blanked while a switch is pending
    pub fn is_fading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::STAGE_FADE_MS;

    #[test]
    fn test_forward_sequence_without_interlude() {
        let mut flow = StageFlow::new(false);
        assert_eq!(flow.current(), Stage::Landing);

        assert!(flow.advance(0.0));
        assert!(flow.is_fading());
        assert_eq!(flow.tick(STAGE_FADE_MS - 1.0), None);
        assert_eq!(flow.tick(STAGE_FADE_MS), Some(Stage::Game));
        assert!(!flow.is_fading());

        flow.advance(1000.0);
        assert_eq!(flow.tick(1000.0 + STAGE_FADE_MS), Some(Stage::Reveal));
    }

    #[test]
    fn test_interlude_variant_visits_trivia() {
        let mut flow = StageFlow::new(true);
        flow.advance(0.0);
        flow.tick(STAGE_FADE_MS);
        assert_eq!(flow.current(), Stage::Game);

        flow.advance(1000.0);
        assert_eq!(flow.tick(1000.0 + STAGE_FADE_MS), Some(Stage::Trivia));

        flow.advance(2000.0);
        assert_eq!(flow.tick(2000.0 + STAGE_FADE_MS), Some(Stage::Reveal));
    }

    #[test]
    fn test_double_advance_is_noop() {
        let mut flow = StageFlow::new(false);
        assert!(flow.advance(0.0));
        assert!(!flow.advance(10.0));
        flow.tick(STAGE_FADE_MS);
        assert_eq!(flow.current(), Stage::Game);
    }

    #[test]
    fn test_no_advance_past_final_stage() {
        let mut flow = StageFlow::new(false);
        flow.advance(0.0);
        flow.tick(STAGE_FADE_MS);
        flow.advance(1000.0);
        flow.tick(1000.0 + STAGE_FADE_MS);
        assert_eq!(flow.current(), Stage::Reveal);

        assert!(!flow.advance(2000.0));
        assert_eq!(flow.tick(3000.0), None);
        assert_eq!(flow.current(), Stage::Reveal);
    }
}
