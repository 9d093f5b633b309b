//! Final reveal sequence
//!
//! Typewriter intro, then the big question, then the confetti finale.
//! Everything is a pure projection of `now` over a start timestamp; the
//! only state transitions are the phase advances and the one-shot confetti
//! burst on an affirmative answer (both answers are affirmative).

use rand::Rng;

/// The typewritten intro line
pub const REVEAL_TEXT: &str = "You unlocked the final question!";

/// Milliseconds per typed character
pub const TYPE_INTERVAL_MS: f64 = 80.0;
/// Hold on the finished line before the question appears
pub const QUESTION_DELAY_MS: f64 = 800.0;
/// Hold on the question before the answer buttons appear
pub const BUTTONS_DELAY_MS: f64 = 1000.0;
/// Confetti pieces spawned by the finale
pub const CONFETTI_COUNT: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Typing,
    Question,
    Finale,
}

/// One falling confetti heart, parameters consumed by the CSS animation
#[derive(Debug, Clone, Copy)]
pub struct ConfettiPiece {
    pub left_pct: f32,
    pub delay_ms: f32,
    pub fall_ms: f32,
    pub rotation_deg: f32,
}

/// State of the reveal screen
#[derive(Debug)]
pub struct Reveal {
    started_at: f64,
    phase: RevealPhase,
    question_at: Option<f64>,
    confetti: Vec<ConfettiPiece>,
}

impl Reveal {
    pub fn new(now: f64) -> Self {
        Self {
            started_at: now,
            phase: RevealPhase::Typing,
            question_at: None,
            confetti: Vec::new(),
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// How many characters of the intro line are visible
    pub fn typed_chars(&self, now: f64) -> usize {
        let elapsed = (now - self.started_at).max(0.0);
        let typed = (elapsed / TYPE_INTERVAL_MS) as usize;
        typed.min(REVEAL_TEXT.chars().count())
    }

    fn typing_done_at(&self) -> f64 {
        self.started_at + REVEAL_TEXT.chars().count() as f64 * TYPE_INTERVAL_MS
    }

    /// Advance phases whose deadlines have passed
    pub fn tick(&mut self, now: f64) {
        if self.phase == RevealPhase::Typing && now >= self.typing_done_at() + QUESTION_DELAY_MS {
            self.phase = RevealPhase::Question;
            self.question_at = Some(now);
        }
    }

    /// Answer buttons appear a beat after the question
    pub fn buttons_visible(&self, now: f64) -> bool {
        self.phase == RevealPhase::Question
            && self
                .question_at
                .is_some_and(|at| now >= at + BUTTONS_DELAY_MS)
    }

    /// Either button is a yes: burst confetti and enter the finale. Ignored
    /// unless the question is showing.
    pub fn choose_yes<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != RevealPhase::Question {
            return;
        }
        self.confetti = (0..CONFETTI_COUNT)
            .map(|_| ConfettiPiece {
                left_pct: rng.random_range(0.0..100.0),
                delay_ms: rng.random_range(0.0..2000.0),
                fall_ms: rng.random_range(3000.0..5000.0),
                rotation_deg: rng.random_range(0.0..360.0),
            })
            .collect();
        self.phase = RevealPhase::Finale;
        log::info!("they said yes");
    }

    pub fn confetti(&self) -> &[ConfettiPiece] {
        &self.confetti
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_typewriter_progression() {
        let reveal = Reveal::new(1000.0);
        assert_eq!(reveal.typed_chars(1000.0), 0);
        assert_eq!(reveal.typed_chars(1000.0 + TYPE_INTERVAL_MS), 1);
        assert_eq!(reveal.typed_chars(1000.0 + 5.5 * TYPE_INTERVAL_MS), 5);

        let len = REVEAL_TEXT.chars().count();
        // Clamped at full length forever after
        assert_eq!(reveal.typed_chars(1_000_000.0), len);
    }

    #[test]
    fn test_question_appears_after_typing_plus_hold() {
        let mut reveal = Reveal::new(0.0);
        let done = REVEAL_TEXT.chars().count() as f64 * TYPE_INTERVAL_MS;

        reveal.tick(done + QUESTION_DELAY_MS - 1.0);
        assert_eq!(reveal.phase(), RevealPhase::Typing);

        reveal.tick(done + QUESTION_DELAY_MS);
        assert_eq!(reveal.phase(), RevealPhase::Question);
    }

    #[test]
    fn test_buttons_gated_behind_delay() {
        let mut reveal = Reveal::new(0.0);
        let question_at = REVEAL_TEXT.chars().count() as f64 * TYPE_INTERVAL_MS + QUESTION_DELAY_MS;
        reveal.tick(question_at);

        assert!(!reveal.buttons_visible(question_at + BUTTONS_DELAY_MS - 1.0));
        assert!(reveal.buttons_visible(question_at + BUTTONS_DELAY_MS));
    }

    #[test]
    fn test_choose_yes_bursts_confetti_once() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut reveal = Reveal::new(0.0);

        // Ignored while still typing
        reveal.choose_yes(&mut rng);
        assert_eq!(reveal.phase(), RevealPhase::Typing);
        assert!(reveal.confetti().is_empty());

        let question_at = REVEAL_TEXT.chars().count() as f64 * TYPE_INTERVAL_MS + QUESTION_DELAY_MS;
        reveal.tick(question_at);
        reveal.choose_yes(&mut rng);
        assert_eq!(reveal.phase(), RevealPhase::Finale);
        assert_eq!(reveal.confetti().len(), CONFETTI_COUNT);
        for piece in reveal.confetti() {
            assert!((0.0..100.0).contains(&piece.left_pct));
            assert!((0.0..2000.0).contains(&piece.delay_ms));
            assert!((3000.0..5000.0).contains(&piece.fall_ms));
            assert!((0.0..360.0).contains(&piece.rotation_deg));
        }
    }
}
