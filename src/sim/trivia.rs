//! Trivia questions and the collection-triggered gate
//!
//! One question per collected heart, strictly in list order, each at most
//! once per session. While a question is open the game loop keeps ticking
//! for rendering but movement and collision are suspended. Correctness is
//! cosmetic: it picks a feedback line and is remembered for the session,
//! nothing else.

use serde::{Deserialize, Serialize};

/// An immutable question with a fixed option list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl TriviaQuestion {
    fn new(question: &str, options: [&str; 4], correct_index: usize) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_index,
        }
    }
}

/// The built-in question list
pub fn default_questions() -> Vec<TriviaQuestion> {
    vec![
        TriviaQuestion::new(
            "Where was our first date?",
            [
                "Coffee shop downtown",
                "The park by the lake",
                "That cozy restaurant",
                "Movie theater",
            ],
            2,
        ),
        TriviaQuestion::new(
            "Who said 'I love you' first?",
            [
                "You did \u{1f495}",
                "I did \u{1f496}",
                "We said it together",
                "We haven't yet!",
            ],
            0,
        ),
        TriviaQuestion::new(
            "What's our favorite thing to do together?",
            ["Watch movies", "Cook dinner", "Go on walks", "Play games"],
            1,
        ),
        TriviaQuestion::new(
            "Which of these reminds you of me most?",
            [
                "Warm hugs",
                "Silly jokes",
                "Late night talks",
                "All of the above \u{1f498}",
            ],
            3,
        ),
    ]
}

const CORRECT_FEEDBACK: [&str; 4] = [
    "You know me so well! \u{1f495}",
    "Perfect! \u{1f496}",
    "That's right! \u{1f498}",
    "Exactly! \u{1f497}",
];

const INCORRECT_FEEDBACK: [&str; 4] = [
    "Close enough! \u{1f495}",
    "I still love you! \u{1f496}",
    "Nice try! \u{1f498}",
    "You're adorable! \u{1f497}",
];

/// Feedback line for an answer, varied by question position
pub fn feedback_message(correct: bool, question_index: usize) -> &'static str {
    let pool = if correct {
        &CORRECT_FEEDBACK
    } else {
        &INCORRECT_FEEDBACK
    };
    pool[question_index % pool.len()]
}

/// The pause-and-question gate
///
/// Inactive until a collection queues an opening; `open_next` activates the
/// next unseen question; `answer` resolves it and deactivates immediately.
/// Collections beyond the question list leave the gate shut for the rest of
/// the session.
#[derive(Debug)]
pub struct TriviaGate {
    questions: Vec<TriviaQuestion>,
    /// Index of the next question to present; never wraps or repeats
    next: usize,
    /// Openings owed for collections that happened while a question was
    /// already up (simultaneous multi-collection)
    pending: usize,
    active: Option<usize>,
    answers: Vec<bool>,
}

impl TriviaGate {
    pub fn new(questions: Vec<TriviaQuestion>) -> Self {
        Self {
            questions,
            next: 0,
            pending: 0,
            active: None,
            answers: Vec::new(),
        }
    }

    /// Queue one gate opening. Requests past the end of the question list
    /// are dropped: overrun means "no further trivia", never a fault.
    pub fn enqueue(&mut self) {
        if self.next + self.pending < self.questions.len() {
            self.pending += 1;
        }
    }

    /// Activate the next queued question, if any. Returns whether a question
    /// was opened.
    pub fn open_next(&mut self) -> bool {
        if self.active.is_some() || self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        self.active = Some(self.next);
        true
    }

    /// The question currently awaiting an answer
    pub fn current(&self) -> Option<&TriviaQuestion> {
        self.active.map(|i| &self.questions[i])
    }

    /// Index of the question currently awaiting an answer
    pub fn current_index(&self) -> Option<usize> {
        self.active
    }

    /// Resolve the open question with the chosen option. The collaborator
    /// guarantees a valid option index; the gate does not range-check.
    /// Returns whether the answer was correct, or `None` if no question was
    /// open.
    pub fn answer(&mut self, choice: usize) -> Option<bool> {
        let index = self.active.take()?;
        let correct = choice == self.questions[index].correct_index;
        self.answers.push(correct);
        self.next = index + 1;
        Some(correct)
    }

    /// Whether a question is awaiting an answer (the game loop is paused)
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Questions not yet presented
    pub fn remaining(&self) -> usize {
        self.questions.len() - self.next
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Correctness history, in presentation order (cosmetic)
    pub fn answers(&self) -> &[bool] {
        &self.answers
    }

    /// Queue every question at once (the standalone interlude variant)
    pub fn enqueue_all(&mut self) {
        self.pending = self.questions.len() - self.next;
    }
}
