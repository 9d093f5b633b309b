//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Timestamped ticks only; the caller owns the clock
//! - Seeded RNG only (heart placement)
//! - Every wait is a scheduled task, never a platform timer
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod movement;
pub mod sparkle;
pub mod state;
pub mod tick;
pub mod trivia;

pub use input::{DirSet, InputTracker, Key};
pub use sparkle::{Sparkle, SparkleEffects};
pub use state::{
    Direction, GameConfig, GamePhase, GameState, Heart, ItemView, RenderSnapshot, SparkleView,
    SpriteVariant,
};
pub use tick::{scatter_hearts, tick};
pub use trivia::{TriviaGate, TriviaQuestion, default_questions, feedback_message};
