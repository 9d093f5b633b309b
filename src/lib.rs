//! Heart Quest - a top-down heart-collection mini-game
//!
//! Core modules:
//! - `sim`: Deterministic game simulation (movement, collection, trivia gating)
//! - `sched`: Scheduled-task dispatcher for every timed callback
//! - `stage`: Landing -> Game -> Trivia -> Reveal flow with fade transitions
//! - `reveal`: Final reveal sequence (typewriter, question, confetti)
//! - `settings`: Persisted user preferences

pub mod reveal;
pub mod sched;
pub mod settings;
pub mod sim;
pub mod stage;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 480.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Sprite sizes (square, pixels)
    pub const CHARACTER_SIZE: f32 = 64.0;
    pub const HEART_SIZE: f32 = 48.0;

    /// Distance between centers below which a heart is collected
    pub const COLLECTION_DISTANCE: f32 = 56.0;

    /// Pixels moved per applied step
    pub const STEP_PX: f32 = 4.0;
    /// Minimum interval between applied steps (step-gating, decouples
    /// movement speed from the display refresh rate)
    pub const STEP_INTERVAL_MS: f64 = 60.0;

    /// Hearts to collect before the session completes
    pub const REQUIRED_HEARTS: u32 = 8;

    /// Heart placement: minimum center-to-center separation
    pub const MIN_HEART_SEPARATION: f32 = 64.0;
    /// Heart placement: keep-out radius around the player spawn
    pub const SPAWN_CLEARANCE: f32 = 96.0;
    /// Heart placement: rejection-sampling attempt bound before accepting
    /// an overlapping position
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

    /// Sparkle effect lifetime
    pub const SPARKLE_DURATION_MS: f64 = 600.0;
    /// Post-collection freeze before the counter bumps and trivia opens
    pub const COLLECTION_PAUSE_MS: f64 = 250.0;
    /// Delay between the final collection and the completion signal
    pub const COMPLETION_DELAY_MS: f64 = 1500.0;

    /// Answer-feedback display time before the game resumes
    pub const TRIVIA_FEEDBACK_MS: f64 = 1200.0;
    /// Stage fade-out duration (screen is blanked while switching)
    pub const STAGE_FADE_MS: f64 = 500.0;
}

/// Center of a square sprite whose top-left corner is at `pos`
#[inline]
pub fn sprite_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}
