//! Game state and core simulation types
//!
//! One `GameState` is one session: created on entering the game stage,
//! discarded on leaving it. Everything timed lives in the session's
//! scheduler, so dropping the state cancels every pending callback.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::InputTracker;
use super::sparkle::SparkleEffects;
use super::trivia::{TriviaGate, TriviaQuestion};
use crate::consts::*;
use crate::sched::Scheduler;
use crate::sprite_center;

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player is collecting hearts (possibly paused for trivia)
    Collecting,
    /// All hearts collected; completion signal pending or fired
    Complete,
}

/// Facing/animation state, derived each tick from held input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Idle,
    Up,
    Down,
    Left,
    Right,
}

/// Which character animation to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteVariant {
    Idle,
    WalkNorth,
    WalkSouth,
    WalkEast,
    WalkWest,
}

impl SpriteVariant {
    /// Pure projection of (facing, moving) onto an animation. A held facing
    /// with movement suppressed still renders as idle.
    pub fn select(facing: Direction, is_moving: bool) -> Self {
        if !is_moving {
            return SpriteVariant::Idle;
        }
        match facing {
            Direction::Up => SpriteVariant::WalkNorth,
            Direction::Down => SpriteVariant::WalkSouth,
            Direction::Left => SpriteVariant::WalkWest,
            Direction::Right => SpriteVariant::WalkEast,
            Direction::Idle => SpriteVariant::Idle,
        }
    }

    /// CSS class used by the DOM renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            SpriteVariant::Idle => "char-idle",
            SpriteVariant::WalkNorth => "char-walk-north",
            SpriteVariant::WalkSouth => "char-walk-south",
            SpriteVariant::WalkEast => "char-walk-east",
            SpriteVariant::WalkWest => "char-walk-west",
        }
    }
}

/// A collectible heart. Created once per session, never removed; collection
/// flips `collected` in place and the render layer hides it.
#[derive(Debug, Clone)]
pub struct Heart {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub collected: bool,
}

/// Per-session tuning. Defaults come from `consts`; tests shrink the arena
/// or the heart count freely.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    pub character_size: f32,
    pub heart_size: f32,
    pub step_px: f32,
    pub step_interval_ms: f64,
    pub collection_distance: f32,
    pub required_hearts: u32,
    pub min_heart_separation: f32,
    pub spawn_clearance: f32,
    pub max_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            character_size: CHARACTER_SIZE,
            heart_size: HEART_SIZE,
            step_px: STEP_PX,
            step_interval_ms: STEP_INTERVAL_MS,
            collection_distance: COLLECTION_DISTANCE,
            required_hearts: REQUIRED_HEARTS,
            min_heart_separation: MIN_HEART_SEPARATION,
            spawn_clearance: SPAWN_CLEARANCE,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

/// Deferred sim work, queued on the session scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimTask {
    /// Remove a sparkle whose display time is up
    ExpireSparkle { id: u32 },
    /// End of the post-collection freeze: bump the counter, queue trivia
    FinishCollection { heart_id: u32 },
    /// Completion delay elapsed: latch the session-complete signal
    SessionComplete,
}

/// Complete state of one game session
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    pub config: GameConfig,
    pub(crate) rng: Pcg32,
    /// Player top-left corner, clamped to the arena every applied step
    pub player: Vec2,
    pub facing: Direction,
    pub is_moving: bool,
    pub hearts: Vec<Heart>,
    pub collected_count: u32,
    pub sparkles: SparkleEffects,
    pub trivia: TriviaGate,
    pub input: InputTracker,
    pub phase: GamePhase,
    pub(crate) collection_pause_until: Option<f64>,
    pub(crate) last_step_at: Option<f64>,
    pub(crate) sched: Scheduler<SimTask>,
    pub(crate) finished: bool,
}

impl GameState {
    /// Create a session with the player centered and no hearts placed yet;
    /// call `scatter_hearts` before the first tick.
    pub fn new(seed: u64, config: GameConfig, questions: Vec<TriviaQuestion>) -> Self {
        let player = Vec2::new(
            (config.arena_width - config.character_size) / 2.0,
            (config.arena_height - config.character_size) / 2.0,
        );
        Self {
            seed,
            config,
            rng: Pcg32::seed_from_u64(seed),
            player,
            facing: Direction::Idle,
            is_moving: false,
            hearts: Vec::new(),
            collected_count: 0,
            sparkles: SparkleEffects::new(),
            trivia: TriviaGate::new(questions),
            input: InputTracker::new(),
            phase: GamePhase::Collecting,
            collection_pause_until: None,
            last_step_at: None,
            sched: Scheduler::new(),
            finished: false,
        }
    }

    /// Center of the player sprite
    pub fn player_center(&self) -> Vec2 {
        sprite_center(self.player, self.config.character_size)
    }

    /// Movement and collision are suspended while a question is open or the
    /// post-collection freeze is running
    pub fn is_paused(&self, now: f64) -> bool {
        self.trivia.is_open() || self.collection_pause_until.is_some_and(|until| now < until)
    }

    /// True once the completion delay has elapsed. Latched; the stage owner
    /// observes it once and advances.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self, now: f64) -> RenderSnapshot {
        RenderSnapshot {
            player: self.player,
            facing: self.facing,
            is_moving: self.is_moving,
            sprite: SpriteVariant::select(self.facing, self.is_moving),
            items: self
                .hearts
                .iter()
                .map(|h| ItemView {
                    id: h.id,
                    x: h.pos.x,
                    y: h.pos.y,
                    visible: !h.collected,
                })
                .collect(),
            sparkles: self
                .sparkles
                .iter()
                .map(|s| SparkleView {
                    id: s.id,
                    x: s.pos.x,
                    y: s.pos.y,
                })
                .collect(),
            collected: self.collected_count,
            required: self.config.required_hearts,
            paused: self.is_paused(now),
            complete: self.phase == GamePhase::Complete,
        }
    }
}

/// One collectible as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

/// One live sparkle as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Per-frame read-only snapshot; pure function of current state
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub player: Vec2,
    pub facing: Direction,
    pub is_moving: bool,
    pub sprite: SpriteVariant,
    pub items: Vec<ItemView>,
    pub sparkles: Vec<SparkleView>,
    pub collected: u32,
    pub required: u32,
    pub paused: bool,
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_projection() {
        assert_eq!(
            SpriteVariant::select(Direction::Up, true),
            SpriteVariant::WalkNorth
        );
        assert_eq!(
            SpriteVariant::select(Direction::Right, true),
            SpriteVariant::WalkEast
        );
        // Not moving always renders idle, whatever the facing
        assert_eq!(
            SpriteVariant::select(Direction::Left, false),
            SpriteVariant::Idle
        );
        assert_eq!(
            SpriteVariant::select(Direction::Idle, true),
            SpriteVariant::Idle
        );
    }

    #[test]
    fn test_new_session_starts_centered_and_unpaused() {
        let state = GameState::new(7, GameConfig::default(), Vec::new());
        assert_eq!(state.phase, GamePhase::Collecting);
        assert!(!state.is_paused(0.0));
        assert_eq!(state.collected_count, 0);
        let center = state.player_center();
        assert!((center.x - ARENA_WIDTH / 2.0).abs() < f32::EPSILON);
        assert!((center.y - ARENA_HEIGHT / 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_snapshot_hides_collected_hearts() {
        let mut state = GameState::new(7, GameConfig::default(), Vec::new());
        state.hearts.push(Heart {
            id: 0,
            pos: Vec2::new(10.0, 10.0),
            collected: false,
        });
        state.hearts.push(Heart {
            id: 1,
            pos: Vec2::new(100.0, 10.0),
            collected: true,
        });

        let snap = state.snapshot(0.0);
        assert_eq!(snap.items.len(), 2);
        assert!(snap.items[0].visible);
        assert!(!snap.items[1].visible);
    }
}
