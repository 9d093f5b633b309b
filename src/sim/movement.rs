//! Movement resolution
//!
//! Pure functions from held directions to a position delta and facing.
//! Opposite keys on one axis cancel to zero; each axis resolves
//! independently. A diagonal is normalized to unit length before scaling so
//! diagonal speed equals axial speed. Nothing here mutates game state; the
//! tick applies the results, and step-gating (the fixed interval between
//! applied moves) is the tick's job too.

use glam::Vec2;
use std::f32::consts::FRAC_1_SQRT_2;

use super::input::DirSet;
use super::state::{Direction, GameConfig};

/// Unit-length movement vector for the held directions, or zero
pub fn move_vector(dirs: DirSet) -> Vec2 {
    let mut v = Vec2::ZERO;
    if dirs.up {
        v.y -= 1.0;
    }
    if dirs.down {
        v.y += 1.0;
    }
    if dirs.left {
        v.x -= 1.0;
    }
    if dirs.right {
        v.x += 1.0;
    }
    if v.x != 0.0 && v.y != 0.0 {
        v * FRAC_1_SQRT_2
    } else {
        v
    }
}

/// Facing for a movement vector. Horizontal wins on diagonals.
pub fn facing(v: Vec2) -> Direction {
    if v.x < 0.0 {
        Direction::Left
    } else if v.x > 0.0 {
        Direction::Right
    } else if v.y < 0.0 {
        Direction::Up
    } else if v.y > 0.0 {
        Direction::Down
    } else {
        Direction::Idle
    }
}

/// Clamp a player top-left position into the arena
pub fn clamp_to_arena(pos: Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, config.arena_width - config.character_size),
        pos.y.clamp(0.0, config.arena_height - config.character_size),
    )
}

/// One applied step: position after moving `step_px` along the held
/// directions, clamped, plus the resolved facing
pub fn step(pos: Vec2, dirs: DirSet, config: &GameConfig) -> (Vec2, Direction) {
    let v = move_vector(dirs);
    let next = clamp_to_arena(pos + v * config.step_px, config);
    (next, facing(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    fn dirs(up: bool, down: bool, left: bool, right: bool) -> DirSet {
        DirSet {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn test_axial_vector_is_unit() {
        assert_eq!(move_vector(dirs(false, false, false, true)), Vec2::X);
        assert_eq!(move_vector(dirs(true, false, false, false)), Vec2::NEG_Y);
    }

    #[test]
    fn test_diagonal_magnitude_equals_axial() {
        let v = move_vector(dirs(true, false, false, true));
        assert!((v.length() - 1.0).abs() < EPS);

        let config = GameConfig::default();
        let (next, _) = step(Vec2::splat(100.0), dirs(true, false, false, true), &config);
        let displacement = (next - Vec2::splat(100.0)).length();
        assert!((displacement - config.step_px).abs() < EPS);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        assert_eq!(move_vector(dirs(true, true, false, false)), Vec2::ZERO);
        assert_eq!(move_vector(dirs(false, false, true, true)), Vec2::ZERO);
        // One axis cancelled, the other still moves at full speed
        let v = move_vector(dirs(true, true, true, false));
        assert_eq!(v, Vec2::NEG_X);
    }

    #[test]
    fn test_facing_horizontal_wins_on_diagonal() {
        assert_eq!(facing(move_vector(dirs(true, false, false, true))), Direction::Right);
        assert_eq!(facing(move_vector(dirs(false, true, true, false))), Direction::Left);
        assert_eq!(facing(move_vector(dirs(true, false, false, false))), Direction::Up);
        assert_eq!(facing(Vec2::ZERO), Direction::Idle);
    }

    #[test]
    fn test_clamp_at_edges() {
        let config = GameConfig::default();
        let max_x = config.arena_width - config.character_size;
        let max_y = config.arena_height - config.character_size;

        let (next, _) = step(Vec2::new(max_x, 50.0), dirs(false, false, false, true), &config);
        assert_eq!(next, Vec2::new(max_x, 50.0));

        let (next, _) = step(Vec2::ZERO, dirs(true, false, true, false), &config);
        assert_eq!(next, Vec2::ZERO);

        assert_eq!(
            clamp_to_arena(Vec2::new(-50.0, 1e6), &config),
            Vec2::new(0.0, max_y)
        );
    }

    proptest! {
        /// Position stays inside the arena after any sequence of steps from
        /// any in-bounds start.
        #[test]
        fn prop_steps_never_escape_arena(
            start_x in 0.0f32..416.0,
            start_y in 0.0f32..336.0,
            moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 0..256),
        ) {
            let config = GameConfig::default();
            let mut pos = Vec2::new(start_x, start_y);
            for (u, d, l, r) in moves {
                let (next, _) = step(pos, dirs(u, d, l, r), &config);
                pos = next;
                prop_assert!(pos.x >= 0.0 && pos.x <= config.arena_width - config.character_size);
                prop_assert!(pos.y >= 0.0 && pos.y <= config.arena_height - config.character_size);
            }
        }
    }
}
