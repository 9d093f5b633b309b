//! Heart collection detection
//!
//! Center-to-center Euclidean distance against a fixed threshold. Pure:
//! returns the newly-collected ids and mutates nothing; the tick marks the
//! hearts, spawns sparkles, and starts the collection pause.

use glam::Vec2;

use super::state::{GameConfig, Heart};
use crate::sprite_center;

/// Ids of uncollected hearts within collection distance of the player.
/// Several hearts can qualify in one tick; all are returned.
pub fn newly_collected(player_pos: Vec2, hearts: &[Heart], config: &GameConfig) -> Vec<u32> {
    let player_center = sprite_center(player_pos, config.character_size);
    hearts
        .iter()
        .filter(|heart| !heart.collected)
        .filter(|heart| {
            let heart_center = sprite_center(heart.pos, config.heart_size);
            player_center.distance(heart_center) < config.collection_distance
        })
        .map(|heart| heart.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart(id: u32, x: f32, y: f32) -> Heart {
        Heart {
            id,
            pos: Vec2::new(x, y),
            collected: false,
        }
    }

    #[test]
    fn test_collects_within_threshold() {
        let config = GameConfig::default();
        // Player and heart sharing a top-left corner: centers differ by the
        // size difference, well within the threshold
        let hearts = vec![heart(0, 100.0, 100.0)];
        assert_eq!(
            newly_collected(Vec2::new(100.0, 100.0), &hearts, &config),
            vec![0]
        );
    }

    #[test]
    fn test_exact_center_distance_zero_collects() {
        let config = GameConfig::default();
        // Heart centered exactly on the player center
        let offset = (config.character_size - config.heart_size) / 2.0;
        let hearts = vec![heart(3, 100.0 + offset, 100.0 + offset)];
        assert_eq!(
            newly_collected(Vec2::new(100.0, 100.0), &hearts, &config),
            vec![3]
        );
    }

    #[test]
    fn test_misses_outside_threshold() {
        let config = GameConfig::default();
        let hearts = vec![heart(0, 300.0, 300.0)];
        assert!(newly_collected(Vec2::new(0.0, 0.0), &hearts, &config).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = GameConfig::default();
        let offset = (config.character_size - config.heart_size) / 2.0;
        // Centers exactly collection_distance apart: not collected
        let hearts = vec![heart(
            0,
            100.0 + offset + config.collection_distance,
            100.0 + offset,
        )];
        assert!(newly_collected(Vec2::new(100.0, 100.0), &hearts, &config).is_empty());
    }

    #[test]
    fn test_collected_hearts_never_reported_again() {
        let config = GameConfig::default();
        let mut hearts = vec![heart(0, 100.0, 100.0), heart(1, 104.0, 104.0)];
        let first = newly_collected(Vec2::new(100.0, 100.0), &hearts, &config);
        assert_eq!(first, vec![0, 1]);

        for id in first {
            hearts[id as usize].collected = true;
        }
        assert!(newly_collected(Vec2::new(100.0, 100.0), &hearts, &config).is_empty());
    }

    #[test]
    fn test_simultaneous_collection_all_honored() {
        let config = GameConfig::default();
        let hearts = vec![
            heart(0, 90.0, 100.0),
            heart(1, 110.0, 100.0),
            heart(2, 100.0, 90.0),
        ];
        let hits = newly_collected(Vec2::new(100.0, 100.0), &hearts, &config);
        assert_eq!(hits, vec![0, 1, 2]);
    }
}
