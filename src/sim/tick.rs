//! Per-frame game loop
//!
//! One `tick` per display refresh. Ordering inside a tick is fixed: due
//! scheduled work first, then pause handling, then movement, then collision.
//! A collection-triggered pause therefore takes effect before the next
//! tick's movement phase. The loop never blocks; every wait is a task on
//! the session scheduler.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::movement;
use super::state::{GameConfig, GamePhase, GameState, Heart, SimTask};
use crate::consts::{COLLECTION_PAUSE_MS, COMPLETION_DELAY_MS};
use crate::sprite_center;

/// Advance the session to `now` (milliseconds on the caller's timebase)
pub fn tick(state: &mut GameState, now: f64) {
    for task in state.sched.drain_due(now) {
        apply_task(state, task);
    }

    if state.phase == GamePhase::Complete {
        state.is_moving = false;
        return;
    }

    // Frozen for trivia or the post-collection window: keep ticking for
    // rendering only
    if state.is_paused(now) {
        state.is_moving = false;
        return;
    }

    // A queued question opens before this tick's movement
    if state.trivia.open_next() {
        state.is_moving = false;
        log::info!(
            "trivia question {} opened",
            state.trivia.current_index().unwrap_or(0) + 1
        );
        return;
    }

    if state.collected_count >= state.config.required_hearts {
        state.phase = GamePhase::Complete;
        state.is_moving = false;
        state
            .sched
            .schedule(now + COMPLETION_DELAY_MS, SimTask::SessionComplete);
        log::info!("all hearts collected");
        return;
    }

    // Movement, step-gated, applied before collision
    let dirs = state.input.dirs();
    let v = movement::move_vector(dirs);
    state.facing = movement::facing(v);
    state.is_moving = v != Vec2::ZERO;

    if state.is_moving && step_gate_open(state, now) {
        let (next, _) = movement::step(state.player, dirs, &state.config);
        state.player = next;
        advance_step_gate(state, now);
    }

    // Collision runs every unpaused tick, so standing on a heart collects
    let hits = collision::newly_collected(state.player, &state.hearts, &state.config);
    for id in hits {
        collect_heart(state, id, now);
    }
}

fn apply_task(state: &mut GameState, task: SimTask) {
    match task {
        SimTask::ExpireSparkle { id } => state.sparkles.expire(id),
        SimTask::FinishCollection { heart_id } => {
            state.collected_count += 1;
            state.trivia.enqueue();
            log::debug!(
                "heart {} counted ({}/{})",
                heart_id,
                state.collected_count,
                state.config.required_hearts
            );
        }
        SimTask::SessionComplete => {
            state.finished = true;
            log::info!("session complete");
        }
    }
}

fn step_gate_open(state: &GameState, now: f64) -> bool {
    match state.last_step_at {
        None => true,
        Some(last) => now - last >= state.config.step_interval_ms,
    }
}

/// Catch-up accumulation keeps the average step rate exact under frame
/// jitter; a long stall resets the gate instead of bursting steps
fn advance_step_gate(state: &mut GameState, now: f64) {
    let interval = state.config.step_interval_ms;
    state.last_step_at = Some(match state.last_step_at {
        Some(last) if now - last < 2.0 * interval => last + interval,
        _ => now,
    });
}

fn collect_heart(state: &mut GameState, id: u32, now: f64) {
    let Some(heart) = state.hearts.iter_mut().find(|h| h.id == id) else {
        return;
    };
    heart.collected = true;
    let pos = heart.pos;

    state.sparkles.spawn(pos, now, &mut state.sched);

    // Freeze briefly so the sparkle renders before the counter bumps and
    // the trivia modal can open
    let until = now + COLLECTION_PAUSE_MS;
    state.collection_pause_until = Some(
        state
            .collection_pause_until
            .map_or(until, |cur| cur.max(until)),
    );
    state
        .sched
        .schedule(until, SimTask::FinishCollection { heart_id: id });
}

/// Place the session's hearts by rejection sampling: minimum mutual
/// separation, clear of the player spawn, bounded attempts with an
/// overlapping fallback so placement always terminates.
pub fn scatter_hearts(state: &mut GameState) {
    let config = state.config;
    let player_center = state.player_center();
    let margin = config.heart_size;
    let lo_x = margin;
    let hi_x = config.arena_width - margin;
    let lo_y = margin;
    let hi_y = config.arena_height - margin;

    let mut centers: Vec<Vec2> = Vec::with_capacity(config.required_hearts as usize);
    for id in 0..config.required_hearts {
        let mut pos = Vec2::new(
            state.rng.random_range(lo_x..hi_x),
            state.rng.random_range(lo_y..hi_y),
        );
        let mut attempts = 1;
        while attempts < config.max_placement_attempts
            && !placement_ok(pos, &centers, player_center, &config)
        {
            pos = Vec2::new(
                state.rng.random_range(lo_x..hi_x),
                state.rng.random_range(lo_y..hi_y),
            );
            attempts += 1;
        }
        if !placement_ok(pos, &centers, player_center, &config) {
            log::debug!("heart {id}: placement attempts exhausted, accepting overlap");
        }
        centers.push(sprite_center(pos, config.heart_size));
        state.hearts.push(Heart {
            id,
            pos,
            collected: false,
        });
    }
    log::info!("scattered {} hearts (seed {})", state.hearts.len(), state.seed);
}

fn placement_ok(pos: Vec2, centers: &[Vec2], player_center: Vec2, config: &GameConfig) -> bool {
    let center = sprite_center(pos, config.heart_size);
    if center.distance(player_center) < config.spawn_clearance {
        return false;
    }
    centers
        .iter()
        .all(|c| c.distance(center) >= config.min_heart_separation)
}
