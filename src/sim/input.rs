//! Held-input tracking
//!
//! Pure set membership: which movement keys are down right now, plus the
//! synthesized touch direction. No movement logic lives here.

use std::collections::HashSet;

/// A physical movement key. Arrow keys and WASD are distinct keys that map
/// onto the same four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value. Letter keys are matched
    /// case-insensitively so a press while Shift is held still pairs with
    /// its release.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "w" | "W" => Some(Key::W),
            "a" | "A" => Some(Key::A),
            "s" | "S" => Some(Key::S),
            "d" | "D" => Some(Key::D),
            _ => None,
        }
    }
}

/// Which of the four directions are currently requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirSet {
    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Tracks currently-held movement inputs from keyboard and touch
#[derive(Debug, Default)]
pub struct InputTracker {
    keys: HashSet<Key>,
    touch: DirSet,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held. Re-pressing an already-held key is a no-op.
    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    /// Mark a key as released. Releasing an unheld key is a no-op.
    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Replace the whole touch direction-set (a touch pad press activates
    /// exactly one direction at a time)
    pub fn set_touch(&mut self, dirs: DirSet) {
        self.touch = dirs;
    }

    /// Clear all touch directions (touch released)
    pub fn clear_touch(&mut self) {
        self.touch = DirSet::default();
    }

    /// Union of keyboard- and touch-requested directions
    pub fn dirs(&self) -> DirSet {
        let mut d = self.touch;
        for key in &self.keys {
            match key {
                Key::ArrowUp | Key::W => d.up = true,
                Key::ArrowDown | Key::S => d.down = true,
                Key::ArrowLeft | Key::A => d.left = true,
                Key::ArrowRight | Key::D => d.right = true,
            }
        }
        d
    }

    pub fn is_idle(&self) -> bool {
        self.dirs().is_empty()
    }
}
