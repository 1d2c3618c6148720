//! Keyboard state
//!
//! Keys are identified by the DOM `KeyboardEvent.key` string so the browser can
//! feed events straight through. Only a handful of keys mean anything to the
//! simulation; everything else is tracked but ignored.

use std::collections::HashMap;

/// Key identifiers the simulation reacts to
pub mod keys {
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const UP: &str = "ArrowUp";
    pub const DOWN: &str = "ArrowDown";
    pub const SHOT: &str = " ";
    pub const RESPAWN: &str = "r";

    /// All movement keys, in a stable order
    pub const ARROWS: [&str; 4] = [LEFT, RIGHT, UP, DOWN];
}

/// Map of key identifier to "held" flag
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held. Returns true if it was not held before
    /// (auto-repeat keydowns return false).
    pub fn press(&mut self, key: &str) -> bool {
        match self.held.get_mut(key) {
            Some(held) => !std::mem::replace(held, true),
            None => {
                self.held.insert(key.to_owned(), true);
                true
            }
        }
    }

    pub fn release(&mut self, key: &str) {
        if let Some(held) = self.held.get_mut(key) {
            *held = false;
        } else {
            self.held.insert(key.to_owned(), false);
        }
    }

    /// Release everything (focus lost, modal dialog swallowed the keyup)
    pub fn release_all(&mut self) {
        for held in self.held.values_mut() {
            *held = false;
        }
    }

    #[inline]
    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    /// Movement direction from the arrow keys, each axis in {-1, 0, 1}
    pub fn direction(&self) -> (i8, i8) {
        let axis = |neg: &str, pos: &str| self.is_held(pos) as i8 - self.is_held(neg) as i8;
        (axis(keys::LEFT, keys::RIGHT), axis(keys::UP, keys::DOWN))
    }
}
