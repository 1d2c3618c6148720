//! Simulation state: the ship, the viewport it lives in, and queued events

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Settings;

/// Visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame along each held axis
    pub speed: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
            speed: SHIP_SPEED,
        }
    }
}

impl Ship {
    pub fn new(size: Vec2, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            speed,
        }
    }

    /// Spawn point: centred horizontally, `margin` above the bottom edge
    pub fn spawn_point(&self, viewport: &Viewport, margin: f32) -> Vec2 {
        Vec2::new(
            viewport.width / 2.0 - self.size.x / 2.0,
            viewport.height - self.size.y - margin,
        )
    }
}

/// Things the platform layer must react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The shot key was pressed; carries the ship position at the time
    ShotFired { pos: Vec2 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipState {
    pub ship: Ship,
    pub viewport: Viewport,
    /// Gap kept below the ship when (re)spawning
    pub spawn_margin: f32,
    /// Frames simulated so far
    pub frame: u64,
}

impl ShipState {
    /// Create a state with the ship at its spawn point
    pub fn new(settings: &Settings, viewport: Viewport) -> Self {
        let mut state = Self {
            ship: Ship::new(
                Vec2::new(settings.ship_width, settings.ship_height),
                settings.speed,
            ),
            viewport,
            spawn_margin: settings.spawn_margin,
            frame: 0,
        };
        state.respawn();
        state
    }

    /// Put the ship back at the spawn point for the current viewport
    pub fn respawn(&mut self) {
        self.ship.pos = self.ship.spawn_point(&self.viewport, self.spawn_margin);
    }
}
