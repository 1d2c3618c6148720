//! Frame loop controller
//!
//! Owns the key state and the ship. Input handlers call `on_key_down`/`on_key_up`
//! whenever the host delivers an event; the host's refresh callback calls
//! `frame` once per display refresh and schedules itself again.

use crate::consts::FPS_WINDOW;
use crate::error::Result;
use crate::renderer::{self, Color, Surface};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, KeyState, ShipState, Viewport, keys};

/// Game instance holding all state
pub struct Game {
    pub state: ShipState,
    pub keys: KeyState,
    settings: Settings,
    background: Color,
    events: Vec<GameEvent>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_recorded: usize,
    fps: u32,
}

impl Game {
    /// Create a game with the ship at its spawn point inside `viewport`
    pub fn new(settings: Settings, viewport: Viewport) -> Result<Self> {
        settings.validate()?;
        let background = settings.background_color()?;
        Ok(Self {
            state: ShipState::new(&settings, viewport),
            keys: KeyState::new(),
            settings,
            background,
            events: Vec::new(),
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_recorded: 0,
            fps: 0,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Estimated frames per second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Key pressed. Returns true for a fresh press, false for auto-repeat.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        let fresh = self.keys.press(key);
        if !fresh {
            return false;
        }
        match key {
            keys::SHOT if self.settings.shot_enabled => {
                let pos = self.state.ship.pos;
                log::debug!("Shot fired at ({}, {})", pos.x, pos.y);
                self.events.push(GameEvent::ShotFired { pos });
            }
            keys::RESPAWN => self.respawn(),
            _ => {}
        }
        true
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.keys.release(key);
    }

    /// Forget every held key (focus lost, or a modal ate the keyup)
    pub fn release_all(&mut self) {
        self.keys.release_all();
    }

    /// Viewport changed. The ship is not clamped until the next update.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Viewport::new(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Back to the spawn point for the current viewport
    pub fn respawn(&mut self) {
        self.state.respawn();
        log::debug!("Ship respawned");
    }

    /// Move the ship according to held keys and clamp it to the viewport
    pub fn update(&mut self) {
        sim::update(&mut self.state, &self.keys);
    }

    /// Paint background and ship
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        renderer::draw(surface, &self.state, self.background);
    }

    /// One refresh: update, draw, record timing. `time` is the host's
    /// high-resolution timestamp in milliseconds.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, time: f64) {
        self.update();
        self.draw(surface);
        self.record_frame_time(time);
    }

    /// Take events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn record_frame_time(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_recorded = (self.frames_recorded + 1).min(FPS_WINDOW);

        if self.frames_recorded < 2 {
            return;
        }
        // Oldest sample still in the window
        let oldest_idx = if self.frames_recorded == FPS_WINDOW {
            self.frame_index
        } else {
            0
        };
        let elapsed = time - self.frame_times[oldest_idx];
        if elapsed > 0.0 {
            let intervals = (self.frames_recorded - 1) as f64;
            self.fps = (intervals * 1000.0 / elapsed).round() as u32;
        }
    }
}
