//! Shipyard Arcade - steer a ship around a window-sized canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (key state, ship movement, clamping)
//! - `renderer`: Drawing surfaces (browser canvas, software frame buffer)
//! - `game`: Per-frame loop controller tying input, simulation and drawing together
//! - `settings`: Tunable parameters persisted as JSON

pub mod autopilot;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Pixels moved per frame while a direction is held
    pub const SHIP_SPEED: f32 = 10.0;

    /// Ship sprite dimensions
    pub const SHIP_WIDTH: f32 = 60.0;
    pub const SHIP_HEIGHT: f32 = 60.0;

    /// Gap between the ship and the bottom edge when spawning
    pub const SPAWN_MARGIN: f32 = 10.0;

    /// Flat background painted every frame
    pub const BACKGROUND_COLOR: &str = "#007BFF";

    /// Ship sprite, loaded once at startup
    pub const SPRITE_URL: &str = "https://th.bing.com/th/id/OIP.fByU8He0Qj5kKUa7aNitdgHaEJ?w=290&h=180&c=7&r=0&o=7&cb=12&pid=1.7&rm=3";

    /// DOM id of the drawing canvas
    pub const CANVAS_ID: &str = "gameCanvas";

    /// Text shown by the shot alert
    pub const SHOT_MESSAGE: &str = "Shot fired!";

    /// Frames averaged for the FPS estimate
    pub const FPS_WINDOW: usize = 60;
}
