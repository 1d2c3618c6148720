//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - No rendering or platform dependencies

pub mod input;
pub mod state;
pub mod tick;

pub use input::{KeyState, keys};
pub use state::{GameEvent, Ship, ShipState, Viewport};
pub use tick::{clamp_to_viewport, update};
