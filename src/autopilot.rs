//! Scripted input for demo runs
//!
//! Every few frames the autopilot re-rolls which arrow keys are held. The RNG
//! is seeded so a given seed always produces the same flight path.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::Game;
use crate::sim::keys;

/// Frames each random key combination is held for
pub const DEFAULT_HOLD_FRAMES: u32 = 15;

pub struct Autopilot {
    rng: Pcg32,
    hold_frames: u32,
    countdown: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self::with_hold_frames(seed, DEFAULT_HOLD_FRAMES)
    }

    pub fn with_hold_frames(seed: u64, hold_frames: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hold_frames: hold_frames.max(1),
            countdown: 0,
        }
    }

    /// Feed key events into `game` for the coming frame
    pub fn drive(&mut self, game: &mut Game) {
        if self.countdown > 0 {
            self.countdown -= 1;
            return;
        }
        self.countdown = self.hold_frames - 1;

        for key in keys::ARROWS {
            if self.rng.random_bool(0.5) {
                game.on_key_down(key);
            } else {
                game.on_key_up(key);
            }
        }
        // Occasionally pull the trigger
        if self.rng.random_ratio(1, 8) {
            game.on_key_down(keys::SHOT);
        } else {
            game.on_key_up(keys::SHOT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;
    use crate::settings::Settings;
    use crate::sim::Viewport;

    fn fly(seed: u64, frames: u32) -> (Vec<(f32, f32)>, u64) {
        let mut game = Game::new(Settings::default(), Viewport::new(320.0, 240.0)).unwrap();
        let mut fb = FrameBuffer::new(320, 240);
        let mut pilot = Autopilot::new(seed);
        let mut path = Vec::new();

        for i in 0..frames {
            pilot.drive(&mut game);
            game.frame(&mut fb, i as f64 * 16.0);
            game.drain_events();
            path.push((game.state.ship.pos.x, game.state.ship.pos.y));
        }
        (path, fb.checksum())
    }

    #[test]
    fn test_same_seed_same_path() {
        let (path1, sum1) = fly(12345, 300);
        let (path2, sum2) = fly(12345, 300);
        assert_eq!(path1, path2);
        assert_eq!(sum1, sum2);
    }

    #[test]
    fn test_autopilot_stays_in_bounds() {
        let (path, _) = fly(99999, 600);
        for (x, y) in path {
            assert!((0.0..=260.0).contains(&x), "x out of bounds: {x}");
            assert!((0.0..=180.0).contains(&y), "y out of bounds: {y}");
        }
    }

    #[test]
    fn test_keys_held_for_hold_frames() {
        let mut game = Game::new(Settings::default(), Viewport::new(320.0, 240.0)).unwrap();
        let mut pilot = Autopilot::with_hold_frames(7, 4);

        pilot.drive(&mut game);
        let held = game.keys.direction();
        for _ in 0..3 {
            pilot.drive(&mut game);
            assert_eq!(game.keys.direction(), held);
        }
    }
}
