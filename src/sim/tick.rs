//! Per-frame simulation step
//!
//! Movement is a fixed number of pixels per frame, not per second: the loop
//! runs once per display refresh and the ship moves `speed` pixels each time.

use glam::Vec2;

use super::input::KeyState;
use super::state::{Ship, ShipState, Viewport};

/// Advance the ship by one frame using the currently held keys, then clamp it
/// inside the viewport.
pub fn update(state: &mut ShipState, keys: &KeyState) {
    let (dx, dy) = keys.direction();
    let step = Vec2::new(dx as f32, dy as f32) * state.ship.speed;
    state.ship.pos += step;

    clamp_to_viewport(&mut state.ship, &state.viewport);
    state.frame += 1;
}

/// Keep the ship's bounding box inside the viewport.
///
/// The near edge is applied first and the far edge last, so a viewport smaller
/// than the ship pins it to `viewport - size` (a negative coordinate).
pub fn clamp_to_viewport(ship: &mut Ship, viewport: &Viewport) {
    ship.pos.x = clamp_axis(ship.pos.x, ship.size.x, viewport.width);
    ship.pos.y = clamp_axis(ship.pos.y, ship.size.y, viewport.height);
}

#[inline]
fn clamp_axis(pos: f32, size: f32, extent: f32) -> f32 {
    // Not f32::clamp: it panics when the viewport is smaller than the ship
    let pos = pos.max(0.0);
    if pos + size > extent {
        extent - size
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::input::keys;
    use proptest::prelude::*;

    fn reference_state() -> ShipState {
        ShipState::new(&Settings::default(), Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_single_step_right() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::RIGHT);

        update(&mut state, &input);
        assert_eq!(state.ship.pos, Vec2::new(380.0, 530.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_hold_right_clamps_to_edge() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::RIGHT);

        for _ in 0..100 {
            update(&mut state, &input);
        }
        assert_eq!(state.ship.pos.x, 740.0);
        assert_eq!(state.ship.pos.y, 530.0);
    }

    #[test]
    fn test_hold_up_left_clamps_to_origin() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::UP);
        input.press(keys::LEFT);

        for _ in 0..100 {
            update(&mut state, &input);
        }
        assert_eq!(state.ship.pos, Vec2::ZERO);
    }

    #[test]
    fn test_down_clamps_to_bottom() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::DOWN);

        update(&mut state, &input);
        assert_eq!(state.ship.pos.y, 540.0);
        update(&mut state, &input);
        assert_eq!(state.ship.pos.y, 540.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::LEFT);
        input.press(keys::RIGHT);
        input.press(keys::UP);
        input.press(keys::DOWN);

        for _ in 0..10 {
            update(&mut state, &input);
        }
        assert_eq!(state.ship.pos, Vec2::new(370.0, 530.0));
    }

    #[test]
    fn test_released_keys_hold_position() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press(keys::LEFT);
        update(&mut state, &input);
        input.release(keys::LEFT);

        let pos = state.ship.pos;
        for _ in 0..10 {
            update(&mut state, &input);
        }
        assert_eq!(state.ship.pos, pos);
    }

    #[test]
    fn test_non_arrow_keys_ignored() {
        let mut state = reference_state();
        let mut input = KeyState::new();
        input.press("a");
        input.press(keys::SHOT);

        update(&mut state, &input);
        assert_eq!(state.ship.pos, Vec2::new(370.0, 530.0));
    }

    #[test]
    fn test_resize_then_update_clamps() {
        let mut state = reference_state();
        state.ship.pos = Vec2::new(740.0, 540.0);

        state.viewport = Viewport::new(400.0, 300.0);
        // Nothing moves until the next update
        assert_eq!(state.ship.pos, Vec2::new(740.0, 540.0));

        update(&mut state, &KeyState::new());
        assert_eq!(state.ship.pos, Vec2::new(340.0, 240.0));
    }

    #[test]
    fn test_viewport_smaller_than_ship() {
        let mut ship = Ship::default();
        ship.pos = Vec2::new(5.0, 5.0);
        clamp_to_viewport(&mut ship, &Viewport::new(40.0, 100.0));
        assert_eq!(ship.pos, Vec2::new(-20.0, 5.0));
    }

    // x + w can round a hair past the edge after clamping to W - w
    const EPS: f32 = 1e-3;

    #[derive(Debug, Clone)]
    enum Op {
        Press(usize),
        Release(usize),
        Resize(f32, f32),
    }

    fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
        let op = prop_oneof![
            4 => (0usize..4).prop_map(Op::Press),
            3 => (0usize..4).prop_map(Op::Release),
            1 => (60.0f32..2000.0, 60.0f32..2000.0).prop_map(|(w, h)| Op::Resize(w, h)),
        ];
        prop::collection::vec(op, 0..300)
    }

    fn assert_inside(state: &ShipState) -> Result<(), TestCaseError> {
        let ship = &state.ship;
        let far = ship.pos + ship.size;
        let vp = state.viewport;
        prop_assert!(ship.pos.x >= 0.0 && ship.pos.y >= 0.0, "ship at {:?}", ship.pos);
        prop_assert!(
            far.x <= vp.width + EPS && far.y <= vp.height + EPS,
            "ship corner {:?} outside {:?}",
            far,
            vp
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_ship_stays_inside_viewport(
            ops in arb_ops(),
            width in 60.0f32..2000.0,
            height in 60.0f32..2000.0
        ) {
            let mut state = ShipState::new(&Settings::default(), Viewport::new(width, height));
            let mut input = KeyState::new();

            for op in ops {
                match op {
                    Op::Press(key) => {
                        input.press(keys::ARROWS[key]);
                    }
                    Op::Release(key) => input.release(keys::ARROWS[key]),
                    Op::Resize(w, h) => state.viewport = Viewport::new(w, h),
                }
                update(&mut state, &input);
                assert_inside(&state)?;
            }
        }

        #[test]
        fn prop_held_keys_across_resizes(
            sizes in prop::collection::vec((60.0f32..2000.0, 60.0f32..2000.0), 1..6)
        ) {
            let mut state = ShipState::new(&Settings::default(), Viewport::new(800.0, 600.0));
            let mut input = KeyState::new();
            input.press(keys::RIGHT);
            input.press(keys::DOWN);

            for (w, h) in sizes {
                state.viewport = Viewport::new(w, h);
                for _ in 0..300 {
                    update(&mut state, &input);
                    assert_inside(&state)?;
                }
            }
        }

        #[test]
        fn prop_resize_then_update_respects_new_bounds(
            start_x in -500.0f32..3000.0,
            start_y in -500.0f32..3000.0,
            width in 60.0f32..2000.0,
            height in 60.0f32..2000.0
        ) {
            let mut state = ShipState::new(&Settings::default(), Viewport::new(2000.0, 2000.0));
            state.ship.pos = Vec2::new(start_x, start_y);
            state.viewport = Viewport::new(width, height);

            update(&mut state, &KeyState::new());

            assert_inside(&state)?;
        }
    }
}
