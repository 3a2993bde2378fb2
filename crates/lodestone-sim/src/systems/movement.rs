//! Movement integration system.
//!
//! Advances position, velocity and facing for every ship from its
//! throttle/aim input and tuning spec, then writes the result to the
//! host. One-way command: the integrator never reads physics-engine
//! state back, so the tick's math is reproducible regardless of the
//! solver's internal order.

use lodestone_core::constants::DT;
use lodestone_core::host::EngineHost;
use lodestone_core::input::ShipInput;
use lodestone_core::specs::ShipSpec;
use lodestone_core::types::{facing_angle, turn_towards, MoveState};

use crate::state::GameState;

/// Pure integration step: (spec, previous state, input, dt) → new
/// state. Deterministic and bit-for-bit reproducible for identical
/// inputs.
pub fn integrate(spec: &ShipSpec, prev: &MoveState, input: &ShipInput, dt: f32) -> MoveState {
    let ms = &spec.move_spec;
    let drag = ms
        .drag_curve
        .evaluate(ms.velocity_multiplier_for_drag * prev.dp.length())
        * ms.drag;

    let ddp = ms.acceleration * input.throttle - drag * prev.dp;
    let p = prev.p + 0.5 * ddp * dt * dt + prev.dp * dt;
    let dp = prev.dp + ddp * dt;
    let look = turn_towards(prev.look, input.aim, spec.turn_speed);

    MoveState { p, dp, look }
}

/// Integrate the player and every enemy, committing each result to the
/// host transform.
pub fn run(state: &mut GameState, host: &mut dyn EngineHost) {
    let player = &mut state.player.common;
    player.motion = integrate(&player.spec, &player.motion, &player.input, DT);
    host.set_transform(
        player.refs.root,
        player.motion.p,
        facing_angle(player.motion.look),
    );

    for enemy in state.enemies.iter_mut() {
        let ship = &mut enemy.common;
        ship.motion = integrate(&ship.spec, &ship.motion, &ship.input, DT);
        host.set_transform(ship.refs.root, ship.motion.p, facing_angle(ship.motion.look));
    }
}
