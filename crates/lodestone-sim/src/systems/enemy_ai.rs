//! Enemy AI system — drives each enemy's ship input.
//!
//! Calls the pursuit control law from lodestone-ai, then writes the
//! resulting input for the movement and weapon systems to consume
//! later this tick.

use lodestone_ai::control::{steer, PursuitContext};

use crate::state::GameState;

/// Evaluate the control law for every enemy.
pub fn run(state: &mut GameState) {
    let target = state.player.common.motion.p;
    let target_radius = state.player.radius;

    for enemy in state.enemies.iter_mut() {
        let ctx = PursuitContext {
            position: enemy.common.motion.p,
            facing: enemy.common.motion.look,
            target,
            target_radius,
            spec: enemy.ai,
        };
        enemy.common.input = steer(&ctx);
    }
}
