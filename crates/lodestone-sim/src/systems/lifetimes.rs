//! Aging and reaping of projectiles and cosmetic effects.
//!
//! Lifetime expiry is one of a projectile's two death paths; the other
//! is the impact pipeline. Whichever fires first wins and deregisters
//! the instance in the same step, so no handle is ever despawned
//! twice.

use lodestone_core::constants::DT;
use lodestone_core::host::EngineHost;
use lodestone_core::pool::PoolItem;

use crate::pools::PoolTable;
use crate::state::GameState;

/// Subtract dt from every remaining lifetime and reap at zero.
pub fn run(state: &mut GameState, pools: &mut PoolTable, host: &mut dyn EngineHost) {
    let mut index = 0;
    while index < state.projectiles.len() {
        state.projectiles[index].lifetime -= DT;
        if state.projectiles[index].lifetime <= 0.0 {
            let projectile = state.projectiles[index];
            if let Some(pool) = pools.projectile_mut(projectile.spec.projectile) {
                pool.despawn(host, projectile.refs);
            }
            state.projectiles.remove_at(index);
        } else {
            index += 1;
        }
    }

    // Effect instance kinds are looked up dynamically, so reaping goes
    // through the registry-wide despawn.
    let mut index = 0;
    while index < state.impact_effects.len() {
        state.impact_effects[index].lifetime -= DT;
        if state.impact_effects[index].lifetime <= 0.0 {
            let effect = state.impact_effects[index];
            pools.try_despawn_any(host, effect.refs.handle());
            state.impact_effects.remove_at(index);
        } else {
            index += 1;
        }
    }

    let mut index = 0;
    while index < state.explosion_effects.len() {
        state.explosion_effects[index].lifetime -= DT;
        if state.explosion_effects[index].lifetime <= 0.0 {
            let effect = state.explosion_effects[index];
            pools.try_despawn_any(host, effect.refs.handle());
            state.explosion_effects.remove_at(index);
        } else {
            index += 1;
        }
    }
}
