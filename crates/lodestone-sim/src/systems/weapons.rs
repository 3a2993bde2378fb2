//! Weapon system: aim smoothing, refire gating, projectile spawning.

use lodestone_core::host::EngineHost;
use lodestone_core::types::{facing_angle, ship_to_world, turn_towards, world_to_ship, Layer};

use crate::pools::PoolTable;
use crate::state::{GameState, Projectile, ShipCommon};

/// Run weapon logic for the player and every enemy.
pub fn run(state: &mut GameState, pools: &mut PoolTable, host: &mut dyn EngineHost) {
    let now = state.time.elapsed_secs;

    run_ship(
        &mut state.player.common,
        Layer::PlayerProjectile,
        &mut state.projectiles,
        pools,
        host,
        now,
    );

    for index in 0..state.enemies.len() {
        run_ship(
            &mut state.enemies[index].common,
            Layer::EnemyProjectile,
            &mut state.projectiles,
            pools,
            host,
            now,
        );
    }
}

/// Smooth every weapon's aim toward the ship's aim point, then fire
/// any weapon whose refire timestamp has passed while the trigger is
/// held.
fn run_ship(
    ship: &mut ShipCommon,
    projectile_layer: Layer,
    projectiles: &mut lodestone_core::list::IndexedList<Projectile>,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
    now: f64,
) {
    for index in 0..ship.weapons.len() {
        let mount = ship.spec.weapons[index];
        let look = ship.motion.look;
        let weapon_pos = ship.motion.p + ship_to_world(look, mount.offset);

        // Track the aim point inside the mount's cone. The aim is kept
        // ship-relative so the cone rides the hull as the ship turns.
        let desired_world = (ship.input.point - weapon_pos).normalize_or(look);
        let desired = world_to_ship(look, desired_world);
        let weapon = &mut ship.weapons[index];
        weapon.aim = turn_towards(weapon.aim, desired, weapon.spec.turn_speed);

        if !ship.input.shoot || now < weapon.next_refire_time {
            continue;
        }
        weapon.next_refire_time = now + weapon.spec.refire_delay as f64;
        let spec = weapon.spec;

        // Compose the two rotations: world up to ship facing, then the
        // weapon's own smoothed offset within its cone.
        let dir = ship_to_world(look, weapon.aim);

        let Some(pool) = pools.projectile_mut(spec.projectile) else {
            debug_assert!(false, "projectile prototype without a pool");
            continue;
        };
        let refs = pool.spawn(host);
        host.set_layer(refs.root, projectile_layer);
        host.set_transform(refs.root, weapon_pos + dir * mount.muzzle, facing_angle(dir));
        host.apply_impulse(refs.root, spec.impulse * dir);

        projectiles.push(Projectile {
            refs,
            spec,
            owner: ship.refs.root,
            lifetime: spec.lifetime,
        });
    }
}
