//! Startup wiring: pool registration and entity spawn factories.
//!
//! Everything that can go wrong with configuration goes wrong here,
//! before the first tick — never mid-simulation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use glam::Vec2;

use lodestone_core::constants::{
    DEBRIS_POOL_CAPACITY, EFFECT_POOL_CAPACITY, PROJECTILE_POOL_CAPACITY, SHIP_POOL_CAPACITY,
    WEAPON_POOL_CAPACITY,
};
use lodestone_core::error::ConfigResult;
use lodestone_core::host::EngineHost;
use lodestone_core::input::ShipInput;
use lodestone_core::list::IndexedList;
use lodestone_core::specs::{GameConfig, ShipSpec, SpawnVariant};
use lodestone_core::types::{facing_angle, EntityHandle, Layer, MoveState};

use crate::pools::PoolTable;
use crate::state::{EnemyShip, GameState, PlayerShip, ShipCommon, Spawn, Weapon};

/// Register a pool for every prototype the configuration can ever
/// request. Registration is derived from the config closure, so a
/// mid-tick pool miss is structurally impossible; the one failure mode
/// left is a prototype id claimed by two different kinds.
pub fn build_pools(config: &GameConfig, host: &mut dyn EngineHost) -> ConfigResult<PoolTable> {
    let mut pools = PoolTable::new();

    for mount in &config.player.spec.weapons {
        pools.register_weapon("weapons", mount.prototype, WEAPON_POOL_CAPACITY, host)?;
        pools.register_projectile(
            "projectiles",
            mount.weapon.projectile,
            PROJECTILE_POOL_CAPACITY,
            host,
        )?;
    }

    for point in &config.spawn_points {
        for variant in &point.spec.variants {
            pools.register_ship("ships", variant.prototype, SHIP_POOL_CAPACITY, host)?;
            for mount in &variant.ship.weapons {
                pools.register_weapon("weapons", mount.prototype, WEAPON_POOL_CAPACITY, host)?;
                pools.register_projectile(
                    "projectiles",
                    mount.weapon.projectile,
                    PROJECTILE_POOL_CAPACITY,
                    host,
                )?;
            }
        }
    }

    for debris in &config.debris {
        pools.register_debris("debris", debris.prototype, DEBRIS_POOL_CAPACITY, host)?;
    }

    pools.register_effect(
        "effects",
        config.effects.impact.prototype,
        EFFECT_POOL_CAPACITY,
        host,
    )?;
    pools.register_effect(
        "effects",
        config.effects.explosion.prototype,
        EFFECT_POOL_CAPACITY,
        host,
    )?;

    Ok(pools)
}

/// Instantiate the player ship at the origin. The player is the one
/// ship that is not pooled — it lives for the whole match.
pub fn spawn_player(
    config: &GameConfig,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
) -> PlayerShip {
    let spec = config.player.spec.clone();
    let root = host.instantiate(config.player.prototype);
    host.set_active(root, true);
    host.set_layer(root, Layer::Player);
    host.set_transform(root, Vec2::ZERO, 0.0);

    let weapons = build_weapons(&spec, root, pools, host);
    let radius = spec.radius;
    let health = spec.max_health;

    PlayerShip {
        common: ShipCommon {
            prototype: config.player.prototype,
            spec,
            refs: crate::state::ShipRefs { root },
            motion: MoveState::default(),
            input: ShipInput::default(),
            weapons,
            health,
        },
        radius,
        debris: IndexedList::with_capacity(32),
    }
}

/// Spawn one enemy of the given variant, aimed at the player.
/// Returns the new ship's root handle.
pub fn spawn_enemy(
    state: &mut GameState,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
    variant: &SpawnVariant,
    position: Vec2,
) -> Option<EntityHandle> {
    let pool = pools.ship_mut(variant.prototype)?;
    let refs = pool.spawn(host);
    let root = refs.root;

    let look = (state.player.common.motion.p - position).normalize_or(Vec2::Y);
    host.set_layer(root, Layer::Enemy);
    host.set_transform(root, position, facing_angle(look));

    let spec = variant.ship.clone();
    let weapons = build_weapons(&spec, root, pools, host);
    let health = spec.max_health;

    state.enemies.push(EnemyShip {
        common: ShipCommon {
            prototype: variant.prototype,
            spec,
            refs,
            motion: MoveState {
                p: position,
                dp: Vec2::ZERO,
                look,
            },
            input: ShipInput::default(),
            weapons,
            health,
        },
        ai: variant.ai,
        target: state.player.common.refs.root,
    });

    Some(root)
}

/// Mount every weapon in the spec: pooled instance, parented to the
/// hull, aim starting at the mount's cone center.
fn build_weapons(
    spec: &ShipSpec,
    root: EntityHandle,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
) -> IndexedList<Weapon> {
    let mut weapons = IndexedList::with_capacity(spec.weapons.len());
    for mount in &spec.weapons {
        let Some(pool) = pools.weapon_mut(mount.prototype) else {
            debug_assert!(false, "weapon prototype without a pool");
            continue;
        };
        let refs = pool.spawn(host);
        host.set_parent(refs.root, Some(root));
        weapons.push(Weapon {
            refs,
            spec: mount.weapon,
            aim: mount.direction.normalize_or(Vec2::Y),
            next_refire_time: 0.0,
        });
    }
    weapons
}

/// Instantiate the configured spawn-point markers.
pub fn build_spawn_points(config: &GameConfig, host: &mut dyn EngineHost) -> Vec<Spawn> {
    config
        .spawn_points
        .iter()
        .map(|point| {
            let handle = host.instantiate(point.prototype);
            host.set_active(handle, true);
            host.set_transform(handle, point.position, 0.0);
            Spawn {
                handle,
                spec: point.spec.clone(),
                position: point.position,
                next_spawn_time: 0.0,
                ships: Vec::new(),
            }
        })
        .collect()
}

/// Scatter the starting free-debris field in a disc around the origin.
pub fn seed_debris_field(
    config: &GameConfig,
    pools: &mut PoolTable,
    rng: &mut ChaCha8Rng,
    host: &mut dyn EngineHost,
) {
    for _ in 0..config.starting_debris {
        let template = config.debris[rng.gen_range(0..config.debris.len())];
        let Some(pool) = pools.debris_mut(template.prototype) else {
            continue;
        };
        let piece = pool.spawn(host);

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = config.debris_field_radius * rng.gen::<f32>().sqrt();
        host.set_layer(piece.root, Layer::Debris);
        host.set_transform(piece.root, Vec2::from_angle(angle) * distance, 0.0);
    }
}
