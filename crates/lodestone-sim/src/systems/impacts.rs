//! Impact resolution pipeline.
//!
//! Two phases, deliberately decoupled from the instant a contact is
//! detected: contacts arrive mid-physics-step and may reference
//! resources that are unsafe to mutate synchronously (the projectile's
//! own collider), so resolution is deferred to a point in the tick
//! where despawning and respawning pooled entities is safe.
//!
//! Collect scans every active projectile's contact points and records
//! at most one `Impact` per projectile, despawning the projectile in
//! the same step. Resolve walks the batch, applies damage and
//! attach/detach side effects, spawns cosmetic effects, and clears the
//! batch — impacts never survive a tick.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use glam::Vec2;

use lodestone_core::host::{ContactPoint, EngineHost};
use lodestone_core::specs::GameConfig;
use lodestone_core::types::{EntityHandle, GamePhase, Layer};

use crate::pools::PoolTable;
use crate::state::{ExplosionEffect, GameState, Impact, ImpactEffect};
use crate::systems::magnetism;

/// Phase A: gather impacts from projectile contacts.
pub fn collect(
    state: &mut GameState,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
    contact_cache: &mut Vec<ContactPoint>,
) {
    let mut index = 0;
    'projectiles: while index < state.projectiles.len() {
        let projectile = state.projectiles[index];
        host.contacts(projectile.refs.root, contact_cache);

        for contact in contact_cache.iter() {
            let Some(victim) = state.resolve_victim(contact.other) else {
                continue;
            };
            if victim == projectile.owner {
                continue;
            }

            state.impacts.push(Impact {
                spec: projectile.spec,
                owner: projectile.owner,
                victim,
                position: contact.point,
                collider: contact.other,
            });

            // One impact per projectile: despawn and deregister in the
            // same step, before any other contact can be considered.
            if let Some(pool) = pools.projectile_mut(projectile.spec.projectile) {
                pool.despawn(host, projectile.refs);
            }
            state.projectiles.remove_at(index);
            continue 'projectiles;
        }

        index += 1;
    }
}

/// Phase B: apply every recorded impact, then clear the batch.
pub fn resolve(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    host: &mut dyn EngineHost,
    collider_cache: &mut Vec<EntityHandle>,
) {
    for index in 0..state.impacts.len() {
        let impact = state.impacts[index];
        spawn_impact_effect(state, pools, config, host, impact.position);

        if impact.victim == state.player.common.refs.root {
            resolve_player_impact(state, pools, config, host, collider_cache, impact);
        } else if state.find_enemy(impact.victim).is_some() {
            resolve_enemy_impact(state, pools, config, rng, host, impact);
        }
        // Anything else: the victim was despawned earlier this tick
        // (two projectiles, one target). Expected race; skip.
    }
    state.impacts.clear();
}

/// Splash damage over the player's attached mass, plus the direct-hit
/// check on the hull itself.
fn resolve_player_impact(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    collider_cache: &mut Vec<EntityHandle>,
    impact: Impact,
) {
    host.overlap_circle(
        impact.position,
        impact.spec.damage_radius,
        lodestone_core::types::LayerMask::of(Layer::Debris),
        collider_cache,
    );

    for &handle in collider_cache.iter() {
        // Only attached debris takes splash; free debris shrugs it
        // off. Re-resolve the index each time — detach compacts the
        // list.
        let Some(debris_index) = state
            .player
            .debris
            .find_index(|d| d.refs.root == handle)
        else {
            continue;
        };

        let dist = (host.position_of(handle) - impact.position).length();
        let falloff = (1.0 - dist / impact.spec.damage_radius).clamp(0.0, 1.0);
        let damage = impact.spec.damage * falloff;

        state.player.debris[debris_index].health -= damage;
        if state.player.debris[debris_index].health <= 0.0 {
            magnetism::detach(state, pools, host, debris_index, damage);
        }
    }

    // A hit on the player's own collider — not merely splash on
    // attached mass — ends the run.
    if impact.collider == state.player.common.refs.root {
        let player_pos = state.player.common.motion.p;
        spawn_explosion(state, pools, config, host, player_pos);
        state.phase = GamePhase::GameOver;
        info!("player hull took a direct hit; game over");
    }
}

/// Direct damage to an enemy hull; death ejects debris.
fn resolve_enemy_impact(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    host: &mut dyn EngineHost,
    impact: Impact,
) {
    let Some(enemy_index) = state.find_enemy(impact.victim) else {
        return;
    };

    let enemy = &mut state.enemies[enemy_index];
    enemy.common.health -= impact.spec.damage;
    if enemy.common.health > 0.0 {
        return;
    }

    kill_enemy(state, pools, config, rng, host, enemy_index);
}

/// Despawn a dead enemy: explosion effect, debris ejection, weapons
/// and hull back to their pools, spawn-point bookkeeping.
fn kill_enemy(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    host: &mut dyn EngineHost,
    enemy_index: usize,
) {
    let enemy = &state.enemies[enemy_index];
    let root = enemy.common.refs.root;
    let refs = enemy.common.refs;
    let prototype = enemy.common.prototype;
    let position = enemy.common.motion.p;
    let debris_count = enemy.common.spec.debris_count;
    let weapons: Vec<_> = (0..enemy.common.weapons.len())
        .map(|i| (enemy.common.spec.weapons[i].prototype, enemy.common.weapons[i].refs))
        .collect();

    spawn_explosion(state, pools, config, host, position);

    // Eject a random number of debris outward from the wreck.
    let count = rng.gen_range(debris_count.min..=debris_count.max);
    for _ in 0..count {
        let template = config.debris[rng.gen_range(0..config.debris.len())];
        let Some(pool) = pools.debris_mut(template.prototype) else {
            debug_assert!(false, "debris prototype without a pool");
            continue;
        };
        let piece = pool.spawn(host);
        let direction = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU));
        let impulse = rng.gen_range(template.eject_impulse.min..=template.eject_impulse.max);
        host.set_layer(piece.root, Layer::Debris);
        host.set_transform(piece.root, position + direction * 0.2, 0.0);
        host.apply_impulse(piece.root, direction * impulse);
    }

    // Weapons are owned by the ship and die with it.
    for (weapon_prototype, weapon_refs) in weapons {
        if let Some(pool) = pools.weapon_mut(weapon_prototype) {
            host.set_parent(weapon_refs.root, None);
            pool.despawn(host, weapon_refs);
        }
    }

    if let Some(pool) = pools.ship_mut(prototype) {
        pool.despawn(host, refs);
    }

    // The producing spawn point stops counting this ship, however it
    // died.
    for spawn in &mut state.spawns {
        if let Some(slot) = spawn.ships.iter().position(|&s| s == root) {
            spawn.ships.remove(slot);
            break;
        }
    }

    state.enemies.remove_at(enemy_index);
    debug!(handle = root.0, "enemy destroyed");
}

fn spawn_impact_effect(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    position: Vec2,
) {
    let Some(pool) = pools.effect_mut(config.effects.impact.prototype) else {
        debug_assert!(false, "impact effect prototype without a pool");
        return;
    };
    let refs = pool.spawn(host);
    host.set_transform(refs.root, position, 0.0);
    state.impact_effects.push(ImpactEffect {
        refs,
        lifetime: config.effects.impact.lifetime,
    });
}

fn spawn_explosion(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    position: Vec2,
) {
    let Some(pool) = pools.effect_mut(config.effects.explosion.prototype) else {
        debug_assert!(false, "explosion effect prototype without a pool");
        return;
    };
    let refs = pool.spawn(host);
    host.set_transform(refs.root, position, 0.0);
    state.explosion_effects.push(ExplosionEffect {
        refs,
        lifetime: config.effects.explosion.lifetime,
    });
}
