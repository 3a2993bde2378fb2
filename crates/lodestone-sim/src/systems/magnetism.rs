//! Magnetism and debris attachment.
//!
//! Debris is either Free (an independent solver body, subject to the
//! pull) or Attached (checked out of its pool's active set, parented
//! to the player, contributing health and radius). Attach happens on
//! contact with the player; detach happens when splash damage drives
//! an attached piece's health to zero.

use glam::Vec2;

use lodestone_core::constants::{DETACH_IMPULSE_SCALE, PLAYER_RADIUS_PER_DEBRIS};
use lodestone_core::host::{ContactPoint, EngineHost};
use lodestone_core::pool::PoolItem;
use lodestone_core::specs::GameConfig;
use lodestone_core::types::EntityHandle;

use crate::pools::PoolTable;
use crate::state::{AttachedDebris, DebrisRefs, GameState, PlayerShip};

/// Run the magnetism step: attach touching debris, then pull nearby
/// bodies inward.
pub fn run(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    contact_cache: &mut Vec<ContactPoint>,
    collider_cache: &mut Vec<EntityHandle>,
) {
    attach_touching(state, pools, config, host, contact_cache);
    pull_nearby(state, config, host, collider_cache);
}

/// Convert free debris in contact with the player into attached mass.
fn attach_touching(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    contact_cache: &mut Vec<ContactPoint>,
) {
    let player_root = state.player.common.refs.root;
    let player_pos = state.player.common.motion.p;

    host.contacts(player_root, contact_cache);
    let mut attached_any = false;

    for contact in contact_cache.iter() {
        // Only free debris qualifies; anything else touching the
        // player is the solver's business. A piece reported by several
        // contact points in one tick attaches exactly once — the first
        // checkout empties its active-set slot.
        let Some(prototype) = pools.debris_owner_of(contact.other) else {
            continue;
        };
        let refs = DebrisRefs::from_handle(contact.other);
        let Some(pool) = pools.debris_mut(prototype) else {
            continue;
        };
        if !pool.take(refs) {
            continue;
        }

        let debris_pos = host.position_of(contact.other);
        let away = (debris_pos - player_pos).normalize_or(Vec2::Y);

        // The attached piece keeps no independent body; the scene
        // graph carries it from here.
        host.remove_body(contact.other);
        host.set_transform(
            contact.other,
            debris_pos - away * config.magnetism.packing,
            0.0,
        );
        host.set_parent(contact.other, Some(player_root));

        let health = config
            .debris_spec(prototype)
            .map(|d| d.health)
            .unwrap_or(1.0);
        state.player.debris.push(AttachedDebris {
            prototype,
            refs,
            health,
        });
        state.player.common.health += 1.0;
        attached_any = true;
    }

    if attached_any {
        update_radius(&mut state.player);
    }
}

/// Apply the attraction force to every non-player body in range.
fn pull_nearby(
    state: &mut GameState,
    config: &GameConfig,
    host: &mut dyn EngineHost,
    collider_cache: &mut Vec<EntityHandle>,
) {
    let mg = &config.magnetism;
    let player_root = state.player.common.refs.root;
    let player_pos = state.player.common.motion.p;
    let player_radius = state.player.radius;

    host.overlap_circle(
        player_pos,
        mg.radius + player_radius,
        mg.affected,
        collider_cache,
    );

    for &handle in collider_cache.iter() {
        if handle == player_root {
            continue;
        }
        let rel = host.position_of(handle) - player_pos;
        let dist = rel.length();

        // Already overlapping the player: skip and let the solver
        // depenetrate instead of fighting it.
        if dist < player_radius {
            continue;
        }

        let strength = mg.strength * mg.strength_curve.evaluate(dist / mg.radius);
        host.apply_force(handle, -rel * (strength / dist));
    }
}

/// Detach one attached debris: restore its body, eject it with an
/// impulse scaled to the damage that broke it loose, and return it to
/// its pool's free-floating set. Invalidates debris indices at or
/// above `index`.
pub fn detach(
    state: &mut GameState,
    pools: &mut PoolTable,
    host: &mut dyn EngineHost,
    index: usize,
    damage: f32,
) {
    let debris = state.player.debris[index];
    let player_pos = state.player.common.motion.p;
    let handle = debris.refs.handle();

    host.set_parent(handle, None);
    host.add_body(handle);
    let away = (host.position_of(handle) - player_pos).normalize_or(Vec2::Y);
    host.apply_impulse(handle, away * (damage * DETACH_IMPULSE_SCALE));

    if let Some(pool) = pools.debris_mut(debris.prototype) {
        pool.put(debris.refs);
    }
    state.player.debris.remove_at(index);
    state.player.common.health -= 1.0;
    update_radius(&mut state.player);
}

/// Effective radius from the attached count alone — a deliberately
/// cheap approximation that ignores individual debris geometry.
pub fn update_radius(player: &mut PlayerShip) {
    player.radius = player.common.spec.radius + PLAYER_RADIUS_PER_DEBRIS * player.debris.len() as f32;
}
