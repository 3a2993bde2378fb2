//! Spawn controller: wave-rate ramp and weighted enemy selection.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use glam::Vec2;

use lodestone_core::host::EngineHost;
use lodestone_core::specs::{GameConfig, RateBucket, SpawnVariant};

use crate::pools::PoolTable;
use crate::state::GameState;
use crate::world_setup;

/// Run every spawn point: while under its live cap and past its
/// next-spawn timestamp, spawn one enemy and push the timestamp
/// forward by the ramped interval.
pub fn run(
    state: &mut GameState,
    pools: &mut PoolTable,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    host: &mut dyn EngineHost,
) {
    let elapsed = state.time.elapsed_secs;

    for index in 0..state.spawns.len() {
        let spawn = &state.spawns[index];
        if spawn.ships.len() >= spawn.spec.max_count {
            continue;
        }
        if elapsed < spawn.next_spawn_time {
            continue;
        }

        let interval = ramp_interval(&spawn.spec.rate_ramp, elapsed);
        let Some(variant_index) = pick_variant(&spawn.spec.variants, rng) else {
            continue;
        };
        let variant = spawn.spec.variants[variant_index].clone();

        // Uniform placement inside the spawn disc.
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = spawn.spec.radius * rng.gen::<f32>().sqrt();
        let position = spawn.position + Vec2::from_angle(angle) * distance;

        state.spawns[index].next_spawn_time = elapsed + interval as f64;

        if let Some(root) = world_setup::spawn_enemy(state, pools, host, &variant, position) {
            state.spawns[index].ships.push(root);
            debug!(handle = root.0, spawn_point = index, "enemy spawned");
        }
    }
}

/// Interval for the elapsed match time: the nearest bucket at or below
/// it, clamped to the last bucket once the ramp runs out.
pub fn ramp_interval(ramp: &[RateBucket], elapsed: f64) -> f32 {
    let mut interval = match ramp.first() {
        Some(bucket) => bucket.interval,
        // Validated non-empty at startup; hold a sane rate if not.
        None => 1.0,
    };
    for bucket in ramp {
        if (bucket.after_secs as f64) <= elapsed {
            interval = bucket.interval;
        } else {
            break;
        }
    }
    interval
}

/// Cumulative-probability sampling over unnormalized weights.
pub fn pick_variant(variants: &[SpawnVariant], rng: &mut ChaCha8Rng) -> Option<usize> {
    let total: f32 = variants.iter().map(|v| v.weight).sum();
    if total <= 0.0 || variants.is_empty() {
        return None;
    }

    let roll = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, variant) in variants.iter().enumerate() {
        cumulative += variant.weight;
        if roll < cumulative {
            return Some(index);
        }
    }
    // Float accumulation can land the roll on the boundary.
    Some(variants.len() - 1)
}
