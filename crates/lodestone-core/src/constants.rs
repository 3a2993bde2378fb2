//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Pool sizing ---

/// Initial projectile pool capacity.
pub const PROJECTILE_POOL_CAPACITY: usize = 64;

/// Initial capacity of each debris pool.
pub const DEBRIS_POOL_CAPACITY: usize = 32;

/// Initial capacity of each effect pool.
pub const EFFECT_POOL_CAPACITY: usize = 16;

/// Initial capacity of each enemy-ship pool.
pub const SHIP_POOL_CAPACITY: usize = 8;

/// Initial capacity of each weapon pool.
pub const WEAPON_POOL_CAPACITY: usize = 16;

// --- Query buffers ---

/// Capacity of the reusable overlap-query buffer.
pub const COLLIDER_CACHE_CAPACITY: usize = 32;

/// Capacity of the reusable contact-query buffer.
pub const CONTACT_CACHE_CAPACITY: usize = 32;

// --- Magnetism & debris ---

/// Outward impulse per point of detaching damage.
pub const DETACH_IMPULSE_SCALE: f32 = 2.0;

/// Growth of the player's effective radius per attached debris.
/// A function of the count only; individual debris geometry is ignored.
pub const PLAYER_RADIUS_PER_DEBRIS: f32 = 0.1;

// --- Enemy AI ---

/// Half-angle of the fire cone (radians, ~22 degrees).
pub const AI_FIRE_CONE: f32 = 22.0 * std::f32::consts::PI / 180.0;
