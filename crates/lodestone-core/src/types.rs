//! Fundamental simulation types: handles, time, motion state, layers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque reference to a live engine-side entity instance.
/// Issued by the host when a prototype is instantiated; used as a pool
/// and list key. The simulation never inspects the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// Identity of the template an entity instance is created from.
/// Keys the pool registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrototypeId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Kinematic state of a ship-like entity. Written only by the movement
/// integrator, always as a full overwrite, once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveState {
    /// World position.
    pub p: Vec2,
    /// Velocity.
    pub dp: Vec2,
    /// Facing direction (unit length).
    pub look: Vec2,
}

impl Default for MoveState {
    fn default() -> Self {
        Self {
            p: Vec2::ZERO,
            dp: Vec2::ZERO,
            look: Vec2::Y,
        }
    }
}

/// Top-level run state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Paused,
    /// The player's own hull took a direct projectile hit.
    GameOver,
    /// The player reached the configured attached-mass goal.
    Won,
}

/// Physics layer assigned to an instance. Mirrors the host's collision
/// matrix; the simulation only uses layers to tag projectiles by side
/// and to filter overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Player,
    Enemy,
    Debris,
    PlayerProjectile,
    EnemyProjectile,
    Environment,
}

impl Layer {
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Bit set of layers, used as an overlap-query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);

    pub const fn of(layer: Layer) -> Self {
        LayerMask(layer.bit())
    }

    pub const fn with(self, layer: Layer) -> Self {
        LayerMask(self.0 | layer.bit())
    }

    pub const fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }
}

/// Rotate `from` toward `to` by the fraction `t` of the angle between
/// them. Both inputs are treated as directions; a zero `to` leaves the
/// heading unchanged. This is the turn model shared by ship facing and
/// weapon aim: a constant fraction per fixed tick, so rotation carries
/// inertia instead of snapping.
pub fn turn_towards(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    let from = from.normalize_or(Vec2::Y);
    let to = to.normalize_or(from);
    let angle = from.perp_dot(to).atan2(from.dot(to));
    Vec2::from_angle(angle * t.clamp(0.0, 1.0)).rotate(from)
}

/// Transform a ship-space vector (+Y = along facing) into world space.
pub fn ship_to_world(look: Vec2, v: Vec2) -> Vec2 {
    Vec2::new(look.y, -look.x) * v.x + look * v.y
}

/// Transform a world-space vector into ship space (+Y = along facing).
pub fn world_to_ship(look: Vec2, v: Vec2) -> Vec2 {
    Vec2::new(v.dot(Vec2::new(look.y, -look.x)), v.dot(look))
}

/// Signed rotation (radians, counter-clockwise) from world up to `look`.
/// This is the rotation handed to the host when writing transforms.
pub fn facing_angle(look: Vec2) -> f32 {
    (-look.x).atan2(look.y)
}
