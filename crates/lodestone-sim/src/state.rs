//! Simulation state: entity refs bundles, per-entity value data, and
//! the aggregate `GameState`.
//!
//! Refs types are cheap copyable bundles of engine handles — one
//! concrete type per pooled instance kind, each implementing the
//! shared `PoolItem` capability instead of inheriting from a common
//! base. All gameplay value data (motion, inputs, health, timers)
//! is owned here; the host owns only transforms and visuals.

use glam::Vec2;

use lodestone_core::input::ShipInput;
use lodestone_core::list::IndexedList;
use lodestone_core::pool::PoolItem;
use lodestone_core::specs::{AiSpec, ShipSpec, SpawnSpec, WeaponSpec};
use lodestone_core::types::{EntityHandle, GamePhase, MoveState, PrototypeId, SimTime};

// ---- Refs bundles ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipRefs {
    pub root: EntityHandle,
}

impl PoolItem for ShipRefs {
    fn from_handle(handle: EntityHandle) -> Self {
        Self { root: handle }
    }

    fn handle(&self) -> EntityHandle {
        self.root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponRefs {
    pub root: EntityHandle,
}

impl PoolItem for WeaponRefs {
    fn from_handle(handle: EntityHandle) -> Self {
        Self { root: handle }
    }

    fn handle(&self) -> EntityHandle {
        self.root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileRefs {
    pub root: EntityHandle,
}

impl PoolItem for ProjectileRefs {
    fn from_handle(handle: EntityHandle) -> Self {
        Self { root: handle }
    }

    fn handle(&self) -> EntityHandle {
        self.root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebrisRefs {
    pub root: EntityHandle,
}

impl PoolItem for DebrisRefs {
    fn from_handle(handle: EntityHandle) -> Self {
        Self { root: handle }
    }

    fn handle(&self) -> EntityHandle {
        self.root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectRefs {
    pub root: EntityHandle,
}

impl PoolItem for EffectRefs {
    fn from_handle(handle: EntityHandle) -> Self {
        Self { root: handle }
    }

    fn handle(&self) -> EntityHandle {
        self.root
    }
}

// ---- Per-entity value data ----

/// One mounted weapon. Owned exclusively by its ship; returned to its
/// pool when the ship despawns.
#[derive(Debug, Clone, Copy)]
pub struct Weapon {
    pub refs: WeaponRefs,
    pub spec: WeaponSpec,
    /// Smoothed aim in ship space; starts at the mount's cone center.
    pub aim: Vec2,
    /// Absolute timestamp of the next eligible shot. Drift-free across
    /// variable tick counts between fires.
    pub next_refire_time: f64,
}

/// A projectile in flight. Reaped by lifetime expiry or by the impact
/// pipeline, whichever comes first — never both.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub refs: ProjectileRefs,
    /// Spec of the weapon that fired it.
    pub spec: WeaponSpec,
    /// Root handle of the firing ship.
    pub owner: EntityHandle,
    pub lifetime: f32,
}

/// One collision recorded during contact scanning. Lives for exactly
/// one tick: populated in the collect phase, consumed and cleared in
/// the resolve phase.
#[derive(Debug, Clone, Copy)]
pub struct Impact {
    pub spec: WeaponSpec,
    pub owner: EntityHandle,
    /// Root handle of the ship the contact resolved to.
    pub victim: EntityHandle,
    pub position: Vec2,
    /// The collider actually touched; distinguishes a direct hull hit
    /// from splash on attached mass.
    pub collider: EntityHandle,
}

/// Cosmetic flash at an impact point.
#[derive(Debug, Clone, Copy)]
pub struct ImpactEffect {
    pub refs: EffectRefs,
    pub lifetime: f32,
}

/// Cosmetic explosion at a ship death.
#[derive(Debug, Clone, Copy)]
pub struct ExplosionEffect {
    pub refs: EffectRefs,
    pub lifetime: f32,
}

/// Debris currently attached to the player: checked out of its pool's
/// active set, parented to the player, contributing health and radius.
#[derive(Debug, Clone, Copy)]
pub struct AttachedDebris {
    /// Pool to return to on detach.
    pub prototype: PrototypeId,
    pub refs: DebrisRefs,
    pub health: f32,
}

/// One spawn point and the ships it has produced. A ship dying must be
/// removed from its producer's list regardless of how it died.
#[derive(Debug, Clone)]
pub struct Spawn {
    /// Scene marker handle.
    pub handle: EntityHandle,
    pub spec: SpawnSpec,
    pub position: Vec2,
    /// Absolute timestamp of the next eligible spawn.
    pub next_spawn_time: f64,
    pub ships: Vec<EntityHandle>,
}

/// State shared by the player and every enemy.
#[derive(Debug, Clone)]
pub struct ShipCommon {
    /// Pool identity; the player's is never used for despawning.
    pub prototype: PrototypeId,
    pub spec: ShipSpec,
    pub refs: ShipRefs,
    pub motion: MoveState,
    pub input: ShipInput,
    pub weapons: IndexedList<Weapon>,
    pub health: f32,
}

/// The player: a ship plus its accreted mass.
#[derive(Debug, Clone)]
pub struct PlayerShip {
    pub common: ShipCommon,
    /// Effective radius: collider radius plus a per-debris step.
    /// Used for AI standoff and magnet reach.
    pub radius: f32,
    pub debris: IndexedList<AttachedDebris>,
}

/// An enemy: a ship plus its pursuit tuning and target.
#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub common: ShipCommon,
    pub ai: AiSpec,
    pub target: EntityHandle,
}

/// All mutable simulation state for one match.
#[derive(Debug)]
pub struct GameState {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerShip,
    pub enemies: IndexedList<EnemyShip>,
    pub projectiles: IndexedList<Projectile>,
    /// Transient impact batch; never survives a tick.
    pub impacts: IndexedList<Impact>,
    pub impact_effects: IndexedList<ImpactEffect>,
    pub explosion_effects: IndexedList<ExplosionEffect>,
    pub spawns: Vec<Spawn>,
}

impl GameState {
    pub fn new(player: PlayerShip, spawns: Vec<Spawn>) -> Self {
        Self {
            time: SimTime::default(),
            phase: GamePhase::Playing,
            player,
            enemies: IndexedList::with_capacity(16),
            projectiles: IndexedList::with_capacity(64),
            impacts: IndexedList::with_capacity(32),
            impact_effects: IndexedList::with_capacity(16),
            explosion_effects: IndexedList::with_capacity(16),
            spawns,
        }
    }

    /// Resolve a contact participant to the root handle of the ship it
    /// damages: the player's own hull, an attached debris (splash on
    /// the player), or an enemy hull. `None` for anything else —
    /// including handles despawned earlier this tick, which callers
    /// treat as an expected race and skip.
    pub fn resolve_victim(&self, handle: EntityHandle) -> Option<EntityHandle> {
        if handle == self.player.common.refs.root {
            return Some(handle);
        }
        if self.player.debris.iter().any(|d| d.refs.handle() == handle) {
            return Some(self.player.common.refs.root);
        }
        if self.enemies.iter().any(|e| e.common.refs.root == handle) {
            return Some(handle);
        }
        None
    }

    /// Index of the enemy with this root handle. Re-resolved on every
    /// use — indices do not survive removals.
    pub fn find_enemy(&self, root: EntityHandle) -> Option<usize> {
        self.enemies.find_index(|e| e.common.refs.root == root)
    }
}
