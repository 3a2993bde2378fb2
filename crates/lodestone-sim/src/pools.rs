//! Pool registry keyed by prototype identity.
//!
//! Every spawning subsystem looks up its pool here. Values are a
//! tagged union over the concrete instance kinds, so heterogeneous
//! pools share one registry without type erasure. Entries are stored
//! in registration order and looked up linearly — the table holds a
//! dozen pools, and a deterministic order keeps same-seed runs
//! identical.

use lodestone_core::error::{ConfigError, ConfigResult};
use lodestone_core::host::EngineHost;
use lodestone_core::pool::{Pool, PoolItem};
use lodestone_core::types::{EntityHandle, PrototypeId};

use crate::state::{DebrisRefs, EffectRefs, ProjectileRefs, ShipRefs, WeaponRefs};

/// A pool of one concrete instance kind.
#[derive(Debug)]
pub enum AnyPool {
    Ship(Pool<ShipRefs>),
    Weapon(Pool<WeaponRefs>),
    Projectile(Pool<ProjectileRefs>),
    Debris(Pool<DebrisRefs>),
    Effect(Pool<EffectRefs>),
}

/// Registry of every pool, keyed by prototype.
#[derive(Debug, Default)]
pub struct PoolTable {
    entries: Vec<(PrototypeId, AnyPool)>,
}

impl PoolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, prototype: PrototypeId, pool: AnyPool) {
        self.entries.push((prototype, pool));
    }

    fn entry(&self, prototype: PrototypeId) -> Option<&AnyPool> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prototype)
            .map(|(_, pool)| pool)
    }

    fn entry_mut(&mut self, prototype: PrototypeId) -> Option<&mut AnyPool> {
        self.entries
            .iter_mut()
            .find(|(p, _)| *p == prototype)
            .map(|(_, pool)| pool)
    }

    pub fn is_registered(&self, prototype: PrototypeId) -> bool {
        self.entry(prototype).is_some()
    }

    /// Register a ship pool, or verify the existing registration has
    /// the same kind. A prototype registered as two kinds is a
    /// configuration error and aborts wiring.
    pub fn register_ship(
        &mut self,
        label: &'static str,
        prototype: PrototypeId,
        capacity: usize,
        host: &mut dyn EngineHost,
    ) -> ConfigResult<()> {
        match self.entry(prototype) {
            Some(AnyPool::Ship(_)) => Ok(()),
            Some(_) => Err(ConfigError::PrototypeKindConflict { prototype }),
            None => {
                let pool = Pool::new(label, prototype, capacity, host);
                self.register(prototype, AnyPool::Ship(pool));
                Ok(())
            }
        }
    }

    pub fn register_weapon(
        &mut self,
        label: &'static str,
        prototype: PrototypeId,
        capacity: usize,
        host: &mut dyn EngineHost,
    ) -> ConfigResult<()> {
        match self.entry(prototype) {
            Some(AnyPool::Weapon(_)) => Ok(()),
            Some(_) => Err(ConfigError::PrototypeKindConflict { prototype }),
            None => {
                let pool = Pool::new(label, prototype, capacity, host);
                self.register(prototype, AnyPool::Weapon(pool));
                Ok(())
            }
        }
    }

    pub fn register_projectile(
        &mut self,
        label: &'static str,
        prototype: PrototypeId,
        capacity: usize,
        host: &mut dyn EngineHost,
    ) -> ConfigResult<()> {
        match self.entry(prototype) {
            Some(AnyPool::Projectile(_)) => Ok(()),
            Some(_) => Err(ConfigError::PrototypeKindConflict { prototype }),
            None => {
                let pool = Pool::new(label, prototype, capacity, host);
                self.register(prototype, AnyPool::Projectile(pool));
                Ok(())
            }
        }
    }

    pub fn register_debris(
        &mut self,
        label: &'static str,
        prototype: PrototypeId,
        capacity: usize,
        host: &mut dyn EngineHost,
    ) -> ConfigResult<()> {
        match self.entry(prototype) {
            Some(AnyPool::Debris(_)) => Ok(()),
            Some(_) => Err(ConfigError::PrototypeKindConflict { prototype }),
            None => {
                let pool = Pool::new(label, prototype, capacity, host);
                self.register(prototype, AnyPool::Debris(pool));
                Ok(())
            }
        }
    }

    pub fn register_effect(
        &mut self,
        label: &'static str,
        prototype: PrototypeId,
        capacity: usize,
        host: &mut dyn EngineHost,
    ) -> ConfigResult<()> {
        match self.entry(prototype) {
            Some(AnyPool::Effect(_)) => Ok(()),
            Some(_) => Err(ConfigError::PrototypeKindConflict { prototype }),
            None => {
                let pool = Pool::new(label, prototype, capacity, host);
                self.register(prototype, AnyPool::Effect(pool));
                Ok(())
            }
        }
    }

    pub fn ship_mut(&mut self, prototype: PrototypeId) -> Option<&mut Pool<ShipRefs>> {
        match self.entry_mut(prototype) {
            Some(AnyPool::Ship(pool)) => Some(pool),
            _ => None,
        }
    }

    pub fn weapon_mut(&mut self, prototype: PrototypeId) -> Option<&mut Pool<WeaponRefs>> {
        match self.entry_mut(prototype) {
            Some(AnyPool::Weapon(pool)) => Some(pool),
            _ => None,
        }
    }

    pub fn projectile_mut(&mut self, prototype: PrototypeId) -> Option<&mut Pool<ProjectileRefs>> {
        match self.entry_mut(prototype) {
            Some(AnyPool::Projectile(pool)) => Some(pool),
            _ => None,
        }
    }

    pub fn debris_mut(&mut self, prototype: PrototypeId) -> Option<&mut Pool<DebrisRefs>> {
        match self.entry_mut(prototype) {
            Some(AnyPool::Debris(pool)) => Some(pool),
            _ => None,
        }
    }

    pub fn effect_mut(&mut self, prototype: PrototypeId) -> Option<&mut Pool<EffectRefs>> {
        match self.entry_mut(prototype) {
            Some(AnyPool::Effect(pool)) => Some(pool),
            _ => None,
        }
    }

    /// The debris pool whose active set holds this handle, if any.
    /// Free-floating debris resolve; attached (checked-out) and
    /// non-debris handles do not.
    pub fn debris_owner_of(&self, handle: EntityHandle) -> Option<PrototypeId> {
        for (prototype, pool) in &self.entries {
            if let AnyPool::Debris(pool) = pool {
                if pool.find_active(handle).is_some() {
                    return Some(*prototype);
                }
            }
        }
        None
    }

    /// Despawn a handle whose instance kind is only known dynamically.
    /// Scans pools in registration order; returns whether any pool
    /// accepted it.
    pub fn try_despawn_any(&mut self, host: &mut dyn EngineHost, handle: EntityHandle) -> bool {
        for (_, pool) in &mut self.entries {
            let accepted = match pool {
                AnyPool::Ship(pool) => pool.try_despawn(host, ShipRefs::from_handle(handle)),
                AnyPool::Weapon(pool) => pool.try_despawn(host, WeaponRefs::from_handle(handle)),
                AnyPool::Projectile(pool) => {
                    pool.try_despawn(host, ProjectileRefs::from_handle(handle))
                }
                AnyPool::Debris(pool) => pool.try_despawn(host, DebrisRefs::from_handle(handle)),
                AnyPool::Effect(pool) => pool.try_despawn(host, EffectRefs::from_handle(handle)),
            };
            if accepted {
                return true;
            }
        }
        false
    }
}
