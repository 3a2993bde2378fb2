//! Reusable-instance pool.
//!
//! Each pool owns every instance ever created from one prototype and
//! tracks it as either free (deactivated, awaiting reuse) or active
//! (live in the world). Capacity grows by doubling and never shrinks;
//! instances are never destroyed, only deactivated and recycled.
//! Activation changes are forwarded to the host so the collaborator can
//! react to instances becoming visible and collidable.

use tracing::warn;

use crate::host::EngineHost;
use crate::types::{EntityHandle, PrototypeId};

/// A pooled instance: a cheap copyable bundle identified by its engine
/// handle. Concrete refs types implement this instead of inheriting
/// from a shared base.
pub trait PoolItem: Copy + PartialEq {
    fn from_handle(handle: EntityHandle) -> Self;
    fn handle(&self) -> EntityHandle;
}

/// Pool of recycled instances of one prototype.
///
/// Membership predicates are linear scans over the free and active
/// sets; call sites run at sub-hundred-entity scale per tick. An
/// implementation targeting larger populations should back membership
/// with a handle map instead.
#[derive(Debug)]
pub struct Pool<T: PoolItem> {
    label: &'static str,
    prototype: PrototypeId,
    free: Vec<T>,
    active: Vec<T>,
    warned: bool,
}

impl<T: PoolItem> Pool<T> {
    /// Create a pool and pre-instantiate `initial_capacity` deactivated
    /// instances through the host.
    pub fn new(
        label: &'static str,
        prototype: PrototypeId,
        initial_capacity: usize,
        host: &mut dyn EngineHost,
    ) -> Self {
        let mut pool = Self {
            label,
            prototype,
            free: Vec::with_capacity(initial_capacity),
            active: Vec::with_capacity(initial_capacity),
            warned: false,
        };
        for _ in 0..initial_capacity {
            let instance = pool.create_instance(host);
            pool.free.push(instance);
        }
        pool
    }

    pub fn prototype(&self) -> PrototypeId {
        self.prototype
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn create_instance(&mut self, host: &mut dyn EngineHost) -> T {
        let handle = host.instantiate(self.prototype);
        host.set_active(handle, false);
        T::from_handle(handle)
    }

    /// Double the pool (active + free count) and return one fresh
    /// instance; the rest land in the free set. Logs once per pool.
    fn grow(&mut self, host: &mut dyn EngineHost) -> T {
        let grow_by = (self.active.len() + self.free.len()).max(1);
        let new_total = self.active.len() + self.free.len() + grow_by;
        for _ in 1..grow_by {
            let instance = self.create_instance(host);
            self.free.push(instance);
        }
        if !self.warned {
            self.warned = true;
            warn!(
                pool = self.label,
                new_capacity = new_total,
                "pool exceeded initial capacity"
            );
        }
        self.create_instance(host)
    }

    /// Take a free instance (growing if exhausted), activate it, and
    /// move it to the active set.
    pub fn spawn(&mut self, host: &mut dyn EngineHost) -> T {
        let instance = match self.free.pop() {
            Some(instance) => instance,
            None => self.grow(host),
        };
        self.active.push(instance);
        host.set_active(instance.handle(), true);
        instance
    }

    /// Deactivate an active instance and recycle it. Returns false if
    /// the instance is not currently active; used where the caller
    /// cannot guarantee membership.
    pub fn try_despawn(&mut self, host: &mut dyn EngineHost, instance: T) -> bool {
        match self.active.iter().position(|a| *a == instance) {
            Some(index) => {
                self.active.remove(index);
                host.set_active(instance.handle(), false);
                self.free.push(instance);
                true
            }
            None => false,
        }
    }

    /// Deactivate and recycle an instance the caller knows is active.
    pub fn despawn(&mut self, host: &mut dyn EngineHost, instance: T) {
        let removed = self.try_despawn(host, instance);
        assert!(removed, "despawn of an instance that is not active");
    }

    /// Check an active instance out of the pool without deactivating
    /// it; the caller owns it until `put` returns it. Returns false if
    /// the instance is not active (e.g. it was already taken this
    /// tick).
    pub fn take(&mut self, instance: T) -> bool {
        match self.active.iter().position(|a| *a == instance) {
            Some(index) => {
                self.active.remove(index);
                true
            }
            None => false,
        }
    }

    /// Return a checked-out instance to the active set.
    pub fn put(&mut self, instance: T) {
        debug_assert!(
            !self.active.contains(&instance) && !self.free.contains(&instance),
            "instance returned to a pool that already tracks it"
        );
        self.active.push(instance);
    }

    pub fn is_spawned(&self, instance: T) -> bool {
        self.active.contains(&instance)
    }

    pub fn is_despawned(&self, instance: T) -> bool {
        self.free.contains(&instance)
    }

    pub fn contains(&self, instance: T) -> bool {
        self.is_spawned(instance) || self.is_despawned(instance)
    }

    /// The active instance with this engine handle, if any.
    pub fn find_active(&self, handle: EntityHandle) -> Option<T> {
        self.active.iter().copied().find(|a| a.handle() == handle)
    }

    pub fn active(&self) -> &[T] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total instances ever created (active + free). Checked-out
    /// instances are tracked by their borrower, not the pool.
    pub fn total_count(&self) -> usize {
        self.active.len() + self.free.len()
    }

    /// Whether the one-time overflow diagnostic has fired.
    pub fn has_warned(&self) -> bool {
        self.warned
    }
}
