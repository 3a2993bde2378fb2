//! The host port — the narrow interface to the physics/rendering
//! collaborator.
//!
//! The broader engine's collision detection, rigid-body solving and
//! scene graph are black boxes behind this trait. The simulation
//! commands the host (transforms, impulses, parenting, body add/remove)
//! and reads back only two things: contact points, and the positions of
//! solver-owned bodies (free debris and projectiles in flight). Ship
//! kinematics are core-owned and are never read back.

use glam::Vec2;

use crate::types::{EntityHandle, Layer, LayerMask, PrototypeId};

/// One contact point reported for a queried body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// World position of the contact.
    pub point: Vec2,
    /// The other participant.
    pub other: EntityHandle,
}

/// Commands and queries the simulation issues to its host engine.
///
/// Query methods clear `out` and write at most `out.capacity()` entries;
/// the caller owns the buffer and its bound.
pub trait EngineHost {
    /// Create a new (inactive or active, host's choice of default —
    /// the pool immediately sets activation) instance of a prototype.
    fn instantiate(&mut self, prototype: PrototypeId) -> EntityHandle;

    /// Show/hide an instance and enable/disable its collision. Pools
    /// call this on spawn and despawn; the host reacts to instances
    /// becoming visible or collidable.
    fn set_active(&mut self, handle: EntityHandle, active: bool);

    /// Assign the physics layer of an instance.
    fn set_layer(&mut self, handle: EntityHandle, layer: Layer);

    /// World position of a solver-owned body.
    fn position_of(&self, handle: EntityHandle) -> Vec2;

    /// Set absolute position and rotation (radians).
    fn set_transform(&mut self, handle: EntityHandle, position: Vec2, rotation: f32);

    /// Apply an instantaneous velocity impulse.
    fn apply_impulse(&mut self, handle: EntityHandle, impulse: Vec2);

    /// Apply a continuous force for the current tick.
    fn apply_force(&mut self, handle: EntityHandle, force: Vec2);

    /// Parent (or unparent, with `None`) an instance to another
    /// transform.
    fn set_parent(&mut self, child: EntityHandle, parent: Option<EntityHandle>);

    /// Give an instance an independent dynamic body.
    fn add_body(&mut self, handle: EntityHandle);

    /// Destroy an instance's dynamic body, leaving only its transform.
    fn remove_body(&mut self, handle: EntityHandle);

    /// All bodies matching `mask` that overlap the circle. Bounded by
    /// `out.capacity()`.
    fn overlap_circle(&mut self, center: Vec2, radius: f32, mask: LayerMask, out: &mut Vec<EntityHandle>);

    /// All current contact points of a body. Bounded by `out.capacity()`.
    fn contacts(&mut self, handle: EntityHandle, out: &mut Vec<ContactPoint>);
}
