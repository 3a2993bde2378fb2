//! Per-ship input record.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Control intent for one ship, written by the input collaborator once
/// per render frame (for the player) or by the AI once per tick (for
/// enemies), and read by the simulation once per tick.
///
/// All fields are level state, not edge events: rapid changes between
/// ticks coalesce and only the latest value is observed. Continuous
/// fields (throttle, point, aim) persist across ticks untouched; the
/// cheat flags are cleared by `end_tick` after one tick has honored
/// them. The fire flag needs no reset — the refire gate bounds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipInput {
    /// Desired thrust direction and magnitude (clamped to unit length
    /// by producers).
    pub throttle: Vec2,
    /// World point the ship is aiming at; weapons track it.
    pub point: Vec2,
    /// Desired facing direction.
    pub aim: Vec2,
    /// Fire intent, held as long as the trigger is down.
    pub shoot: bool,
    /// Debug cheat: restore hull health to the spec maximum.
    pub cheat_health: bool,
}

impl Default for ShipInput {
    fn default() -> Self {
        Self {
            throttle: Vec2::ZERO,
            point: Vec2::ZERO,
            aim: Vec2::Y,
            shoot: false,
            cheat_health: false,
        }
    }
}

impl ShipInput {
    /// Partial per-tick reset: one-shot cheat intents are consumed,
    /// continuous intent persists.
    pub fn end_tick(&mut self) {
        self.cheat_health = false;
    }
}
