//! The LODESTONE gameplay simulation core.
//!
//! `GameEngine` owns all simulation state, advances it one fixed tick
//! at a time, and commands its physics/rendering collaborator through
//! the narrow host port. Completely headless, enabling deterministic
//! testing against a scripted host.

pub mod engine;
pub mod pools;
pub mod state;
pub mod systems;
pub mod world_setup;

pub use engine::{GameEngine, SimConfig};
pub use lodestone_core as core;

#[cfg(test)]
mod tests;
