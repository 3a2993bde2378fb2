//! Simulation systems, one module per pipeline stage.
//!
//! The tick order across these modules is load-bearing: impacts
//! resolve before movement so a ship that dies this tick is never
//! advanced or allowed to fire. `engine::GameEngine::tick` is the only
//! place the order is spelled out.

pub mod enemy_ai;
pub mod impacts;
pub mod lifetimes;
pub mod magnetism;
pub mod movement;
pub mod spawner;
pub mod weapons;
