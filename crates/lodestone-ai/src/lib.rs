//! Enemy pursuit behavior for the LODESTONE simulation.
//!
//! Pure functions that turn a ship's situation into control input.
//! No engine or pool dependency — operates on plain data, so the
//! behavior is testable in isolation.

pub mod control;
