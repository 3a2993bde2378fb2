//! Core types and definitions for the LODESTONE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! handles, tuning specs, input records, the pooled-instance containers,
//! and the host port through which the simulation commands its physics
//! and rendering collaborator. It has no dependency on any runtime
//! framework.

pub mod constants;
pub mod curve;
pub mod error;
pub mod host;
pub mod input;
pub mod list;
pub mod pool;
pub mod specs;
pub mod types;
