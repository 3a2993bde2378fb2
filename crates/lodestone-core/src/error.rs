//! Startup configuration errors.
//!
//! Everything here is detected while wiring a new game, before the first
//! tick runs. Mid-tick failures are either prevented by construction or
//! skipped as expected races; they never surface through this type.

use std::fmt;

use crate::types::PrototypeId;

/// A configuration problem that must abort engine construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// One prototype id is registered as two different instance kinds
    /// (e.g. both a debris template and an effect template).
    PrototypeKindConflict { prototype: PrototypeId },

    /// A curve has no keys or its key times decrease.
    MalformedCurve { name: &'static str },

    /// A spawn point's rate ramp table is empty.
    EmptyRateTable { spawn_point: usize },

    /// A spawn point has no enemy variants to choose from.
    NoSpawnVariants { spawn_point: usize },

    /// The total selection weight of a spawn point's variants is not
    /// positive, so no variant could ever be drawn.
    NonPositiveWeights { spawn_point: usize },

    /// No debris templates are configured; explosions and the starting
    /// field would have nothing to spawn.
    NoDebrisTemplates,

    /// A ship spec's debris ejection range is inverted (min > max).
    InvertedDebrisRange { context: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PrototypeKindConflict { prototype } => write!(
                f,
                "prototype {:?} is registered as two different instance kinds",
                prototype
            ),
            ConfigError::MalformedCurve { name } => {
                write!(f, "curve '{}' is empty or has decreasing key times", name)
            }
            ConfigError::EmptyRateTable { spawn_point } => {
                write!(f, "spawn point {} has an empty rate ramp table", spawn_point)
            }
            ConfigError::NoSpawnVariants { spawn_point } => {
                write!(f, "spawn point {} has no enemy variants", spawn_point)
            }
            ConfigError::NonPositiveWeights { spawn_point } => write!(
                f,
                "spawn point {} has a non-positive total variant weight",
                spawn_point
            ),
            ConfigError::NoDebrisTemplates => write!(f, "no debris templates configured"),
            ConfigError::InvertedDebrisRange { context } => {
                write!(f, "debris count range for '{}' has min > max", context)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Convenience alias for startup wiring results.
pub type ConfigResult<T> = Result<T, ConfigError>;
