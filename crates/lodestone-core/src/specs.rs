//! Tuning specs and the aggregate game configuration.
//!
//! Specs are plain data with no methods beyond lookups; all behavior
//! lives in the simulation systems. Everything round-trips through
//! serde so hosts can author scenarios as data.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::AI_FIRE_CONE;
use crate::curve::Curve;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{Layer, LayerMask, PrototypeId};

/// Closed float range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

/// Closed integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

/// Translation tuning for a ship-like entity.
///
/// The effective formula is
/// `p1 = p0 + 0.5 * (accel * throttle - drag_curve(v_mul * |v|) * drag * v) * t^2 + v * t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveSpec {
    /// How fast the ship accelerates from a stop. Also raises top speed.
    pub acceleration: f32,
    /// How fast the ship decelerates and stops. Also lowers top speed.
    pub drag: f32,
    /// Scales the drag above by current speed (x = scaled speed,
    /// y = drag multiplier).
    pub drag_curve: Curve,
    /// Multiplier applied to speed before the curve lookup, so the
    /// curve stays active across the whole velocity range.
    pub velocity_multiplier_for_drag: f32,
}

impl Default for MoveSpec {
    fn default() -> Self {
        Self {
            acceleration: 30.0,
            drag: 4.0,
            drag_curve: Curve::linear(0.0, 0.0, 1.0, 1.0),
            velocity_multiplier_for_drag: 0.2,
        }
    }
}

/// One weapon hardpoint on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponMount {
    /// Template the weapon instance is created from.
    pub prototype: PrototypeId,
    /// Mount position in ship space.
    pub offset: Vec2,
    /// Cone center in ship space; the weapon's initial aim.
    pub direction: Vec2,
    /// Muzzle distance along the current aim direction.
    pub muzzle: f32,
    pub weapon: WeaponSpec,
}

/// Firing behavior of one weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Template for the projectiles this weapon fires.
    pub projectile: PrototypeId,
    /// Minimum seconds between shots.
    pub refire_delay: f32,
    /// Velocity impulse given to a fresh projectile.
    pub impulse: f32,
    /// Seconds a projectile lives without hitting anything.
    pub lifetime: f32,
    /// Damage on impact; also the peak of the splash falloff.
    pub damage: f32,
    /// Splash radius when the victim is the player's mass.
    pub damage_radius: f32,
    /// Aim smoothing fraction per tick.
    pub turn_speed: f32,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            projectile: PrototypeId(0),
            refire_delay: 0.1,
            impulse: 20.0,
            lifetime: 3.0,
            damage: 2.0,
            damage_radius: 1.5,
            turn_speed: 0.1,
        }
    }
}

/// Hull, handling and armament of a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub move_spec: MoveSpec,
    /// Facing interpolation fraction per tick.
    pub turn_speed: f32,
    pub max_health: f32,
    /// Collider radius; the player's effective radius starts here.
    pub radius: f32,
    pub weapons: Vec<WeaponMount>,
    /// Debris ejected when this ship explodes.
    pub debris_count: IntRange,
}

impl Default for ShipSpec {
    fn default() -> Self {
        Self {
            move_spec: MoveSpec::default(),
            turn_speed: 0.1,
            max_health: 4.0,
            radius: 0.5,
            weapons: Vec::new(),
            debris_count: IntRange { min: 2, max: 5 },
        }
    }
}

/// Attraction field around the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnetismSpec {
    /// Field radius, measured outward from the player's effective
    /// radius.
    pub radius: f32,
    /// Peak pull strength.
    pub strength: f32,
    /// Strength over normalized distance (0 at the player, 1 at the
    /// field edge).
    pub strength_curve: Curve,
    /// Distance a freshly attached debris is nudged toward the player
    /// center.
    pub packing: f32,
    /// Layers the pull applies to.
    pub affected: LayerMask,
}

impl Default for MagnetismSpec {
    fn default() -> Self {
        Self {
            radius: 5.0,
            strength: 10.0,
            strength_curve: Curve::falloff(),
            packing: 0.1,
            affected: LayerMask::of(Layer::Debris),
        }
    }
}

/// Pursuit tuning for an enemy ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiSpec {
    /// Preferred distance beyond the target's radius.
    pub standoff: f32,
    /// Gap below which throttle is zero.
    pub min_gap: f32,
    /// Gap at which throttle reaches full.
    pub full_gap: f32,
    /// Half-angle (radians) within which the trigger is held.
    pub fire_cone: f32,
}

impl Default for AiSpec {
    fn default() -> Self {
        Self {
            standoff: 3.0,
            min_gap: 0.5,
            full_gap: 4.0,
            fire_cone: AI_FIRE_CONE,
        }
    }
}

/// One bucket of the spawn-rate ramp: from `after_secs` of elapsed
/// match time onward, spawn every `interval` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBucket {
    pub after_secs: f32,
    pub interval: f32,
}

/// One enemy variant a spawn point can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnVariant {
    /// Unnormalized selection weight.
    pub weight: f32,
    pub prototype: PrototypeId,
    pub ship: ShipSpec,
    pub ai: AiSpec,
}

/// Behavior of one spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    /// Live-ship cap; the point only counts ships it produced itself.
    pub max_count: usize,
    /// Placement disc radius around the point.
    pub radius: f32,
    /// Interval ramp over elapsed match time. Looked up by the
    /// nearest-lower-or-equal bucket, clamped to the last.
    pub rate_ramp: Vec<RateBucket>,
    pub variants: Vec<SpawnVariant>,
}

/// A debris template and its per-instance tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisSpec {
    pub prototype: PrototypeId,
    /// Health while attached to the player.
    pub health: f32,
    /// Impulse range when ejected from an explosion.
    pub eject_impulse: Range,
}

/// A cosmetic effect template and its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub prototype: PrototypeId,
    pub lifetime: f32,
}

/// The two effect kinds the simulation spawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Flash at every resolved impact.
    pub impact: EffectSpec,
    /// Explosion at every ship death.
    pub explosion: EffectSpec,
}

/// The player's template and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipConfig {
    pub prototype: PrototypeId,
    pub spec: ShipSpec,
}

/// One spawn point placed in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointConfig {
    /// Template for the point's scene marker.
    pub prototype: PrototypeId,
    pub position: Vec2,
    pub spec: SpawnSpec,
}

/// Everything needed to wire a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player: ShipConfig,
    pub magnetism: MagnetismSpec,
    pub debris: Vec<DebrisSpec>,
    pub effects: EffectsConfig,
    pub spawn_points: Vec<SpawnPointConfig>,
    /// Free debris scattered at setup.
    pub starting_debris: u32,
    /// Disc radius the starting debris is scattered over.
    pub debris_field_radius: f32,
    /// Attached-debris count that wins the match, if any.
    pub victory_mass: Option<u32>,
}

impl GameConfig {
    /// The debris template with this prototype, if configured.
    pub fn debris_spec(&self, prototype: PrototypeId) -> Option<&DebrisSpec> {
        self.debris.iter().find(|d| d.prototype == prototype)
    }

    /// Fail fast on anything that would otherwise be discovered
    /// mid-tick: malformed curves, empty tables, weights that can never
    /// select.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.player.spec.move_spec.drag_curve.is_well_formed() {
            return Err(ConfigError::MalformedCurve {
                name: "player drag curve",
            });
        }
        if !self.magnetism.strength_curve.is_well_formed() {
            return Err(ConfigError::MalformedCurve {
                name: "magnetism strength curve",
            });
        }
        if self.debris.is_empty() {
            return Err(ConfigError::NoDebrisTemplates);
        }
        if self.player.spec.debris_count.min > self.player.spec.debris_count.max {
            return Err(ConfigError::InvertedDebrisRange { context: "player" });
        }
        for (index, point) in self.spawn_points.iter().enumerate() {
            if point.spec.rate_ramp.is_empty() {
                return Err(ConfigError::EmptyRateTable { spawn_point: index });
            }
            if point.spec.variants.is_empty() {
                return Err(ConfigError::NoSpawnVariants { spawn_point: index });
            }
            let total: f32 = point.spec.variants.iter().map(|v| v.weight).sum();
            if total <= 0.0 {
                return Err(ConfigError::NonPositiveWeights { spawn_point: index });
            }
            for variant in &point.spec.variants {
                if !variant.ship.move_spec.drag_curve.is_well_formed() {
                    return Err(ConfigError::MalformedCurve {
                        name: "enemy drag curve",
                    });
                }
                if variant.ship.debris_count.min > variant.ship.debris_count.max {
                    return Err(ConfigError::InvertedDebrisRange { context: "enemy" });
                }
            }
        }
        Ok(())
    }
}

/// Prototype ids used by the survival mission. A data-driven host would
/// map these to its own asset table.
pub mod prototypes {
    use crate::types::PrototypeId;

    pub const PLAYER: PrototypeId = PrototypeId(1);
    pub const RAIDER: PrototypeId = PrototypeId(2);
    pub const BRUISER: PrototypeId = PrototypeId(3);

    pub const PLAYER_TURRET: PrototypeId = PrototypeId(10);
    pub const RAIDER_GUN: PrototypeId = PrototypeId(11);
    pub const BRUISER_GUN: PrototypeId = PrototypeId(12);

    pub const BOLT: PrototypeId = PrototypeId(20);
    pub const SLUG: PrototypeId = PrototypeId(21);

    pub const DEBRIS_SMALL: PrototypeId = PrototypeId(30);
    pub const DEBRIS_LARGE: PrototypeId = PrototypeId(31);

    pub const IMPACT_FLASH: PrototypeId = PrototypeId(40);
    pub const EXPLOSION: PrototypeId = PrototypeId(41);

    pub const SPAWN_EAST: PrototypeId = PrototypeId(50);
    pub const SPAWN_WEST: PrototypeId = PrototypeId(51);
}

impl GameConfig {
    /// The default survival mission: one player turret ship, two spawn
    /// points ramping up over two minutes, raiders three times as
    /// likely as bruisers.
    pub fn survival() -> Self {
        use prototypes::*;

        let bolt = WeaponSpec {
            projectile: BOLT,
            refire_delay: 0.1,
            impulse: 20.0,
            lifetime: 3.0,
            damage: 2.0,
            damage_radius: 1.5,
            turn_speed: 0.1,
        };
        let slug = WeaponSpec {
            projectile: SLUG,
            refire_delay: 0.8,
            impulse: 14.0,
            lifetime: 4.0,
            damage: 3.0,
            damage_radius: 2.0,
            turn_speed: 0.05,
        };

        let player = ShipConfig {
            prototype: PLAYER,
            spec: ShipSpec {
                max_health: 4.0,
                radius: 0.5,
                weapons: vec![
                    WeaponMount {
                        prototype: PLAYER_TURRET,
                        offset: Vec2::new(-0.35, 0.2),
                        direction: Vec2::Y,
                        muzzle: 0.6,
                        weapon: bolt,
                    },
                    WeaponMount {
                        prototype: PLAYER_TURRET,
                        offset: Vec2::new(0.35, 0.2),
                        direction: Vec2::Y,
                        muzzle: 0.6,
                        weapon: bolt,
                    },
                ],
                ..ShipSpec::default()
            },
        };

        let raider = SpawnVariant {
            weight: 3.0,
            prototype: RAIDER,
            ship: ShipSpec {
                max_health: 4.0,
                radius: 0.4,
                weapons: vec![WeaponMount {
                    prototype: RAIDER_GUN,
                    offset: Vec2::new(0.0, 0.3),
                    direction: Vec2::Y,
                    muzzle: 0.5,
                    weapon: WeaponSpec {
                        refire_delay: 0.6,
                        damage: 2.0,
                        ..bolt
                    },
                }],
                debris_count: IntRange { min: 2, max: 5 },
                ..ShipSpec::default()
            },
            ai: AiSpec::default(),
        };

        let bruiser = SpawnVariant {
            weight: 1.0,
            prototype: BRUISER,
            ship: ShipSpec {
                move_spec: MoveSpec {
                    acceleration: 18.0,
                    ..MoveSpec::default()
                },
                turn_speed: 0.06,
                max_health: 10.0,
                radius: 0.7,
                weapons: vec![WeaponMount {
                    prototype: BRUISER_GUN,
                    offset: Vec2::new(0.0, 0.4),
                    direction: Vec2::Y,
                    muzzle: 0.7,
                    weapon: slug,
                }],
                debris_count: IntRange { min: 4, max: 8 },
            },
            ai: AiSpec {
                standoff: 4.5,
                ..AiSpec::default()
            },
        };

        let spawn_spec = SpawnSpec {
            max_count: 5,
            radius: 3.0,
            rate_ramp: vec![
                RateBucket {
                    after_secs: 0.0,
                    interval: 4.0,
                },
                RateBucket {
                    after_secs: 30.0,
                    interval: 2.5,
                },
                RateBucket {
                    after_secs: 60.0,
                    interval: 1.5,
                },
                RateBucket {
                    after_secs: 120.0,
                    interval: 0.8,
                },
            ],
            variants: vec![raider, bruiser],
        };

        Self {
            player,
            magnetism: MagnetismSpec::default(),
            debris: vec![
                DebrisSpec {
                    prototype: DEBRIS_SMALL,
                    health: 1.0,
                    eject_impulse: Range { min: 3.0, max: 8.0 },
                },
                DebrisSpec {
                    prototype: DEBRIS_LARGE,
                    health: 2.0,
                    eject_impulse: Range { min: 2.0, max: 6.0 },
                },
            ],
            effects: EffectsConfig {
                impact: EffectSpec {
                    prototype: IMPACT_FLASH,
                    lifetime: 0.3,
                },
                explosion: EffectSpec {
                    prototype: EXPLOSION,
                    lifetime: 1.2,
                },
            },
            spawn_points: vec![
                SpawnPointConfig {
                    prototype: SPAWN_EAST,
                    position: Vec2::new(14.0, 0.0),
                    spec: spawn_spec.clone(),
                },
                SpawnPointConfig {
                    prototype: SPAWN_WEST,
                    position: Vec2::new(-14.0, 0.0),
                    spec: spawn_spec,
                },
            ],
            starting_debris: 20,
            debris_field_radius: 10.0,
            victory_mass: Some(40),
        }
    }
}
