//! Tests for the simulation engine: the tick pipeline, impact
//! resolution, magnetism, spawning, and determinism — all driven
//! through a scripted host double.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lodestone_core::constants::{DT, WEAPON_POOL_CAPACITY};
use lodestone_core::error::ConfigError;
use lodestone_core::host::{ContactPoint, EngineHost};
use lodestone_core::specs::{prototypes, AiSpec, GameConfig, ShipSpec, SpawnVariant, WeaponSpec};
use lodestone_core::types::{EntityHandle, GamePhase, Layer, LayerMask, MoveState, PrototypeId};

use crate::engine::{GameEngine, SimConfig};
use crate::state::Impact;
use crate::systems::{movement, spawner};

// ---- Test host ----

/// Scripted host double. Mints handles deterministically, tracks the
/// state the simulation commands into it, and serves overlap queries
/// from tracked positions. Contact points are scripted per handle.
#[derive(Default)]
struct TestHost {
    next_handle: u64,
    active: HashMap<EntityHandle, bool>,
    layers: HashMap<EntityHandle, Layer>,
    positions: HashMap<EntityHandle, Vec2>,
    parents: HashMap<EntityHandle, EntityHandle>,
    bodies: HashSet<EntityHandle>,
    impulses: Vec<(EntityHandle, Vec2)>,
    forces: Vec<(EntityHandle, Vec2)>,
    scripted_contacts: HashMap<EntityHandle, Vec<ContactPoint>>,
}

impl TestHost {
    fn new() -> Self {
        Self::default()
    }

    fn push_contact(&mut self, on: EntityHandle, point: Vec2, other: EntityHandle) {
        self.scripted_contacts
            .entry(on)
            .or_default()
            .push(ContactPoint { point, other });
    }

    fn clear_contacts(&mut self) {
        self.scripted_contacts.clear();
    }

    fn is_active(&self, handle: EntityHandle) -> bool {
        self.active.get(&handle) == Some(&true)
    }

    fn impulses_on(&self, handle: EntityHandle) -> Vec<Vec2> {
        self.impulses
            .iter()
            .filter(|(h, _)| *h == handle)
            .map(|(_, v)| *v)
            .collect()
    }

    fn forces_on(&self, handle: EntityHandle) -> Vec<Vec2> {
        self.forces
            .iter()
            .filter(|(h, _)| *h == handle)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl EngineHost for TestHost {
    fn instantiate(&mut self, _prototype: PrototypeId) -> EntityHandle {
        self.next_handle += 1;
        let handle = EntityHandle(self.next_handle);
        self.positions.insert(handle, Vec2::ZERO);
        self.bodies.insert(handle);
        handle
    }

    fn set_active(&mut self, handle: EntityHandle, active: bool) {
        self.active.insert(handle, active);
    }

    fn set_layer(&mut self, handle: EntityHandle, layer: Layer) {
        self.layers.insert(handle, layer);
    }

    fn position_of(&self, handle: EntityHandle) -> Vec2 {
        self.positions.get(&handle).copied().unwrap_or(Vec2::ZERO)
    }

    fn set_transform(&mut self, handle: EntityHandle, position: Vec2, _rotation: f32) {
        self.positions.insert(handle, position);
    }

    fn apply_impulse(&mut self, handle: EntityHandle, impulse: Vec2) {
        self.impulses.push((handle, impulse));
    }

    fn apply_force(&mut self, handle: EntityHandle, force: Vec2) {
        self.forces.push((handle, force));
    }

    fn set_parent(&mut self, child: EntityHandle, parent: Option<EntityHandle>) {
        match parent {
            Some(parent) => {
                self.parents.insert(child, parent);
            }
            None => {
                self.parents.remove(&child);
            }
        }
    }

    fn add_body(&mut self, handle: EntityHandle) {
        self.bodies.insert(handle);
    }

    fn remove_body(&mut self, handle: EntityHandle) {
        self.bodies.remove(&handle);
    }

    fn overlap_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        mask: LayerMask,
        out: &mut Vec<EntityHandle>,
    ) {
        out.clear();
        let mut hits: Vec<EntityHandle> = self
            .positions
            .iter()
            .filter(|(handle, position)| {
                self.active.get(handle) == Some(&true)
                    && self
                        .layers
                        .get(handle)
                        .is_some_and(|layer| mask.contains(*layer))
                    && (**position - center).length() <= radius
            })
            .map(|(handle, _)| *handle)
            .collect();
        // Deterministic order regardless of map internals.
        hits.sort_by_key(|handle| handle.0);
        for handle in hits {
            if out.len() == out.capacity() {
                break;
            }
            out.push(handle);
        }
    }

    fn contacts(&mut self, handle: EntityHandle, out: &mut Vec<ContactPoint>) {
        out.clear();
        if let Some(scripted) = self.scripted_contacts.get(&handle) {
            for contact in scripted {
                if out.len() == out.capacity() {
                    break;
                }
                out.push(*contact);
            }
        }
    }
}

// ---- Fixtures ----

/// Survival config with the world quieted down: no autonomous
/// spawning, no starting debris, one player weapon, no victory goal.
fn quiet_config() -> GameConfig {
    let mut config = GameConfig::survival();
    for point in &mut config.spawn_points {
        point.spec.max_count = 0;
    }
    config.player.spec.weapons.truncate(1);
    config.starting_debris = 0;
    config.victory_mass = None;
    config
}

fn raider_variant(config: &GameConfig) -> SpawnVariant {
    config.spawn_points[0].spec.variants[0].clone()
}

/// A raider with its guns stripped, for scenarios where return fire
/// would muddy the projectile counts.
fn disarmed_raider(config: &GameConfig) -> SpawnVariant {
    let mut variant = raider_variant(config);
    variant.ship.weapons.clear();
    variant
}

fn new_engine(config: GameConfig, host: &mut TestHost) -> GameEngine {
    GameEngine::new(
        SimConfig {
            seed: 7,
            game: config,
        },
        host,
    )
    .expect("config should validate")
}

/// An impact record as the collect phase would produce it.
fn impact(victim: EntityHandle, collider: EntityHandle, position: Vec2, damage: f32) -> Impact {
    Impact {
        spec: WeaponSpec {
            damage,
            ..WeaponSpec::default()
        },
        owner: EntityHandle(9999),
        victim,
        position,
        collider,
    }
}

// ---- Refire gating ----

#[test]
fn test_refire_gate_suppresses_then_allows() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let input = engine.player_input_mut();
    input.shoot = true;
    input.point = Vec2::new(0.0, 50.0);

    // t = 0: first shot.
    engine.tick(&mut host);
    assert_eq!(engine.state().projectiles.len(), 1);

    // t = 0.05: suppressed by the 0.1s refire delay.
    while engine.time().elapsed_secs < 0.05 {
        engine.tick(&mut host);
    }
    assert_eq!(engine.state().projectiles.len(), 1);

    // Past t = 0.1: second shot.
    while engine.time().elapsed_secs < 0.11 {
        engine.tick(&mut host);
    }
    assert_eq!(engine.state().projectiles.len(), 2);
}

// ---- Projectile lifecycle ----

#[test]
fn test_projectile_lifetime_strictly_decreases_until_reaped() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    engine.player_input_mut().shoot = true;
    engine.tick(&mut host);
    engine.player_input_mut().shoot = false;
    assert_eq!(engine.state().projectiles.len(), 1);

    let mut previous = engine.state().projectiles[0].lifetime;
    while engine.state().projectiles.len() == 1 {
        engine.tick(&mut host);
        if engine.state().projectiles.len() == 1 {
            let lifetime = engine.state().projectiles[0].lifetime;
            assert!(lifetime < previous, "lifetime must strictly decrease");
            previous = lifetime;
        }
    }

    // Reaped by expiry: back in exactly one pool's free set.
    let pool = engine.pools_mut().projectile_mut(prototypes::BOLT).unwrap();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.free_count(), pool.total_count());
}

#[test]
fn test_projectile_contact_records_single_impact() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let variant = disarmed_raider(engine.config());
    let enemy = engine
        .spawn_enemy_at(&mut host, &variant, Vec2::new(5.0, 0.0))
        .unwrap();

    engine.player_input_mut().shoot = true;
    engine.tick(&mut host);
    engine.player_input_mut().shoot = false;
    let projectile = engine.state().projectiles[0].refs.root;
    let starting_health = engine.state().enemies[0].common.health;

    // Two contact points on the same projectile in one tick: only the
    // first registers.
    host.push_contact(projectile, Vec2::new(5.0, 0.0), enemy);
    host.push_contact(projectile, Vec2::new(5.1, 0.0), enemy);
    engine.tick(&mut host);
    host.clear_contacts();

    assert_eq!(engine.state().projectiles.len(), 0, "despawned on impact");
    assert_eq!(
        engine.state().enemies[0].common.health,
        starting_health - 2.0,
        "exactly one impact's damage"
    );
    assert_eq!(engine.state().impact_effects.len(), 1);

    let pool = engine.pools_mut().projectile_mut(prototypes::BOLT).unwrap();
    assert_eq!(pool.active_count(), 0);
    assert!(!host.is_active(projectile));
}

// ---- Impact resolution: enemies ----

#[test]
fn test_enemy_dies_on_exact_tick_health_crosses_zero() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let variant = raider_variant(engine.config());
    let enemy = engine
        .spawn_enemy_at(&mut host, &variant, Vec2::new(8.0, 0.0))
        .unwrap();
    assert_eq!(engine.state().enemies[0].common.health, 4.0);

    // First impact: damaged, alive, no explosion.
    engine
        .state_mut()
        .impacts
        .push(impact(enemy, enemy, Vec2::new(8.0, 0.0), 2.0));
    engine.tick(&mut host);
    assert_eq!(engine.state().enemies.len(), 1);
    assert_eq!(engine.state().enemies[0].common.health, 2.0);
    assert_eq!(engine.state().explosion_effects.len(), 0);

    // Second impact: dead in the same tick, one explosion, debris in
    // the configured range.
    engine
        .state_mut()
        .impacts
        .push(impact(enemy, enemy, Vec2::new(8.0, 0.0), 2.0));
    engine.tick(&mut host);
    assert_eq!(engine.state().enemies.len(), 0);
    assert_eq!(engine.state().explosion_effects.len(), 1);

    let small = engine
        .pools_mut()
        .debris_mut(prototypes::DEBRIS_SMALL)
        .unwrap()
        .active_count();
    let large = engine
        .pools_mut()
        .debris_mut(prototypes::DEBRIS_LARGE)
        .unwrap()
        .active_count();
    let ejected = small + large;
    let range = variant.ship.debris_count;
    assert!(
        (range.min as usize..=range.max as usize).contains(&ejected),
        "ejected {} debris, expected {}..={}",
        ejected,
        range.min,
        range.max
    );
}

#[test]
fn test_enemy_weapons_return_to_pool_on_death() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let variant = raider_variant(engine.config());
    let enemy = engine
        .spawn_enemy_at(&mut host, &variant, Vec2::new(8.0, 0.0))
        .unwrap();

    let pool = engine.pools_mut().weapon_mut(prototypes::RAIDER_GUN).unwrap();
    assert_eq!(pool.free_count(), WEAPON_POOL_CAPACITY - 1);

    engine
        .state_mut()
        .impacts
        .push(impact(enemy, enemy, Vec2::new(8.0, 0.0), 100.0));
    engine.tick(&mut host);

    let pool = engine.pools_mut().weapon_mut(prototypes::RAIDER_GUN).unwrap();
    assert_eq!(pool.free_count(), WEAPON_POOL_CAPACITY);
}

#[test]
fn test_second_impact_on_dead_victim_is_skipped() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let variant = raider_variant(engine.config());
    let enemy = engine
        .spawn_enemy_at(&mut host, &variant, Vec2::new(8.0, 0.0))
        .unwrap();

    // Two killing impacts in one batch: the second finds no victim and
    // is skipped as a normal race, not asserted.
    engine
        .state_mut()
        .impacts
        .push(impact(enemy, enemy, Vec2::new(8.0, 0.0), 4.0));
    engine
        .state_mut()
        .impacts
        .push(impact(enemy, enemy, Vec2::new(8.0, 0.0), 4.0));
    engine.tick(&mut host);

    assert_eq!(engine.state().enemies.len(), 0);
    assert_eq!(engine.state().explosion_effects.len(), 1, "one death only");
    // Both impacts still flash.
    assert_eq!(engine.state().impact_effects.len(), 2);
    // The batch never survives the tick.
    assert_eq!(engine.state().impacts.len(), 0);
}

// ---- Impact resolution: player ----

#[test]
fn test_direct_hull_hit_ends_the_run() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);
    let player = engine.state().player.common.refs.root;

    engine
        .state_mut()
        .impacts
        .push(impact(player, player, Vec2::ZERO, 2.0));
    engine.tick(&mut host);

    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.state().explosion_effects.len(), 1);

    // The simulation is frozen from here.
    let tick = engine.time().tick;
    engine.tick(&mut host);
    assert_eq!(engine.time().tick, tick);
}

#[test]
fn test_splash_on_attached_debris_spares_the_hull() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);
    let player = engine.state().player.common.refs.root;

    // Attach one piece by contact.
    let piece = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(0.55, 0.0))
        .unwrap();
    host.push_contact(player, Vec2::new(0.5, 0.0), piece);
    engine.tick(&mut host);
    host.clear_contacts();
    assert_eq!(engine.state().player.debris.len(), 1);

    // Splash-only impact: collider is the debris, not the hull.
    let piece_pos = host.position_of(piece);
    engine
        .state_mut()
        .impacts
        .push(impact(player, piece, piece_pos, 2.0));
    engine.tick(&mut host);

    assert_eq!(engine.phase(), GamePhase::Playing, "no game over on splash");
    // Damage 2 at zero distance kills a 1-health piece: detached.
    assert_eq!(engine.state().player.debris.len(), 0);
}

// ---- Magnetism & debris ----

#[test]
fn test_debris_attaches_exactly_once_despite_duplicate_contacts() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);
    let player = engine.state().player.common.refs.root;
    let base_health = engine.state().player.common.health;
    let base_radius = engine.state().player.radius;

    let piece = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(0.55, 0.0))
        .unwrap();
    // The solver reports the same piece through two contact points.
    host.push_contact(player, Vec2::new(0.5, 0.0), piece);
    host.push_contact(player, Vec2::new(0.52, 0.02), piece);
    engine.tick(&mut host);
    host.clear_contacts();

    let state = engine.state();
    assert_eq!(state.player.debris.len(), 1);
    assert_eq!(state.player.common.health, base_health + 1.0);
    assert!(state.player.radius > base_radius);

    // Attached: out of the pool's active set, no body, parented to the
    // player.
    let pool = engine.pools_mut().debris_mut(prototypes::DEBRIS_SMALL).unwrap();
    assert_eq!(pool.active_count(), 0);
    assert!(!host.bodies.contains(&piece));
    assert_eq!(host.parents.get(&piece), Some(&player));
}

#[test]
fn test_attach_detach_round_trip_membership() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);
    let player = engine.state().player.common.refs.root;
    let base_health = engine.state().player.common.health;
    let base_radius = engine.state().player.radius;

    let piece = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(0.55, 0.0))
        .unwrap();
    host.push_contact(player, Vec2::new(0.5, 0.0), piece);
    engine.tick(&mut host);
    host.clear_contacts();

    // Drive the attached piece's health to zero with splash.
    let piece_pos = host.position_of(piece);
    engine
        .state_mut()
        .impacts
        .push(impact(player, piece, piece_pos, 2.0));
    engine.tick(&mut host);

    // Fully detached: free-floating again, in exactly one pool set.
    let state = engine.state();
    assert_eq!(state.player.debris.len(), 0);
    assert_eq!(state.player.common.health, base_health);
    assert_eq!(state.player.radius, base_radius);

    let pool = engine.pools_mut().debris_mut(prototypes::DEBRIS_SMALL).unwrap();
    assert!(pool.is_spawned(crate::state::DebrisRefs { root: piece }));
    assert!(!pool.is_despawned(crate::state::DebrisRefs { root: piece }));

    // Body restored, unparented, ejected outward.
    assert!(host.bodies.contains(&piece));
    assert!(!host.parents.contains_key(&piece));
    let impulses = host.impulses_on(piece);
    assert_eq!(impulses.len(), 1);
    assert!(impulses[0].x > 0.0, "ejected away from the player");
}

#[test]
fn test_magnet_pulls_bodies_in_range_toward_player() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let near = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(3.0, 0.0))
        .unwrap();
    let far = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(40.0, 0.0))
        .unwrap();

    engine.tick(&mut host);

    let near_forces = host.forces_on(near);
    assert_eq!(near_forces.len(), 1);
    assert!(near_forces[0].x < 0.0, "pull points at the player");
    assert!(host.forces_on(far).is_empty(), "outside the field");
}

#[test]
fn test_magnet_skips_bodies_overlapping_the_player() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    // Inside the player's own radius: left to the solver to
    // depenetrate.
    let inside = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(0.3, 0.0))
        .unwrap();

    engine.tick(&mut host);
    assert!(host.forces_on(inside).is_empty());
}

#[test]
fn test_attached_mass_goal_wins_the_match() {
    let mut host = TestHost::new();
    let mut config = quiet_config();
    config.victory_mass = Some(1);
    let mut engine = new_engine(config, &mut host);
    let player = engine.state().player.common.refs.root;

    let piece = engine
        .spawn_debris_at(&mut host, prototypes::DEBRIS_SMALL, Vec2::new(0.55, 0.0))
        .unwrap();
    host.push_contact(player, Vec2::new(0.5, 0.0), piece);
    engine.tick(&mut host);

    assert_eq!(engine.phase(), GamePhase::Won);
}

// ---- Movement integration ----

#[test]
fn test_integrator_is_bit_for_bit_deterministic() {
    let spec = ShipSpec::default();
    let state = MoveState {
        p: Vec2::new(1.5, -2.0),
        dp: Vec2::new(0.4, 3.0),
        look: Vec2::Y,
    };
    let input = lodestone_core::input::ShipInput {
        throttle: Vec2::new(0.7, -0.2),
        aim: Vec2::X,
        ..Default::default()
    };

    let a = movement::integrate(&spec, &state, &input, DT);
    let b = movement::integrate(&spec, &state, &input, DT);
    assert_eq!(a, b);
}

#[test]
fn test_integrator_zero_input_is_a_fixed_point() {
    let spec = ShipSpec::default();
    let state = MoveState::default();
    let input = lodestone_core::input::ShipInput::default();

    let next = movement::integrate(&spec, &state, &input, DT);
    assert_eq!(next.p, Vec2::ZERO, "no throttle, no velocity, no motion");
    assert_eq!(next.dp, Vec2::ZERO);
    assert_eq!(next.look, Vec2::Y);
}

#[test]
fn test_integrator_drag_opposes_velocity() {
    let spec = ShipSpec::default();
    let state = MoveState {
        p: Vec2::ZERO,
        dp: Vec2::new(10.0, 0.0),
        look: Vec2::Y,
    };
    let input = lodestone_core::input::ShipInput::default();

    let next = movement::integrate(&spec, &state, &input, DT);
    assert!(next.dp.x < state.dp.x, "drag decelerates");
    assert!(next.dp.x > 0.0, "but does not reverse in one tick");
}

// ---- Spawn controller ----

#[test]
fn test_ramp_interval_monotonically_non_increasing() {
    let config = GameConfig::survival();
    let ramp = &config.spawn_points[0].spec.rate_ramp;

    let mut previous = f32::INFINITY;
    for step in 0..2000 {
        let elapsed = step as f64 * 0.1;
        let interval = spawner::ramp_interval(ramp, elapsed);
        assert!(
            interval <= previous,
            "interval grew at t={elapsed}: {interval} > {previous}"
        );
        previous = interval;
    }
}

#[test]
fn test_ramp_interval_clamps_to_last_bucket() {
    let config = GameConfig::survival();
    let ramp = &config.spawn_points[0].spec.rate_ramp;
    let last = ramp[ramp.len() - 1].interval;
    assert_eq!(spawner::ramp_interval(ramp, 1e9), last);
}

#[test]
fn test_weighted_selection_respects_proportions() {
    let variants = vec![
        SpawnVariant {
            weight: 3.0,
            prototype: PrototypeId(100),
            ship: ShipSpec::default(),
            ai: AiSpec::default(),
        },
        SpawnVariant {
            weight: 1.0,
            prototype: PrototypeId(101),
            ship: ShipSpec::default(),
            ai: AiSpec::default(),
        },
    ];

    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let trials = 100_000;
    let mut first = 0u32;
    for _ in 0..trials {
        if spawner::pick_variant(&variants, &mut rng) == Some(0) {
            first += 1;
        }
    }

    let share = first as f64 / trials as f64;
    assert!(
        (share - 0.75).abs() < 0.01,
        "weight [3,1] should select the first ~75%, got {share:.3}"
    );
}

#[test]
fn test_spawn_points_produce_and_track_ships() {
    let mut host = TestHost::new();
    let mut engine = new_engine(GameConfig::survival(), &mut host);

    // Both points are due at t=0.
    engine.tick(&mut host);
    assert_eq!(engine.state().enemies.len(), 2);
    assert_eq!(engine.state().spawns[0].ships.len(), 1);
    assert_eq!(engine.state().spawns[1].ships.len(), 1);

    // Next spawns gated by the first ramp bucket.
    let interval = engine.config().spawn_points[0].spec.rate_ramp[0].interval as f64;
    assert!(engine.state().spawns[0].next_spawn_time >= interval);

    while engine.time().elapsed_secs < interval + 0.1 {
        engine.tick(&mut host);
    }
    assert_eq!(engine.state().enemies.len(), 4);
}

#[test]
fn test_dead_ship_leaves_its_spawn_points_list() {
    let mut host = TestHost::new();
    let mut engine = new_engine(GameConfig::survival(), &mut host);

    engine.tick(&mut host);
    let victim = engine.state().spawns[0].ships[0];

    engine
        .state_mut()
        .impacts
        .push(impact(victim, victim, Vec2::ZERO, 1000.0));
    engine.tick(&mut host);

    assert!(
        !engine.state().spawns[0].ships.contains(&victim),
        "the producer must stop counting a dead ship"
    );
    assert_eq!(engine.state().enemies.len(), 1);
}

// ---- Enemy behavior through the pipeline ----

#[test]
fn test_enemy_in_cone_fires_at_the_player() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    let variant = raider_variant(engine.config());
    engine
        .spawn_enemy_at(&mut host, &variant, Vec2::new(8.0, 0.0))
        .unwrap();

    // Spawned facing the player, inside the fire cone: fires on the
    // first tick it is allowed to.
    engine.tick(&mut host);
    let enemy_shots = engine
        .state()
        .projectiles
        .iter()
        .filter(|p| p.owner != engine.state().player.common.refs.root)
        .count();
    assert_eq!(enemy_shots, 1);
}

// ---- Phases ----

#[test]
fn test_pause_stops_simulation() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    for _ in 0..10 {
        engine.tick(&mut host);
    }
    assert_eq!(engine.time().tick, 10);

    engine.pause();
    for _ in 0..10 {
        engine.tick(&mut host);
    }
    assert_eq!(engine.time().tick, 10);
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.resume();
    engine.tick(&mut host);
    assert_eq!(engine.time().tick, 11);
}

#[test]
fn test_cheat_health_applies_once_then_clears() {
    let mut host = TestHost::new();
    let mut engine = new_engine(quiet_config(), &mut host);

    engine.state_mut().player.common.health = 1.0;
    engine.player_input_mut().cheat_health = true;
    engine.tick(&mut host);

    let max = engine.state().player.common.spec.max_health;
    assert_eq!(engine.state().player.common.health, max);
    assert!(!engine.state().player.common.input.cheat_health);
}

// ---- Determinism ----

#[test]
fn test_same_seed_same_match() {
    let mut host_a = TestHost::new();
    let mut host_b = TestHost::new();
    let mut engine_a = new_engine(GameConfig::survival(), &mut host_a);
    let mut engine_b = new_engine(GameConfig::survival(), &mut host_b);

    for _ in 0..300 {
        engine_a.tick(&mut host_a);
        engine_b.tick(&mut host_b);
    }

    assert_eq!(engine_a.time().tick, engine_b.time().tick);
    assert_eq!(engine_a.state().enemies.len(), engine_b.state().enemies.len());
    assert_eq!(
        engine_a.state().projectiles.len(),
        engine_b.state().projectiles.len()
    );
    for index in 0..engine_a.state().enemies.len() {
        let a = &engine_a.state().enemies[index].common.motion;
        let b = &engine_b.state().enemies[index].common.motion;
        assert_eq!(a.p, b.p, "enemy {index} diverged");
        assert_eq!(a.dp, b.dp);
        assert_eq!(a.look, b.look);
    }
}

// ---- Configuration failures ----

#[test]
fn test_engine_rejects_config_without_debris() {
    let mut host = TestHost::new();
    let mut config = quiet_config();
    config.debris.clear();
    let result = GameEngine::new(
        SimConfig {
            seed: 1,
            game: config,
        },
        &mut host,
    );
    assert!(matches!(result, Err(ConfigError::NoDebrisTemplates)));
}

#[test]
fn test_engine_rejects_prototype_claimed_by_two_kinds() {
    let mut host = TestHost::new();
    let mut config = quiet_config();
    // The explosion effect now collides with a debris template.
    config.effects.explosion.prototype = config.debris[0].prototype;
    let result = GameEngine::new(
        SimConfig {
            seed: 1,
            game: config,
        },
        &mut host,
    );
    assert!(matches!(
        result,
        Err(ConfigError::PrototypeKindConflict { .. })
    ));
}
