//! Simulation engine — the core of the game.
//!
//! `GameEngine` owns all gameplay state, the pool registry and the
//! seeded RNG. It advances one fixed tick at a time against a host
//! passed in by the caller, and is completely headless: the same
//! engine runs under the production host and under the scripted test
//! host.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use lodestone_core::constants::{COLLIDER_CACHE_CAPACITY, CONTACT_CACHE_CAPACITY};
use lodestone_core::error::ConfigResult;
use lodestone_core::host::{ContactPoint, EngineHost};
use lodestone_core::input::ShipInput;
use lodestone_core::specs::GameConfig;
use lodestone_core::types::{EntityHandle, GamePhase, SimTime};

use crate::pools::PoolTable;
use crate::state::GameState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new match.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed, same host behavior — same
    /// match.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::survival(),
        }
    }
}

/// The simulation engine. Owns all simulation state.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    pools: PoolTable,
    rng: ChaCha8Rng,
    collider_cache: Vec<EntityHandle>,
    contact_cache: Vec<ContactPoint>,
}

impl GameEngine {
    /// Validate the configuration, register every pool, and wire the
    /// starting world: player, spawn points, free-debris field.
    /// Fails fast on any configuration problem.
    pub fn new(config: SimConfig, host: &mut dyn EngineHost) -> ConfigResult<Self> {
        config.game.validate()?;

        let mut pools = world_setup::build_pools(&config.game, host)?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let player = world_setup::spawn_player(&config.game, &mut pools, host);
        let spawns = world_setup::build_spawn_points(&config.game, host);
        world_setup::seed_debris_field(&config.game, &mut pools, &mut rng, host);

        Ok(Self {
            config: config.game,
            state: GameState::new(player, spawns),
            pools,
            rng,
            collider_cache: Vec::with_capacity(COLLIDER_CACHE_CAPACITY),
            contact_cache: Vec::with_capacity(CONTACT_CACHE_CAPACITY),
        })
    }

    /// Advance the simulation by one fixed tick. Runs the whole
    /// pipeline to completion; no-op unless the match is live.
    pub fn tick(&mut self, host: &mut dyn EngineHost) {
        if self.state.phase != GamePhase::Playing {
            return;
        }

        // Cheats are honored at the top of the tick, then consumed.
        if self.state.player.common.input.cheat_health {
            self.state.player.common.health = self.state.player.common.spec.max_health;
        }

        // 1. Gather impacts from the previous tick's projectile
        //    contacts.
        systems::impacts::collect(&mut self.state, &mut self.pools, host, &mut self.contact_cache);
        // 2. Resolve damage, deaths, and attach/detach side effects.
        systems::impacts::resolve(
            &mut self.state,
            &mut self.pools,
            &self.config,
            &mut self.rng,
            host,
            &mut self.collider_cache,
        );

        // A direct hull hit ends the run mid-tick; a dead ship is
        // never advanced or allowed to fire.
        if self.state.phase == GamePhase::Playing {
            // 3. Enemy control law writes ship inputs.
            systems::enemy_ai::run(&mut self.state);
            // 4. Movement integration for the player and all enemies.
            systems::movement::run(&mut self.state, host);
            // 5. Weapon aim smoothing and firing for all ships.
            systems::weapons::run(&mut self.state, &mut self.pools, host);
            // 6. Age and reap projectiles and effects.
            systems::lifetimes::run(&mut self.state, &mut self.pools, host);
            // 7. Magnetism: attach touching debris, pull nearby bodies.
            systems::magnetism::run(
                &mut self.state,
                &mut self.pools,
                &self.config,
                host,
                &mut self.contact_cache,
                &mut self.collider_cache,
            );
            // 8. Spawn controller.
            systems::spawner::run(
                &mut self.state,
                &mut self.pools,
                &self.config,
                &mut self.rng,
                host,
            );

            if let Some(goal) = self.config.victory_mass {
                if self.state.player.debris.len() as u32 >= goal {
                    self.state.phase = GamePhase::Won;
                    info!(goal, "attached-mass goal reached; match won");
                }
            }
        }

        self.state.time.advance();
        self.state.player.common.input.end_tick();
    }

    /// The player's input record, written by the input collaborator
    /// once per render frame and read once per simulation tick.
    pub fn player_input_mut(&mut self) -> &mut ShipInput {
        &mut self.state.player.common.input
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn time(&self) -> SimTime {
        self.state.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Mutable state access for scenario setup in tests.
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Spawn one enemy of a variant directly (for tests that need a
    /// target without running the spawn controller).
    #[cfg(test)]
    pub fn spawn_enemy_at(
        &mut self,
        host: &mut dyn EngineHost,
        variant: &lodestone_core::specs::SpawnVariant,
        position: glam::Vec2,
    ) -> Option<EntityHandle> {
        world_setup::spawn_enemy(&mut self.state, &mut self.pools, host, variant, position)
    }

    /// Spawn one free debris piece directly (for attach scenarios).
    #[cfg(test)]
    pub fn spawn_debris_at(
        &mut self,
        host: &mut dyn EngineHost,
        prototype: lodestone_core::types::PrototypeId,
        position: glam::Vec2,
    ) -> Option<EntityHandle> {
        let pool = self.pools.debris_mut(prototype)?;
        let piece = pool.spawn(host);
        host.set_layer(piece.root, lodestone_core::types::Layer::Debris);
        host.set_transform(piece.root, position, 0.0);
        Some(piece.root)
    }

    /// Pool registry access for membership assertions in tests.
    #[cfg(test)]
    pub fn pools_mut(&mut self) -> &mut PoolTable {
        &mut self.pools
    }
}
