#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Shadow Gate.
//!
//! The world owns every enemy, defender and projectile of a session. Hosts
//! mutate it only through [`apply`] and observe it through the read-only
//! [`query`] accessors.

mod defenders;
mod enemies;
mod projectiles;

use std::mem;

use log::{debug, info, trace};
use shadow_gate_core::{
    balance::{MANA_REGEN_PER_SECOND, MAX_TICK_SECONDS, STARTING_LIVES, STARTING_MANA},
    Command, DefenderId, DefenderKind, EnemyId, EnemyStatus, Event, GamePhase, Layout,
    PlacementError, ProjectileId, SlotId, WaveStats,
};
use shadow_gate_system_movement::Movement;
use shadow_gate_system_spawning::Spawning;
use shadow_gate_system_tower_combat::Attack;

use crate::{
    defenders::DefenderRegistry,
    enemies::Enemy,
    projectiles::{Flight, Projectile},
};

/// Session parameters fixed at construction.
#[derive(Clone, Debug)]
pub struct Config {
    layout: Layout,
    starting_mana: f32,
    starting_lives: u32,
}

impl Config {
    /// Creates a new configuration from the battlefield layout and the
    /// session's opening resources.
    #[must_use]
    pub const fn new(layout: Layout, starting_mana: f32, starting_lives: u32) -> Self {
        Self {
            layout,
            starting_mana,
            starting_lives,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Layout::default(), STARTING_MANA, STARTING_LIVES)
    }
}

/// Represents the authoritative Shadow Gate world state.
#[derive(Debug)]
pub struct World {
    layout: Layout,
    phase: GamePhase,
    mana: f32,
    lives: u32,
    tick_index: u64,
    spawning: Spawning,
    movement: Movement,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    defenders: DefenderRegistry,
    projectiles: Vec<Projectile>,
    next_projectile_id: ProjectileId,
}

impl World {
    /// Creates a new world using the default layout and opening resources.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new world from the provided configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let defenders = DefenderRegistry::new(config.layout.slots());
        Self {
            layout: config.layout,
            phase: GamePhase::Running,
            mana: config.starting_mana,
            lives: config.starting_lives,
            tick_index: 0,
            spawning: Spawning::default(),
            movement: Movement::default(),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            defenders,
            projectiles: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    /// Starts the next wave.
    ///
    /// Returns the new wave's stats, or `None` when a wave is still running
    /// or the session is over. Rejected requests leave the world untouched.
    pub fn start_wave(&mut self, out_events: &mut Vec<Event>) -> Option<WaveStats> {
        let started = match self.phase {
            GamePhase::Running => self.spawning.start_wave(self.active_enemies()),
            GamePhase::GameOver => None,
        };

        match started {
            Some(stats) => {
                let level = self.spawning.level();
                info!("wave {level} started");
                out_events.push(Event::WaveStarted { level, stats });
            }
            None => {
                let level = self.spawning.level();
                debug!("wave start rejected at level {level}");
                out_events.push(Event::WaveStartRejected { level });
            }
        }

        started
    }

    /// Places a defender of `kind` on `slot`, paying its cost.
    ///
    /// # Errors
    ///
    /// Fails without mutating anything when the session is over, the slot does
    /// not exist or is occupied, or the treasury cannot cover the cost.
    pub fn place_defender(
        &mut self,
        slot: SlotId,
        kind: DefenderKind,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, PlacementError> {
        match self.try_place_defender(slot, kind) {
            Ok(defender) => {
                debug!("placed {kind:?} defender {} on slot {}", defender.get(), slot.get());
                out_events.push(Event::DefenderPlaced {
                    defender,
                    slot,
                    kind,
                });
                Ok(defender)
            }
            Err(reason) => {
                debug!("rejected {kind:?} placement on slot {}: {reason}", slot.get());
                out_events.push(Event::DefenderPlacementRejected { slot, kind, reason });
                Err(reason)
            }
        }
    }

    fn try_place_defender(
        &mut self,
        slot: SlotId,
        kind: DefenderKind,
    ) -> Result<DefenderId, PlacementError> {
        if self.phase == GamePhase::GameOver {
            return Err(PlacementError::SessionOver);
        }

        let _ = self.defenders.vacant_slot(slot)?;
        if self.mana < kind.cost() {
            return Err(PlacementError::InsufficientMana);
        }

        let defender = self.defenders.insert(slot, kind)?;
        self.mana -= kind.cost();
        Ok(defender)
    }

    fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_active()).count()
    }

    fn tick(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        if !dt.is_finite() || dt < 0.0 || dt > MAX_TICK_SECONDS {
            debug!("skipping tick with dt {dt}");
            out_events.push(Event::TickSkipped { dt });
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });
        let was_running = self.spawning.is_running(self.active_enemies());

        self.spawn_enemies(dt, out_events);

        let path = self.layout.path();
        for enemy in &mut self.enemies {
            enemy.advance(dt, path, &self.movement);
        }

        self.resolve_departures(out_events);
        if self.phase == GamePhase::GameOver {
            return;
        }

        let launched = self.advance_defenders(dt, out_events);
        self.advance_projectiles(dt, out_events);
        // Fresh projectiles start flying on the next tick.
        self.projectiles.extend(launched);
        // Combat only defeats enemies, so this pass credits rewards and never
        // ends the session.
        self.resolve_departures(out_events);

        let running = self.spawning.is_running(self.active_enemies());
        if was_running && !running {
            let level = self.spawning.level();
            info!("wave {level} cleared");
            out_events.push(Event::WaveCleared { level });
        }

        if running && self.lives > 0 {
            self.mana += MANA_REGEN_PER_SECOND * dt;
        }
    }

    fn spawn_enemies(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let Some(stats) = self.spawning.advance(dt) else {
            return;
        };
        let Some(&position) = self.layout.path().first() else {
            return;
        };

        let enemy = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(enemy.get().saturating_add(1));
        self.enemies.push(Enemy::spawn(enemy, position, stats));
        trace!("enemy {} spawned", enemy.get());
        out_events.push(Event::EnemySpawned { enemy, position });
    }

    /// Applies the reward or penalty of every enemy that left the active
    /// state and removes it in a single compaction pass.
    fn resolve_departures(&mut self, out_events: &mut Vec<Event>) {
        let enemies = mem::take(&mut self.enemies);
        let mut survivors = Vec::with_capacity(enemies.len());

        for enemy in enemies {
            match enemy.status() {
                EnemyStatus::Active => survivors.push(enemy),
                EnemyStatus::Defeated => {
                    let reward = enemy.reward();
                    self.mana += reward;
                    trace!("enemy {} defeated for {reward} mana", enemy.id().get());
                    out_events.push(Event::EnemyDefeated {
                        enemy: enemy.id(),
                        reward,
                    });
                }
                EnemyStatus::Escaped => {
                    self.lives = self.lives.saturating_sub(1);
                    trace!("enemy {} escaped, {} lives left", enemy.id().get(), self.lives);
                    out_events.push(Event::EnemyEscaped {
                        enemy: enemy.id(),
                        lives_remaining: self.lives,
                    });

                    if self.lives == 0 && self.phase == GamePhase::Running {
                        self.phase = GamePhase::GameOver;
                        let level = self.spawning.level();
                        info!("game over at level {level}");
                        out_events.push(Event::GameOver { level });
                    }
                }
            }
        }

        self.enemies = survivors;
    }

    fn advance_defenders(&mut self, dt: f32, out_events: &mut Vec<Event>) -> Vec<Projectile> {
        let Self {
            defenders,
            enemies,
            next_projectile_id,
            ..
        } = self;
        let mut launched = Vec::new();

        for defender in defenders.iter_mut() {
            let Some(attack) = defender.advance(dt, enemies) else {
                continue;
            };

            match attack {
                Attack::Strike { target, damage } => {
                    if let Some(enemy) = enemies::find_mut(enemies, target) {
                        enemy.take_damage(damage);
                    }
                    out_events.push(Event::DefenderStruck {
                        defender: defender.id(),
                        enemy: target,
                        damage,
                    });
                }
                Attack::Launch { target, damage } => {
                    let projectile = *next_projectile_id;
                    *next_projectile_id = ProjectileId::new(projectile.get().saturating_add(1));
                    launched.push(Projectile::launch(
                        projectile,
                        defender.position(),
                        target,
                        damage,
                    ));
                    out_events.push(Event::ProjectileLaunched {
                        projectile,
                        defender: defender.id(),
                        enemy: target,
                    });
                }
            }
        }

        launched
    }

    fn advance_projectiles(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let Self {
            enemies,
            projectiles,
            ..
        } = self;

        projectiles.retain_mut(|projectile| match projectile.advance(dt, enemies) {
            Flight::InFlight => true,
            Flight::Hit { enemy, damage } => {
                if let Some(target) = enemies::find_mut(enemies, enemy) {
                    target.take_damage(damage);
                }
                out_events.push(Event::ProjectileHit {
                    projectile: projectile.id(),
                    enemy,
                    damage,
                });
                false
            }
            Flight::Expired => {
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id(),
                });
                false
            }
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::StartWave => {
            let _ = world.start_wave(out_events);
        }
        Command::PlaceDefender { slot, kind } => {
            let _ = world.place_defender(slot, kind, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use shadow_gate_core::{
        DefenderView, EnemyView, GamePhase, ProjectileView, SlotView, Vec2, WaveStats,
    };

    /// Lifecycle phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Reports whether the session ended because the lives ran out.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.phase == GamePhase::GameOver
    }

    /// Mana currently available for placements.
    #[must_use]
    pub fn mana(world: &World) -> f32 {
        world.mana
    }

    /// Lives left before the session ends.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Level of the most recently started wave; zero before the first wave.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.spawning.level()
    }

    /// Number of ticks that advanced the simulation.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether enemies are still pending or alive.
    #[must_use]
    pub fn is_wave_running(world: &World) -> bool {
        world.spawning.is_running(world.active_enemies())
    }

    /// Enemies of the current wave that have not spawned yet.
    #[must_use]
    pub fn pending_spawns(world: &World) -> u32 {
        world.spawning.pending()
    }

    /// Stats of the most recently started wave.
    #[must_use]
    pub fn current_wave_stats(world: &World) -> Option<WaveStats> {
        world.spawning.current_stats()
    }

    /// Stats the next wave would spawn with, without starting it.
    #[must_use]
    pub fn next_wave_stats(world: &World) -> WaveStats {
        world.spawning.next_wave_stats()
    }

    /// Ordered waypoints enemies traverse.
    #[must_use]
    pub fn path(world: &World) -> &[Vec2] {
        world.layout.path()
    }

    /// Captures the placement slots together with their occupancy.
    #[must_use]
    pub fn slot_view(world: &World) -> SlotView {
        SlotView::from_snapshots(world.defenders.slot_snapshots())
    }

    /// Captures a read-only view of the enemies still walking the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .filter(|enemy| enemy.is_active())
                .map(|enemy| enemy.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of every placed defender.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .defenders
                .iter()
                .map(|defender| defender.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }
}
