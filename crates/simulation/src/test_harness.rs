//! # TestFlood: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so scenarios can drive the
//! round scheduler without a window or renderer. Virtual time advances by
//! exactly one round interval per `app.update()`.

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::{EngineSettings, FloodConfig};
use crate::engine::ExpansionEngine;
use crate::grid::{Coord, GridShape};
use crate::scheduler::StepScheduler;
use crate::terrain::TerrainModel;
use crate::world_init::SkipWorldInit;
use crate::SimulationPlugin;

/// Upper bound on `app.update()` calls spent waiting for rounds.
const MAX_UPDATES_PER_ROUND: u64 = 8;

pub struct TestFlood {
    app: App,
}

impl TestFlood {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Engine over `terrain` with default settings and seed 42; no sources.
    pub fn new(terrain: TerrainModel) -> Self {
        Self::with_engine(ExpansionEngine::new(terrain, EngineSettings::default(), 42))
    }

    /// Flat `width` x `height` grid at `level`.
    pub fn flat(width: usize, height: usize, level: u32) -> Self {
        Self::new(TerrainModel::flat(GridShape::new(width, height), level))
    }

    /// Use a prebuilt engine; `init_world` is skipped.
    pub fn with_engine(engine: ExpansionEngine) -> Self {
        let config = FloodConfig::default();
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(config.round_interval()));
        app.insert_resource(config);

        // Insert the marker BEFORE SimulationPlugin so init_world skips.
        app.insert_resource(SkipWorldInit);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(engine);

        // Run one update so Startup systems execute.
        app.update();
        Self { app }
    }

    /// Full startup path: `init_world` builds terrain and engine from `config`.
    pub fn from_config(config: FloodConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(config.round_interval()));
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern: consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_source(mut self, x: usize, y: usize) -> Self {
        let coord = Coord::new(x, y);
        let added = self.engine_mut().add_source(coord);
        assert!(added.is_ok(), "could not add source {coord}: {added:?}");
        self
    }

    pub fn paused(mut self) -> Self {
        self.scheduler_mut().set_paused(true);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run `n` app updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Update until the scheduler has completed `n` more rounds.
    pub fn run_rounds(&mut self, n: u64) {
        let target = self.round() + n;
        let mut budget = (n + 1) * MAX_UPDATES_PER_ROUND;
        while self.round() < target {
            assert!(
                budget > 0,
                "scheduler stalled at round {} (target {target})",
                self.round()
            );
            budget -= 1;
            self.app.update();
        }
    }

    /// Queue a single round the way the step key does.
    pub fn request_round(&mut self) {
        self.scheduler_mut().request_round();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn engine(&self) -> &ExpansionEngine {
        self.app.world().resource::<ExpansionEngine>()
    }

    pub fn engine_mut(&mut self) -> Mut<'_, ExpansionEngine> {
        self.app.world_mut().resource_mut::<ExpansionEngine>()
    }

    pub fn scheduler(&self) -> &StepScheduler {
        self.app.world().resource::<StepScheduler>()
    }

    pub fn scheduler_mut(&mut self) -> Mut<'_, StepScheduler> {
        self.app.world_mut().resource_mut::<StepScheduler>()
    }

    pub fn round(&self) -> u64 {
        self.scheduler().round()
    }

    pub fn water_level(&self, x: usize, y: usize) -> u32 {
        self.engine().water_level(Coord::new(x, y))
    }

    pub fn total_water(&self) -> u64 {
        self.engine().total_water()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_quiescent(&self) {
        let engine = self.engine();
        assert!(
            engine.is_quiescent(),
            "expected quiescence at round {}: frontier {} entries, water {}",
            self.round(),
            engine.frontier_len(),
            engine.total_water()
        );
    }

    /// Assert no cell rises above the engine's level cap.
    pub fn assert_under_cap(&self) {
        let engine = self.engine();
        for c in engine.shape().coords() {
            let total = engine.total_level(c).unwrap_or(0);
            assert!(
                total <= engine.level_cap(),
                "cell {c} at {total} exceeds cap {}",
                engine.level_cap()
            );
        }
    }
}
