use bevy::prelude::*;

pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod scheduler;
pub mod sim_entity;
pub mod terrain;
pub mod terrain_generation;
pub mod water_grid;
pub mod world_init;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use engine::ExpansionEngine;
pub use error::FloodError;
pub use grid::{Coord, GridShape};
pub use sim_entity::SimEntity;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Keeps a config inserted by the app before the plugin.
        app.init_resource::<config::FloodConfig>()
            .add_systems(Startup, world_init::init_world);

        app.add_plugins(scheduler::SchedulerPlugin);
    }
}
