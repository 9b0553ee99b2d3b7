//! Round driver.
//!
//! Rounds run on Bevy's `FixedUpdate` at `FloodConfig::rounds_per_second`.
//! Rendering and UI live in `Update`, so they only ever see the grid between
//! completed rounds.

use bevy::prelude::*;

use crate::config::FloodConfig;
use crate::engine::ExpansionEngine;
use crate::sim_entity::SimEntity;

/// Round counter plus pause/single-step state.
///
/// The counter only goes up; it feeds the frontier tie-break delay.
#[derive(Resource, Debug, Default)]
pub struct StepScheduler {
    round: u64,
    paused: bool,
    queued_rounds: u32,
}

impl StepScheduler {
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Queue one round to run on the next fixed tick, even while paused.
    pub fn request_round(&mut self) {
        self.queued_rounds = self.queued_rounds.saturating_add(1);
    }

    pub fn queued_rounds(&self) -> u32 {
        self.queued_rounds
    }

    /// Advance the counter if a round is due, returning the new round number.
    pub fn next_round(&mut self) -> Option<u64> {
        if self.queued_rounds > 0 {
            self.queued_rounds -= 1;
        } else if self.paused {
            return None;
        }
        self.round += 1;
        Some(self.round)
    }
}

/// Run one round of `T` if the scheduler says one is due.
pub fn run_round<T: SimEntity + Resource>(
    mut scheduler: ResMut<StepScheduler>,
    entity: Option<ResMut<T>>,
) {
    let Some(mut entity) = entity else {
        return;
    };
    let Some(round) = scheduler.next_round() else {
        return;
    };
    if let Err(e) = entity.step_update(round) {
        error!("Round {} failed: {}", round, e);
    }
}

pub fn run_continuous_update<T: SimEntity + Resource>(time: Res<Time>, entity: Option<ResMut<T>>) {
    if let Some(mut entity) = entity {
        entity.continuous_update(time.elapsed_secs());
    }
}

/// Keep the FixedUpdate timestep equal to one round interval.
pub fn sync_round_timestep(config: Res<FloodConfig>, mut time: ResMut<Time<Fixed>>) {
    if config.rounds_per_second.is_finite() && config.rounds_per_second > 0.0 {
        time.set_timestep(config.round_interval());
    } else {
        warn!(
            "Ignoring rounds_per_second {}; keeping timestep {:?}",
            config.rounds_per_second,
            time.timestep()
        );
    }
}

pub struct SchedulerPlugin;

impl Plugin for SchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StepScheduler>()
            .add_systems(
                PreUpdate,
                sync_round_timestep.run_if(resource_exists_and_changed::<FloodConfig>),
            )
            .add_systems(FixedUpdate, run_round::<ExpansionEngine>)
            .add_systems(Update, run_continuous_update::<ExpansionEngine>);
    }
}
