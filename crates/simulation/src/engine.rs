//! Frontier-expansion water engine.
//!
//! Water is placed one unit at a time at the cell the frontier queue ranks
//! lowest. After each placement the cell offers every intermediate level to
//! its lower neighbours, so low ground fills before high ground. Sources
//! re-queue themselves after each fill until they reach
//! `terrain.max_level() + SOURCE_HEADROOM`.
//!
//! Per `water_step(round)`:
//!   1. Re-queue any source below the cap that has no pending entry
//!   2. Pop the lowest-key `(coord, level)`; an empty frontier ends the step
//!   3. Add one unit of water at `coord`
//!   4. Sources below the cap re-queue at `this_level + 1`
//!   5. Each passable neighbour `difference` levels lower gets one entry per
//!      intermediate level

use std::collections::BTreeSet;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{EngineSettings, SOURCE_HEADROOM};
use crate::error::FloodError;
use crate::frontier::FrontierQueue;
use crate::grid::{Coord, GridShape};
use crate::sim_entity::SimEntity;
use crate::terrain::TerrainModel;
use crate::water_grid::WaterGrid;

#[derive(Resource, Debug)]
pub struct ExpansionEngine {
    terrain: TerrainModel,
    water: WaterGrid,
    frontier: FrontierQueue<ChaCha8Rng>,
    sources: BTreeSet<Coord>,
    settings: EngineSettings,
    level_cap: u32,
    total_steps: u64,
}

/// Terrain plus water at `coord`; `None` for impassable or out-of-bounds cells.
#[inline]
fn total_level_of(terrain: &TerrainModel, water: &WaterGrid, coord: Coord) -> Option<u32> {
    Some(terrain.elevation(coord)? + water.get(coord)?)
}

impl ExpansionEngine {
    pub fn new(terrain: TerrainModel, settings: EngineSettings, seed: u64) -> Self {
        let water = WaterGrid::new(terrain.shape());
        let level_cap = terrain.max_level() + SOURCE_HEADROOM;
        Self {
            terrain,
            water,
            frontier: FrontierQueue::new(
                settings.depth_first_factor,
                ChaCha8Rng::seed_from_u64(seed),
            ),
            sources: BTreeSet::new(),
            settings,
            level_cap,
            total_steps: 0,
        }
    }

    /// Register a perpetual water source and seed the frontier at its current
    /// total level.
    ///
    /// Returns `Ok(false)` if `coord` is already a source. Impassable cells are
    /// rejected with `InvalidLevel` and are not registered.
    pub fn add_source(&mut self, coord: Coord) -> Result<bool, FloodError> {
        if !self.shape().in_bounds(coord) {
            return Err(FloodError::OutOfBounds { coord });
        }
        if self.sources.contains(&coord) {
            return Ok(false);
        }
        let level = self.total_level(coord);
        self.frontier.push(coord, level, 0.0)?;
        self.sources.insert(coord);
        Ok(true)
    }

    /// Place one unit of water. Returns the filled cell, or `None` when the
    /// frontier had nothing left to offer.
    pub fn water_step(&mut self, round: u64) -> Result<Option<Coord>, FloodError> {
        let delay = round as f64;
        self.replenish_sources(delay)?;

        let coord = loop {
            let coord = match self.frontier.pop() {
                Ok((coord, _)) => coord,
                Err(FloodError::FrontierExhausted) => {
                    debug!("Round {}: frontier is empty, nothing to fill", round);
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };
            // Neighbours may have queued extra entries for a source that has
            // since reached the cap.
            if self.is_source(coord) && self.total_level(coord) >= Some(self.level_cap) {
                continue;
            }
            break coord;
        };

        self.water.increment(coord);
        self.total_steps += 1;
        let this_level = self
            .total_level(coord)
            .ok_or(FloodError::InvalidLevel { coord })?;

        if self.is_source(coord) && this_level < self.level_cap {
            self.frontier.push(coord, Some(this_level + 1), delay)?;
        }

        let (neighbors, count) = self.shape().neighbors4(coord);
        for &neighbor in &neighbors[..count] {
            let Some(neighbor_level) = self.total_level(neighbor) else {
                continue;
            };
            let difference = this_level.saturating_sub(neighbor_level);
            for i in 0..difference {
                self.frontier
                    .push(neighbor, Some(neighbor_level + i), delay)?;
            }
        }

        Ok(Some(coord))
    }

    /// Run one round of `steps_per_round` water steps. Returns how many of
    /// them placed water.
    pub fn run_round(&mut self, round: u64) -> Result<u32, FloodError> {
        let mut filled = 0;
        for _ in 0..self.settings.steps_per_round {
            if self.water_step(round)?.is_some() {
                filled += 1;
            }
        }
        if self.settings.report_interval > 0 && round % self.settings.report_interval == 0 {
            info!("Round {}, water updates: {}", round, self.total_steps);
        }
        Ok(filled)
    }

    /// Make sure every source below the cap has at least one pending entry.
    ///
    /// A source's own re-queue can be rejected when that `(coord, level)` pair
    /// was already explored through a neighbour, which would otherwise stall
    /// the source for good.
    fn replenish_sources(&mut self, delay: f64) -> Result<(), FloodError> {
        let Self {
            terrain,
            water,
            frontier,
            sources,
            level_cap,
            ..
        } = self;
        let cap = *level_cap;

        for &source in sources.iter() {
            let Some(total) = total_level_of(terrain, water, source) else {
                continue;
            };
            if total >= cap || (total..=cap).any(|l| frontier.is_pending(source, l)) {
                continue;
            }
            if let Some(level) = (total..=cap).find(|&l| !frontier.is_explored(source, l)) {
                debug!("Re-queueing source {} at level {}", source, level);
                frontier.push(source, Some(level), delay)?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.terrain.shape()
    }

    /// Water at `coord`, 0 outside the grid.
    #[inline]
    pub fn water_level(&self, coord: Coord) -> u32 {
        self.water.get(coord).unwrap_or(0)
    }

    #[inline]
    pub fn total_level(&self, coord: Coord) -> Option<u32> {
        total_level_of(&self.terrain, &self.water, coord)
    }

    /// Highest total level a source is fed up to.
    pub fn level_cap(&self) -> u32 {
        self.level_cap
    }

    /// Normalisation range for presenting water depth.
    pub fn water_levels(&self) -> u32 {
        self.terrain.level_span() + SOURCE_HEADROOM
    }

    pub fn is_source(&self, coord: Coord) -> bool {
        self.sources.contains(&coord)
    }

    pub fn sources(&self) -> impl Iterator<Item = Coord> + '_ {
        self.sources.iter().copied()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Water units placed since the engine was built.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn total_water(&self) -> u64 {
        self.water.total()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn explored_len(&self) -> usize {
        self.frontier.explored_len()
    }

    /// True once nothing is queued and every source has reached the cap.
    pub fn is_quiescent(&self) -> bool {
        self.frontier.is_empty()
            && self
                .sources
                .iter()
                .all(|&s| self.total_level(s) >= Some(self.level_cap))
    }

    pub fn terrain(&self) -> &TerrainModel {
        &self.terrain
    }

    pub fn water(&self) -> &WaterGrid {
        &self.water
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn depth_first_factor(&self) -> f64 {
        self.frontier.depth_first_factor()
    }

    pub fn set_depth_first_factor(&mut self, factor: f64) {
        self.settings.depth_first_factor = factor;
        self.frontier.set_depth_first_factor(factor);
    }
}

impl SimEntity for ExpansionEngine {
    fn step_update(&mut self, round: u64) -> Result<(), FloodError> {
        self.run_round(round).map(|_| ())
    }

    fn continuous_update(&mut self, _t: f32) {}
}
