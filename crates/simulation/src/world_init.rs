// =============================================================================
// World generation: terrain from the configured preset, the expansion engine
// and the initial water sources.
// =============================================================================

use bevy::prelude::*;

use crate::config::FloodConfig;
use crate::engine::ExpansionEngine;
use crate::terrain_generation::generate_terrain;

/// Marker resource that, when present, causes `init_world` to skip terrain
/// generation. Used by the test harness to supply its own engine.
#[derive(Resource)]
pub struct SkipWorldInit;

pub fn init_world(
    mut commands: Commands,
    config: Res<FloodConfig>,
    skip: Option<Res<SkipWorldInit>>,
) {
    if skip.is_some() {
        return;
    }
    commands.insert_resource(build_engine(&config));
}

/// Build an engine from `config` and register its sources.
///
/// Sources that are out of bounds or sit on impassable terrain are skipped
/// with a warning.
pub fn build_engine(config: &FloodConfig) -> ExpansionEngine {
    let shape = config.shape();
    let terrain = generate_terrain(shape, &config.terrain);
    info!(
        "Generated {:?} terrain {}x{}: levels {}..={}, {} passable cells",
        config.terrain.preset,
        shape.width,
        shape.height,
        terrain.min_level(),
        terrain.max_level(),
        terrain.passable_count()
    );

    let mut engine = ExpansionEngine::new(terrain, config.engine, config.seed);
    for &source in &config.sources {
        match engine.add_source(source) {
            Ok(true) => {}
            Ok(false) => debug!("Source {} listed twice", source),
            Err(e) => warn!("Skipping source {}: {}", source, e),
        }
    }
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;
    use crate::terrain_generation::TerrainPreset;

    #[test]
    fn test_build_engine_registers_default_sources() {
        let mut config = FloodConfig::default();
        config.terrain.cave_threshold = 0.0;
        let engine = build_engine(&config);
        assert_eq!(engine.source_count(), 2);
        assert!(engine.is_source(Coord::new(10, 20)));
        assert!(engine.is_source(Coord::new(30, 30)));
    }

    #[test]
    fn test_build_engine_skips_bad_sources() {
        let mut config = FloodConfig::default();
        config.grid_width = 8;
        config.grid_height = 8;
        config.terrain.preset = TerrainPreset::Flat;
        config.terrain.cave_threshold = 0.0;
        config.sources = vec![Coord::new(2, 2), Coord::new(2, 2), Coord::new(40, 40)];
        let engine = build_engine(&config);
        assert_eq!(engine.source_count(), 1);
        assert_eq!(engine.frontier_len(), 1);
    }
}
