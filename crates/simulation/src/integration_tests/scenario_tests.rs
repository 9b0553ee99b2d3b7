use crate::config::EngineSettings;
use crate::engine::ExpansionEngine;
use crate::grid::{Coord, GridShape};
use crate::terrain::TerrainModel;
use crate::terrain_generation::{generate_terrain, TerrainPreset, TerrainSettings};
use crate::test_harness::TestFlood;

fn preset_engine(preset: TerrainPreset, size: usize) -> ExpansionEngine {
    let terrain = generate_terrain(
        GridShape::new(size, size),
        &TerrainSettings {
            preset,
            levels: 4,
            cave_threshold: 0.0,
            seed: 11,
        },
    );
    ExpansionEngine::new(terrain, EngineSettings::default(), 42)
}

// ===========================================================================
// Settling
// ===========================================================================

#[test]
fn test_flat_basin_settles_at_cap() {
    let mut flood = TestFlood::flat(6, 6, 0).with_source(2, 3);
    // 36 cells filled to level 2 need 72 steps = 15 rounds; leave slack.
    flood.run_rounds(40);
    flood.assert_quiescent();
    flood.assert_under_cap();
    assert_eq!(flood.total_water(), 72);
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(flood.water_level(x, y), 2, "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_water_stays_out_of_impassable_cells() {
    let terrain = TerrainModel::from_rows(&[
        &[Some(0), Some(0), None, Some(0)],
        &[Some(0), Some(0), None, Some(0)],
        &[Some(0), Some(0), None, Some(0)],
    ]);
    let mut flood = TestFlood::new(terrain).with_source(0, 1);
    flood.run_rounds(30);
    for y in 0..3 {
        assert_eq!(flood.water_level(2, y), 0, "wall cell (2, {y})");
        assert_eq!(flood.water_level(3, y), 0, "cut-off cell (3, {y})");
    }
    assert!(flood.water_level(1, 1) > 0);
}

#[test]
fn test_low_ground_fills_before_high_ground() {
    // Left half at level 0, right half at level 1; source on the left.
    let low = Some(0);
    let high = Some(1);
    let terrain = TerrainModel::from_rows(&[
        &[low, low, high, high],
        &[low, low, high, high],
    ]);
    let mut flood = TestFlood::new(terrain).with_source(0, 0);
    // Four steps fill the four low cells, one unit each.
    flood.request_round();
    flood.scheduler_mut().set_paused(true);
    flood.run_rounds(1);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(flood.water_level(x, y) >= 1, "low cell ({x}, {y}) still dry");
    }
    for (x, y) in [(3, 0), (3, 1)] {
        assert_eq!(flood.water_level(x, y), 0, "far high cell ({x}, {y}) wet early");
    }
}

#[test]
fn test_two_sources_on_generated_terrain_settle() {
    let engine = preset_engine(TerrainPreset::Well, 12);
    let mut flood = TestFlood::with_engine(engine)
        .with_source(2, 2)
        .with_source(9, 9);
    let mut rounds = 0;
    while !flood.engine().is_quiescent() {
        flood.run_rounds(25);
        rounds += 25;
        assert!(rounds < 10_000, "never settled");
        flood.assert_under_cap();
    }
    let settled = flood.total_water();
    flood.run_rounds(10);
    assert_eq!(flood.total_water(), settled);
}

#[test]
fn test_source_added_mid_run_joins() {
    let mut flood = TestFlood::flat(10, 10, 0).with_source(1, 1);
    flood.run_rounds(5);
    let source = Coord::new(8, 8);
    assert_eq!(flood.engine_mut().add_source(source), Ok(true));
    flood.run_rounds(60);
    assert_eq!(flood.water_level(8, 8), 2);
    flood.assert_quiescent();
}

// ===========================================================================
// Monotonicity across rounds
// ===========================================================================

#[test]
fn test_levels_never_drop_between_rounds() {
    let engine = preset_engine(TerrainPreset::Bumps, 16);
    let mut flood = TestFlood::with_engine(engine).with_source(3, 12);
    let mut previous = flood.engine().water().cells().to_vec();
    for _ in 0..40 {
        flood.run_rounds(1);
        let now = flood.engine().water().cells().to_vec();
        assert!(previous.iter().zip(&now).all(|(a, b)| b >= a));
        previous = now;
    }
}

#[test]
fn test_same_seed_same_flood() {
    let run = || {
        let mut flood = TestFlood::with_engine(preset_engine(TerrainPreset::Walls, 16))
            .with_source(4, 4);
        flood.run_rounds(50);
        flood.engine().water().cells().to_vec()
    };
    assert_eq!(run(), run());
}
