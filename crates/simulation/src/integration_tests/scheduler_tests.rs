use bevy::prelude::*;

use crate::config::FloodConfig;
use crate::test_harness::TestFlood;

// ===========================================================================
// Round cadence
// ===========================================================================

#[test]
fn test_each_round_places_steps_per_round() {
    let mut flood = TestFlood::flat(16, 16, 0).with_source(8, 8);
    flood.run_rounds(3);
    assert_eq!(flood.round(), 3);
    assert_eq!(flood.total_water(), 15, "5 steps per round over 3 rounds");
    assert_eq!(flood.engine().total_steps(), 15);
}

#[test]
fn test_fixed_timestep_follows_config() {
    let mut flood = TestFlood::flat(4, 4, 0);
    let expected = FloodConfig::default().round_interval();
    let timestep = flood.world_mut().resource::<Time<Fixed>>().timestep();
    assert_eq!(timestep, expected);
}

#[test]
fn test_round_counter_strictly_increases() {
    let mut flood = TestFlood::flat(8, 8, 0).with_source(1, 1);
    let mut last = flood.round();
    for _ in 0..20 {
        flood.tick(1);
        let now = flood.round();
        assert!(now >= last, "round went backwards: {last} -> {now}");
        last = now;
    }
    assert!(last > 0, "no rounds ran in 20 updates");
}

// ===========================================================================
// Pause and single-step
// ===========================================================================

#[test]
fn test_paused_scheduler_places_no_water() {
    let mut flood = TestFlood::flat(8, 8, 0).with_source(4, 4).paused();
    flood.tick(10);
    assert_eq!(flood.round(), 0);
    assert_eq!(flood.total_water(), 0);
}

#[test]
fn test_requested_round_runs_once_while_paused() {
    let mut flood = TestFlood::flat(8, 8, 0).with_source(4, 4).paused();
    flood.request_round();
    flood.run_rounds(1);
    flood.tick(5);
    assert_eq!(flood.round(), 1);
    assert_eq!(flood.total_water(), 5);
}

#[test]
fn test_resume_after_pause_continues_counter() {
    let mut flood = TestFlood::flat(8, 8, 0).with_source(4, 4);
    flood.run_rounds(2);
    flood.scheduler_mut().set_paused(true);
    flood.tick(5);
    let held = flood.round();
    flood.scheduler_mut().set_paused(false);
    flood.run_rounds(1);
    assert_eq!(flood.round(), held + 1);
}

// ===========================================================================
// Exhaustion does not stop the loop
// ===========================================================================

#[test]
fn test_rounds_continue_without_sources() {
    let mut flood = TestFlood::flat(4, 4, 0);
    flood.run_rounds(5);
    assert_eq!(flood.round(), 5);
    assert_eq!(flood.total_water(), 0);
}
