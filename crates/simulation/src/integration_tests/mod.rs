//! Integration tests for the flood simulation using the `TestFlood` harness.
//!
//! These spin up a headless Bevy App with `SimulationPlugin` and drive the
//! engine through the round scheduler.

mod scenario_tests;
mod scheduler_tests;
