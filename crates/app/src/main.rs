use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use simulation::config::FloodConfig;

/// Path to a JSON config file.
const CONFIG_ENV: &str = "FLOOD_CONFIG";
/// Overrides both the frontier seed and the terrain seed.
const SEED_ENV: &str = "FLOOD_SEED";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Flood".to_string(),
            resolution: (800.0, 640.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    });

    let config = load_config(
        std::env::var(CONFIG_ENV).ok().as_deref(),
        std::env::var(SEED_ENV).ok().as_deref(),
    );
    info!(
        "Starting flood: {}x{} {:?} terrain, seed {}, {} sources",
        config.grid_width,
        config.grid_height,
        config.terrain.preset,
        config.seed,
        config.sources.len()
    );

    // Insert the config BEFORE SimulationPlugin so init_world builds from it.
    app.insert_resource(config).add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}

/// Build the run config from an optional file path and seed override.
///
/// Any failure is logged and falls back to the defaults for that part.
fn load_config(path: Option<&str>, seed: Option<&str>) -> FloodConfig {
    let mut config = match path {
        Some(path) => FloodConfig::load(path).unwrap_or_else(|e| {
            warn!("Could not load config from {}: {}; using defaults", path, e);
            FloodConfig::default()
        }),
        None => FloodConfig::default(),
    };

    if let Some(seed) = seed {
        match seed.trim().parse::<u64>() {
            Ok(seed) => {
                config.seed = seed;
                config.terrain.seed = seed;
            }
            Err(e) => warn!("Ignoring {}={:?}: {}", SEED_ENV, seed, e),
        }
    }
    config
}
