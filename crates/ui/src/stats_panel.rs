//! Simulation stats and controls panel.
//!
//! Provides an egui window with:
//! - Round, processed steps, total water, frontier and explored counts
//! - Source count and quiescence flag
//! - Pause/resume and single-round buttons
//! - Depth-first factor slider
//! - Keybind (H) to toggle the panel

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::scheduler::StepScheduler;
use simulation::ExpansionEngine;

const FACTOR_RANGE: std::ops::RangeInclusive<f64> = 0.0..=20.0;

// =============================================================================
// Resources
// =============================================================================

#[derive(Resource)]
pub struct StatsPanelVisible(pub bool);

impl Default for StatsPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Read-only numbers shown by the panel, gathered once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloodStats {
    pub round: u64,
    pub total_steps: u64,
    pub total_water: u64,
    pub frontier: usize,
    pub explored: usize,
    pub sources: usize,
    pub quiescent: bool,
    pub level_cap: u32,
}

impl FloodStats {
    pub fn gather(engine: &ExpansionEngine, scheduler: &StepScheduler) -> Self {
        Self {
            round: scheduler.round(),
            total_steps: engine.total_steps(),
            total_water: engine.total_water(),
            frontier: engine.frontier_len(),
            explored: engine.explored_len(),
            sources: engine.source_count(),
            quiescent: engine.is_quiescent(),
            level_cap: engine.level_cap(),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> [(&'static str, String); 7] {
        [
            ("Round", self.round.to_string()),
            ("Water steps", self.total_steps.to_string()),
            ("Total water", self.total_water.to_string()),
            ("Frontier", self.frontier.to_string()),
            ("Explored", self.explored.to_string()),
            ("Sources", format!("{} (cap {})", self.sources, self.level_cap)),
            (
                "State",
                if self.quiescent { "settled" } else { "flowing" }.to_string(),
            ),
        ]
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn stats_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<StatsPanelVisible>,
    mut scheduler: ResMut<StepScheduler>,
    engine: Option<ResMut<ExpansionEngine>>,
) {
    if !visible.0 {
        return;
    }
    let Some(mut engine) = engine else {
        return;
    };

    let stats = FloodStats::gather(&engine, &scheduler);
    let mut open = true;
    egui::Window::new("Flood")
        .open(&mut open)
        .resizable(false)
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            egui::Grid::new("flood_stats").striped(true).show(ui, |ui| {
                for (label, value) in stats.rows() {
                    ui.label(label);
                    ui.monospace(value);
                    ui.end_row();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                let label = if scheduler.is_paused() { "Resume" } else { "Pause" };
                if ui.button(label).clicked() {
                    scheduler.toggle_pause();
                }
                if ui.button("Step").clicked() {
                    scheduler.request_round();
                }
            });

            ui.separator();

            ui.label("Depth-first factor:");
            let mut factor = engine.depth_first_factor();
            let response = ui.add(egui::Slider::new(&mut factor, FACTOR_RANGE).step_by(0.5));
            if response.changed() {
                engine.set_depth_first_factor(factor);
            }

            ui.small("Space: pause  .: step  click: add source");
        });

    if !open {
        visible.0 = false;
    }
}

/// H toggles the panel.
pub fn stats_panel_keybind(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<StatsPanelVisible>) {
    if keys.just_pressed(KeyCode::KeyH) {
        visible.0 = !visible.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::config::EngineSettings;
    use simulation::grid::{Coord, GridShape};
    use simulation::terrain::TerrainModel;

    #[test]
    fn test_gather_reads_engine_and_scheduler() {
        let terrain = TerrainModel::flat(GridShape::new(3, 3), 0);
        let mut engine = ExpansionEngine::new(terrain, EngineSettings::default(), 7);
        engine.add_source(Coord::new(1, 1)).unwrap();
        engine.run_round(1).unwrap();
        let mut scheduler = StepScheduler::default();
        scheduler.next_round();

        let stats = FloodStats::gather(&engine, &scheduler);
        assert_eq!(stats.round, 1);
        assert_eq!(stats.total_steps, 5);
        assert_eq!(stats.total_water, 5);
        assert_eq!(stats.sources, 1);
        assert_eq!(stats.level_cap, 2);
        assert!(!stats.quiescent);
    }

    #[test]
    fn test_rows_show_settled_state() {
        let stats = FloodStats {
            round: 10,
            total_steps: 50,
            total_water: 18,
            frontier: 0,
            explored: 18,
            sources: 1,
            quiescent: true,
            level_cap: 2,
        };
        let rows = stats.rows();
        assert_eq!(rows[0], ("Round", "10".to_string()));
        assert_eq!(rows[6].1, "settled");
    }
}
