use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod stats_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.init_resource::<stats_panel::StatsPanelVisible>().add_systems(
            Update,
            (
                stats_panel::stats_panel_keybind,
                stats_panel::stats_panel_ui,
            )
                .chain(),
        );
    }
}
