use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod camera;
pub mod drawable;
pub mod egui_input_guard;
pub mod input;
pub mod palette;
pub mod tile_render;

use camera::CameraView;
use drawable::TileCanvas;
use input::CursorCell;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.insert_resource(ClearColor(palette::BACKGROUND))
            .init_resource::<CameraView>()
            .init_resource::<TileCanvas>()
            .init_resource::<CursorCell>()
            .add_systems(Startup, camera::setup_camera)
            .add_systems(
                Update,
                (
                    camera::fit_camera_to_grid,
                    camera::camera_zoom,
                    camera::camera_pan_keyboard,
                    camera::apply_camera_view,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_cell,
                    input::handle_keyboard,
                    input::handle_source_click,
                )
                    .chain()
                    .after(camera::apply_camera_view),
            )
            .add_systems(
                Update,
                (
                    tile_render::spawn_tiles,
                    tile_render::paint_canvas,
                    tile_render::apply_canvas,
                    tile_render::draw_overlays,
                )
                    .chain()
                    .after(input::handle_source_click),
            );
    }
}
