use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use simulation::grid::Coord;
use simulation::scheduler::StepScheduler;
use simulation::ExpansionEngine;

use crate::egui_input_guard::{egui_wants_keyboard, egui_wants_pointer};
use crate::tile_render::world_to_cell;

/// Grid cell under the mouse cursor, if any.
#[derive(Resource, Debug, Default)]
pub struct CursorCell(pub Option<Coord>);

pub fn update_cursor_cell(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    engine: Option<Res<ExpansionEngine>>,
    mut cursor: ResMut<CursorCell>,
) {
    let cell = engine.and_then(|engine| {
        let window = windows.get_single().ok()?;
        let (camera, cam_transform) = camera_q.get_single().ok()?;
        let screen_pos = window.cursor_position()?;
        let world = camera.viewport_to_world_2d(cam_transform, screen_pos).ok()?;
        world_to_cell(engine.shape(), world)
    });
    if cursor.0 != cell {
        cursor.0 = cell;
    }
}

/// Space: pause/resume. Period: run one round. Escape: quit.
pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut scheduler: ResMut<StepScheduler>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Quit requested");
        exit.send(AppExit::Success);
        return;
    }
    if egui_wants_keyboard(&mut contexts) {
        return;
    }
    if keys.just_pressed(KeyCode::Space) {
        scheduler.toggle_pause();
        info!(
            "Simulation {} at round {}",
            if scheduler.is_paused() { "paused" } else { "resumed" },
            scheduler.round()
        );
    }
    if keys.just_pressed(KeyCode::Period) {
        scheduler.request_round();
    }
}

/// Left click: add a water source at the cell under the cursor.
pub fn handle_source_click(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    cursor: Res<CursorCell>,
    engine: Option<ResMut<ExpansionEngine>>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    let (Some(coord), Some(mut engine)) = (cursor.0, engine) else {
        return;
    };
    match engine.add_source(coord) {
        Ok(true) => info!("Added water source at {}", coord),
        Ok(false) => debug!("{} is already a source", coord),
        Err(e) => warn!("Cannot add source at {}: {}", coord, e),
    }
}
