use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use simulation::ExpansionEngine;

use crate::tile_render::grid_extent;

const PAN_SPEED: f32 = 400.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 8.0;
/// Empty border kept around the grid when fitting.
const FIT_MARGIN: f32 = 1.05;

/// Zoom relative to the fitted view, and whether the view has been fitted.
#[derive(Resource, Debug)]
pub struct CameraView {
    pub zoom: f32,
    pub fitted: bool,
    base_scale: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            fitted: false,
            base_scale: 1.0,
        }
    }
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        OrthographicProjection::default_2d(),
        Transform::default(),
    ));
}

/// Orthographic scale that fits `extent` world units into `window` pixels.
pub fn fit_scale(extent: Vec2, window: Vec2) -> f32 {
    if window.x <= 0.0 || window.y <= 0.0 {
        return 1.0;
    }
    (extent.x / window.x).max(extent.y / window.y) * FIT_MARGIN
}

/// Fit the grid to the window once the engine exists and whenever the window
/// is resized.
pub fn fit_camera_to_grid(
    engine: Option<Res<ExpansionEngine>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut resized: EventReader<bevy::window::WindowResized>,
    mut view: ResMut<CameraView>,
) {
    let Some(engine) = engine else {
        return;
    };
    let resized = resized.read().count() > 0;
    if view.fitted && !resized {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    view.base_scale = fit_scale(
        grid_extent(engine.shape()),
        Vec2::new(window.width(), window.height()),
    );
    view.fitted = true;
}

pub fn apply_camera_view(
    view: Res<CameraView>,
    mut query: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    if !view.is_changed() {
        return;
    }
    let Ok(mut projection) = query.get_single_mut() else {
        return;
    };
    projection.scale = view.base_scale * view.zoom;
}

pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut view: ResMut<CameraView>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        view.zoom = (view.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

/// WASD/Arrow keys: pan the view.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    view: Res<CameraView>,
    mut query: Query<&mut Transform, With<Camera2d>>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    let delta = dir.normalize() * PAN_SPEED * view.base_scale * view.zoom * time.delta_secs();
    transform.translation += delta.extend(0.0);
}
