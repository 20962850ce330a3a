//! Utility helpers for tests.
//!
//! Builds headless apps running [`DrivePlugin`] with a fixed frame time so
//! movement can be asserted exactly.
pub mod input;

use std::time::Duration;

use bevy::prelude::*;
use bevy_time::TimeUpdateStrategy;
use busride::{
    log_system_error, AxisBindings, CameraEnabled, CameraPair, DrivePlugin, VehicleController,
};

/// Frame time used by [`drive_app`], in seconds.
pub const FRAME_SECS: f32 = 0.1;

/// Headless app with [`DrivePlugin`] and a fixed `FRAME_SECS` tick.
///
/// Keyboard bindings are empty so tests write axes directly; insert an
/// [`AxisBindings`] afterwards to exercise keyboard input. The first tick is
/// run here because Bevy reports a zero delta on it.
pub fn drive_app() -> App {
    build_drive_app(App::new())
}

/// Like [`drive_app`] but faults are logged through
/// [`log_system_error`] instead of panicking.
pub fn logging_drive_app() -> App {
    let mut app = App::new();
    app.set_error_handler(log_system_error);
    build_drive_app(app)
}

fn build_drive_app(mut app: App) -> App {
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        FRAME_SECS,
    )));
    app.insert_resource(AxisBindings::empty());
    app.add_plugins(DrivePlugin);
    app.update();
    app
}

/// Spawns a vehicle at the origin together with a consistent camera pair
/// (main enabled, hood disabled). Returns `(vehicle, main, hood)`.
pub fn spawn_vehicle_with_cameras(
    app: &mut App,
    controller: VehicleController,
) -> (Entity, Entity, Entity) {
    let world = app.world_mut();
    let main = world.spawn(CameraEnabled(true)).id();
    let hood = world.spawn(CameraEnabled(false)).id();
    let vehicle = world
        .spawn((
            controller,
            Transform::default(),
            CameraPair {
                main: Some(main),
                hood: Some(hood),
            },
        ))
        .id();
    (vehicle, main, hood)
}

/// Current `(main, hood)` flags of a camera pair.
///
/// # Panics
/// Panics if either camera lacks a [`CameraEnabled`] flag.
pub fn camera_flags(app: &App, main: Entity, hood: Entity) -> (bool, bool) {
    let flag = |e: Entity| {
        app.world()
            .get::<CameraEnabled>(e)
            .map(|c| c.0)
            .unwrap_or_else(|| panic!("camera {e} has no CameraEnabled"))
    };
    (flag(main), flag(hood))
}

/// Translation of `entity`.
///
/// # Panics
/// Panics if the entity has no `Transform`.
pub fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation)
        .unwrap_or_else(|| panic!("entity {entity} has no Transform"))
}
