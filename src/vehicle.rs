//! Vehicle driving and camera switching.
//!
//! Each tick a vehicle reads its two axes, moves along its own forward axis,
//! yaws about world up and, when its switch key was just pressed, swaps which
//! of its two cameras is enabled.

use bevy_ecs::prelude::*;
use bevy_input::{keyboard::KeyCode, ButtonInput};
use bevy_math::Vec3;
use bevy_time::Time;
use bevy_transform::components::Transform;
use log::{debug, warn};

use crate::axis::AxisInput;
use crate::components::{CameraEnabled, CameraPair, VehicleController};
use crate::error::{CameraRole, ControlError};

/// Input sampled for one vehicle on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInput {
    /// Steering in `[-1, 1]`; positive turns right.
    pub horizontal: f32,
    /// Throttle in `[-1, 1]`; positive drives forward.
    pub forward: f32,
}

/// Reads the steering and throttle axes of `vehicle`.
///
/// # Errors
///
/// Returns [`ControlError::UnmappedAxis`] naming the first axis missing from
/// `axes`.
pub fn read_drive_input(
    axes: &AxisInput,
    vehicle: &VehicleController,
) -> Result<DriveInput, ControlError> {
    Ok(DriveInput {
        horizontal: axes.get(&vehicle.horizontal_axis())?,
        forward: axes.get(&vehicle.vertical_axis())?,
    })
}

/// Applies one tick of movement to `transform`.
///
/// Translation happens first, along the local forward axis (`+Z`), by
/// `speed * forward * dt`. The vehicle then yaws about world up by
/// `turn_speed * horizontal * dt` degrees, clockwise seen from above for
/// positive input.
///
/// # Examples
///
/// ```
/// use bevy_math::Vec3;
/// use bevy_transform::components::Transform;
/// use busride::vehicle::{drive_step, DriveInput};
/// use busride::VehicleController;
///
/// let mut transform = Transform::default();
/// let vehicle = VehicleController::default();
/// drive_step(&mut transform, &vehicle, DriveInput { horizontal: 0.0, forward: 1.0 }, 1.0);
/// assert!((transform.translation - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
/// ```
pub fn drive_step(
    transform: &mut Transform,
    vehicle: &VehicleController,
    input: DriveInput,
    dt: f32,
) {
    let distance = vehicle.speed * input.forward * dt;
    if distance != 0.0 {
        let forward = transform.rotation * Vec3::Z;
        transform.translation += forward * distance;
    }

    let yaw_degrees = vehicle.turn_speed * input.horizontal * dt;
    if yaw_degrees != 0.0 {
        transform.rotate_y(-yaw_degrees.to_radians());
    }
}

/// Flips both camera flags.
///
/// Only a consistent pair (exactly one enabled) stays consistent. An
/// inconsistent pair is reported and flipped anyway.
pub fn toggle_views(main: &mut CameraEnabled, hood: &mut CameraEnabled) {
    if main.0 == hood.0 {
        warn!(
            "camera pair inconsistent before toggle: main={}, hood={}",
            main.0, hood.0
        );
    }
    main.0 = !main.0;
    hood.0 = !hood.0;
}

fn switch_cameras(
    vehicle: Entity,
    pair: Option<&CameraPair>,
    cameras: &mut Query<&mut CameraEnabled>,
) -> Result<(), ControlError> {
    let missing = |role| ControlError::MissingCamera { vehicle, role };
    let refs = pair.copied().unwrap_or_default();
    let main = refs.main.ok_or_else(|| missing(CameraRole::Main))?;
    let hood = refs.hood.ok_or_else(|| missing(CameraRole::Hood))?;

    let mut main_flag = cameras
        .get(main)
        .copied()
        .map_err(|_| missing(CameraRole::Main))?;
    let mut hood_flag = cameras
        .get(hood)
        .copied()
        .map_err(|_| missing(CameraRole::Hood))?;
    toggle_views(&mut main_flag, &mut hood_flag);

    for (camera, flag, role) in [
        (main, main_flag, CameraRole::Main),
        (hood, hood_flag, CameraRole::Hood),
    ] {
        let mut enabled = cameras.get_mut(camera).map_err(|_| missing(role))?;
        *enabled = flag;
    }
    debug!(
        "vehicle {vehicle} switched cameras: main={}, hood={}",
        main_flag.0, hood_flag.0
    );
    Ok(())
}

/// Per-tick inputs shared by every vehicle.
struct DriveContext<'a> {
    axes: &'a AxisInput,
    keyboard: &'a ButtonInput<KeyCode>,
    dt: f32,
}

fn drive_vehicle(
    entity: Entity,
    vehicle: &VehicleController,
    pair: Option<&CameraPair>,
    transform: &mut Transform,
    ctx: &DriveContext<'_>,
    cameras: &mut Query<&mut CameraEnabled>,
) -> Result<(), ControlError> {
    let input = read_drive_input(ctx.axes, vehicle)?;
    drive_step(transform, vehicle, input, ctx.dt);

    if vehicle
        .switch_key
        .is_some_and(|key| ctx.keyboard.just_pressed(key))
    {
        switch_cameras(entity, pair, cameras)?;
    }
    Ok(())
}

/// Drives every [`VehicleController`] for one tick.
///
/// A vehicle whose axes are unmapped does not move this tick. A vehicle whose
/// switch key fires with a missing camera keeps the movement it already
/// applied. Other vehicles are unaffected either way; the first fault is
/// returned to Bevy's error handler after the pass.
///
/// # Errors
///
/// Returns the first [`ControlError`] raised by any vehicle.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn vehicle_drive_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    axes: Res<AxisInput>,
    mut vehicles: Query<(
        Entity,
        &VehicleController,
        Option<&CameraPair>,
        &mut Transform,
    )>,
    mut cameras: Query<&mut CameraEnabled>,
) -> bevy_ecs::error::Result {
    let ctx = DriveContext {
        axes: &axes,
        keyboard: &keyboard,
        dt: time.delta_secs(),
    };
    let mut first_fault = None;
    for (entity, vehicle, pair, mut transform) in &mut vehicles {
        let outcome = drive_vehicle(entity, vehicle, pair, &mut transform, &ctx, &mut cameras);
        if let Err(fault) = outcome {
            first_fault.get_or_insert(fault);
        }
    }
    match first_fault {
        Some(fault) => Err(fault.into()),
        None => Ok(()),
    }
}
