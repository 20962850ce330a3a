//! Bevy plugin wiring the driving and follow systems into the schedule.

use bevy::prelude::*;
use bevy_input::InputPlugin;
use bevy_transform::TransformSystems;

use crate::axis::{keyboard_axis_system, AxisBindings, AxisInput};
use crate::components::{CameraEnabled, CameraFollower, CameraPair, VehicleController};
use crate::follow::camera_follow_system;
use crate::vehicle::vehicle_drive_system;

/// Ordering of the per-tick driving work inside `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveSet {
    /// Axis values are refreshed from the keyboard.
    ReadInput,
    /// Vehicles move and switch cameras.
    Drive,
}

/// Plugin installing vehicle driving, camera switching and camera follow.
///
/// # Responsibilities
///
/// - Initialises [`AxisInput`] and [`AxisBindings`] unless the host inserted
///   them first.
/// - Installs Bevy's `InputPlugin` if it is missing. It owns
///   `ButtonInput<KeyCode>` and clears press edges at the start of each
///   frame, which keeps the camera switch to one toggle per press. Add
///   `DefaultPlugins` before this plugin so it is not installed twice.
/// - Runs [`keyboard_axis_system`] then [`vehicle_drive_system`] in `Update`.
/// - Runs [`camera_follow_system`] in `PostUpdate`, before transform
///   propagation, so cameras track the pose driven earlier in the frame.
///
/// Faults from the systems go to Bevy's error handler. The default handler
/// panics; install another with `App::set_error_handler` to keep running.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use busride::DrivePlugin;
///
/// let mut app = App::new();
/// app.add_plugins(MinimalPlugins).add_plugins(DrivePlugin);
/// app.update();
/// ```
#[derive(Debug, Default)]
pub struct DrivePlugin;

impl Plugin for DrivePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraFollower>()
            .register_type::<VehicleController>()
            .register_type::<CameraPair>()
            .register_type::<CameraEnabled>();

        app.init_resource::<AxisInput>();
        app.init_resource::<AxisBindings>();
        if !app.is_plugin_added::<InputPlugin>() {
            app.add_plugins(InputPlugin);
        }

        app.configure_sets(Update, (DriveSet::ReadInput, DriveSet::Drive).chain());
        app.add_systems(Update, keyboard_axis_system.in_set(DriveSet::ReadInput));
        app.add_systems(Update, vehicle_drive_system.in_set(DriveSet::Drive));
        app.add_systems(
            PostUpdate,
            camera_follow_system.before(TransformSystems::Propagate),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_input::{keyboard::KeyCode, ButtonInput};
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DrivePlugin);
        assert!(app.world().contains_resource::<AxisInput>());
        assert!(app.world().contains_resource::<AxisBindings>());
        assert!(app.world().contains_resource::<ButtonInput<KeyCode>>());
        app.update();
        let axes = app.world().resource::<AxisInput>();
        assert!(axes.contains("Horizontal1"), "bound axes are written on tick");
    }

    #[rstest]
    fn plugin_keeps_host_bindings() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(AxisBindings::empty());
        app.add_plugins(DrivePlugin);
        app.update();
        assert!(!app.world().resource::<AxisInput>().contains("Horizontal"));
    }

    #[rstest]
    fn press_edges_last_one_frame() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DrivePlugin);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyC);
        app.update();
        let keyboard = app.world().resource::<ButtonInput<KeyCode>>();
        assert!(!keyboard.just_pressed(KeyCode::KeyC));
    }
}
