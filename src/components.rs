//! ECS components attached to vehicles and cameras.
//! Configuration lives on the components; per-tick input does not.
use bevy_ecs::prelude::*;
use bevy_input::keyboard::KeyCode;
use bevy_math::Vec3;
use bevy_reflect::prelude::*;

use crate::constants::{DEFAULT_SPEED, DEFAULT_TURN_SPEED, FOLLOW_OFFSET};

/// Keeps an entity at a fixed offset from a target entity.
///
/// The follower's translation is rewritten every late tick as
/// `target.translation + offset`. Its rotation is left alone, so a camera
/// keeps whatever orientation it was spawned with.
///
/// `target` must be set before the first tick; an unset target is reported
/// as [`ControlError::MissingTarget`](crate::ControlError::MissingTarget).
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct CameraFollower {
    /// Entity whose position is tracked.
    pub target: Option<Entity>,
    /// Constant offset from the target.
    pub offset: Vec3,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self {
            target: None,
            offset: FOLLOW_OFFSET,
        }
    }
}

impl CameraFollower {
    /// Follows `target` at the default offset.
    #[must_use]
    pub const fn tracking(target: Entity) -> Self {
        Self {
            target: Some(target),
            offset: FOLLOW_OFFSET,
        }
    }
}

/// Drives an entity from two input axes and owns its camera-switch key.
///
/// The axes read are `"Horizontal" + input_id` and `"Vertical" + input_id`,
/// which lets several local players share one axis table.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component, Default)]
pub struct VehicleController {
    /// Suffix appended to the axis names.
    pub input_id: String,
    /// Forward speed in world units per second at full throttle.
    pub speed: f32,
    /// Yaw rate in degrees per second at full steering deflection.
    pub turn_speed: f32,
    /// Key that swaps the main and hood cameras. `None` never fires.
    pub switch_key: Option<KeyCode>,
}

impl Default for VehicleController {
    fn default() -> Self {
        Self {
            input_id: String::new(),
            speed: DEFAULT_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            switch_key: None,
        }
    }
}

impl VehicleController {
    /// Name of the steering axis read by this vehicle.
    #[must_use]
    pub fn horizontal_axis(&self) -> String {
        format!("{}{}", crate::constants::HORIZONTAL_AXIS, self.input_id)
    }

    /// Name of the throttle axis read by this vehicle.
    #[must_use]
    pub fn vertical_axis(&self) -> String {
        format!("{}{}", crate::constants::VERTICAL_AXIS, self.input_id)
    }
}

/// The two cameras a vehicle switches between.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct CameraPair {
    /// Third-person camera.
    pub main: Option<Entity>,
    /// Hood-mounted camera.
    pub hood: Option<Entity>,
}

/// Whether a camera is currently rendering.
///
/// With the `render` feature this flag is mirrored into Bevy's
/// `Camera::is_active` every frame.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct CameraEnabled(pub bool);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn follower_defaults_to_third_person_offset() {
        let follower = CameraFollower::default();
        assert_eq!(follower.target, None);
        assert_eq!(follower.offset, Vec3::new(0.0, 5.0, -7.0));
    }

    #[test]
    fn vehicle_defaults_do_not_turn() {
        let vehicle = VehicleController::default();
        assert!((vehicle.speed - 5.0).abs() < f32::EPSILON);
        assert!(vehicle.turn_speed.abs() < f32::EPSILON);
        assert_eq!(vehicle.switch_key, None);
    }

    #[rstest]
    #[case::single_player("", "Horizontal", "Vertical")]
    #[case::player_one("1", "Horizontal1", "Vertical1")]
    #[case::player_two("2", "Horizontal2", "Vertical2")]
    fn axis_names_carry_input_id(
        #[case] input_id: &str,
        #[case] horizontal: &str,
        #[case] vertical: &str,
    ) {
        let vehicle = VehicleController {
            input_id: input_id.to_owned(),
            ..Default::default()
        };
        assert_eq!(vehicle.horizontal_axis(), horizontal);
        assert_eq!(vehicle.vertical_axis(), vertical);
    }
}
