//! Third-person camera follow.

use bevy_ecs::prelude::*;
use bevy_math::Vec3;
use bevy_transform::components::Transform;

use crate::components::CameraFollower;
use crate::error::ControlError;

/// Position of a follower tracking `target` at `offset`.
///
/// # Examples
///
/// ```
/// use bevy_math::Vec3;
/// use busride::follow::follow_position;
///
/// let pos = follow_position(Vec3::ZERO, Vec3::new(0.0, 5.0, -7.0));
/// assert_eq!(pos, Vec3::new(0.0, 5.0, -7.0));
/// ```
#[must_use]
pub fn follow_position(target: Vec3, offset: Vec3) -> Vec3 {
    target + offset
}

/// Moves every [`CameraFollower`] to its target's position plus offset.
///
/// Scheduled in `PostUpdate` so it observes the poses written by the driving
/// systems in the same frame. Targets are expected to be root entities, so
/// their local translation is their world position.
///
/// A follower with no target, or whose target has no `Transform` (another
/// follower does not count as a target), is left where it is for this tick.
/// The first such fault is returned to Bevy's error handler once every
/// follower has been processed.
///
/// # Errors
///
/// Returns [`ControlError::MissingTarget`] for the first broken follower.
pub fn camera_follow_system(
    mut followers: Query<(Entity, &CameraFollower, &mut Transform)>,
    targets: Query<&Transform, Without<CameraFollower>>,
) -> bevy_ecs::error::Result {
    let mut first_fault = None;
    for (entity, follower, mut transform) in &mut followers {
        let target = follower
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|target_transform| target_transform.translation);
        match target {
            Some(position) => {
                transform.translation = follow_position(position, follower.offset);
            }
            None => {
                first_fault.get_or_insert(ControlError::MissingTarget { follower: entity });
            }
        }
    }
    match first_fault {
        Some(fault) => Err(fault.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::origin(Vec3::ZERO, Vec3::new(0.0, 5.0, -7.0))]
    #[case::moved_target(Vec3::new(3.0, -1.0, 12.5), Vec3::new(3.0, 4.0, 5.5))]
    #[case::negative(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(-10.0, 5.0, -17.0))]
    fn follower_sits_at_target_plus_offset(#[case] target: Vec3, #[case] expected: Vec3) {
        let pos = follow_position(target, Vec3::new(0.0, 5.0, -7.0));
        assert!(
            (pos - expected).length() < 1e-5,
            "expected {expected:?}, got {pos:?}"
        );
    }

    #[test]
    fn zero_offset_lands_on_target() {
        let target = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(follow_position(target, Vec3::ZERO), target);
    }
}
