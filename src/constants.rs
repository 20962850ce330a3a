//! Tuning constants shared by the driving and camera systems.

use bevy_math::Vec3;

/// Offset from the followed target to the third-person camera.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(0.0, 5.0, -7.0);

/// Default forward speed of a vehicle in world units per second.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default yaw rate in degrees per second at full deflection.
///
/// Zero on purpose: a vehicle only turns once a turn speed is configured.
pub const DEFAULT_TURN_SPEED: f32 = 0.0;

/// Prefix of the steering axis name; the vehicle's input id is appended.
pub const HORIZONTAL_AXIS: &str = "Horizontal";
/// Prefix of the throttle axis name; the vehicle's input id is appended.
pub const VERTICAL_AXIS: &str = "Vertical";

/// Rate at which a keyboard axis moves toward a held direction (units/s).
pub const AXIS_SENSITIVITY: f32 = 3.0;
/// Rate at which a keyboard axis falls back to zero once released (units/s).
pub const AXIS_GRAVITY: f32 = 3.0;
