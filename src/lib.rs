#![cfg_attr(docsrs, feature(doc_cfg))]
//! Third-person vehicle driving for Bevy.
//!
//! Vehicles read two named input axes, drive along their own forward axis,
//! yaw about world up and switch between a follow camera and a hood camera.
//! Follow cameras trail their target at a fixed offset.
pub mod axis;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod follow;
pub mod logging;
mod macros;
pub mod plugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod presentation;
pub mod vehicle;
pub use constants::*;

// Re-export commonly used items
pub use axis::{keyboard_axis_system, step_axis, AxisBinding, AxisBindings, AxisInput};
pub use components::{CameraEnabled, CameraFollower, CameraPair, VehicleController};
pub use config::{parse_key_code, SceneConfig, VehicleConfig};
pub use error::{CameraRole, ConfigError, ControlError};
pub use follow::{camera_follow_system, follow_position};
pub use logging::{init as init_logging, log_system_error};
pub use plugin::{DrivePlugin, DriveSet};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use presentation::{PresentationPlugin, SceneSpec, ScreenSlot};
pub use vehicle::{drive_step, read_drive_input, toggle_views, vehicle_drive_system, DriveInput};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use busride::prelude::*;
    //! ```

    pub use crate::AxisInput;
    pub use crate::CameraEnabled;
    pub use crate::CameraFollower;
    pub use crate::CameraPair;
    pub use crate::DrivePlugin;
    pub use crate::VehicleController;
}
