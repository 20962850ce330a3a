//! Scene description loaded at startup.
//!
//! A scene lists the vehicles to spawn, the follow-camera offset and any
//! keyboard axis bindings that replace the defaults. Every field is optional.
//!
//! ```json
//! {
//!   "camera_offset": [0.0, 5.0, -7.0],
//!   "vehicles": [
//!     { "input_id": "1", "speed": 5.0, "turn_speed": 45.0, "switch_key": "KeyC" }
//!   ],
//!   "bindings": {
//!     "Horizontal1": { "negative": ["KeyA"], "positive": ["KeyD"] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bevy_input::keyboard::KeyCode;
use bevy_math::Vec3;
use log::debug;
use serde::Deserialize;

use crate::axis::{AxisBinding, AxisBindings};
use crate::components::VehicleController;
use crate::constants::{
    AXIS_GRAVITY, AXIS_SENSITIVITY, DEFAULT_SPEED, DEFAULT_TURN_SPEED, FOLLOW_OFFSET,
};
use crate::error::ConfigError;
use crate::macros::key_table;

const KEY_NAMES: &[(&str, KeyCode)] = key_table![
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
    KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4, Numpad5, Numpad6, Numpad7, Numpad8,
    Numpad9, ArrowUp, ArrowDown, ArrowLeft, ArrowRight, Space, Tab, Enter, Escape,
    Backspace, ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
];

/// Resolves a Bevy `KeyCode` variant name such as `"KeyC"` or `"ArrowUp"`.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] for names outside the supported set.
///
/// # Examples
///
/// ```
/// use bevy_input::keyboard::KeyCode;
/// use busride::config::parse_key_code;
///
/// assert_eq!(parse_key_code("Space").ok(), Some(KeyCode::Space));
/// assert!(parse_key_code("Hyper").is_err());
/// ```
pub fn parse_key_code(name: &str) -> Result<KeyCode, ConfigError> {
    KEY_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, key)| *key)
        .ok_or_else(|| ConfigError::UnknownKey(name.to_owned()))
}

fn parse_keys(names: &[String]) -> Result<Vec<KeyCode>, ConfigError> {
    names.iter().map(|name| parse_key_code(name)).collect()
}

/// One vehicle in the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    /// Suffix for the vehicle's axis names.
    pub input_id: String,
    /// Forward speed in units per second.
    pub speed: f32,
    /// Yaw rate in degrees per second.
    pub turn_speed: f32,
    /// Camera switch key name, if any.
    pub switch_key: Option<String>,
    /// Spawn position.
    pub position: [f32; 3],
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            input_id: String::new(),
            speed: DEFAULT_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            switch_key: None,
            position: [0.0; 3],
        }
    }
}

impl VehicleConfig {
    /// Builds the controller component for this vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if `switch_key` is not a known key.
    pub fn controller(&self) -> Result<VehicleController, ConfigError> {
        Ok(VehicleController {
            input_id: self.input_id.clone(),
            speed: self.speed,
            turn_speed: self.turn_speed,
            switch_key: self.switch_key.as_deref().map(parse_key_code).transpose()?,
        })
    }

    /// Spawn position as a vector.
    #[must_use]
    pub const fn spawn_position(&self) -> Vec3 {
        let [x, y, z] = self.position;
        Vec3::new(x, y, z)
    }
}

/// Keyboard binding for one axis as written in the scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindingConfig {
    /// Key names pushing toward `-1`.
    pub negative: Vec<String>,
    /// Key names pushing toward `+1`.
    pub positive: Vec<String>,
    /// Units per second toward a held direction.
    pub sensitivity: f32,
    /// Units per second back to zero.
    pub gravity: f32,
    /// Jump to zero on reversal.
    pub snap: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            negative: Vec::new(),
            positive: Vec::new(),
            sensitivity: AXIS_SENSITIVITY,
            gravity: AXIS_GRAVITY,
            snap: true,
        }
    }
}

impl TryFrom<&BindingConfig> for AxisBinding {
    type Error = ConfigError;

    fn try_from(config: &BindingConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            negative: parse_keys(&config.negative)?,
            positive: parse_keys(&config.positive)?,
            sensitivity: config.sensitivity,
            gravity: config.gravity,
            snap: config.snap,
        })
    }
}

/// Whole scene description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Offset of each vehicle's follow camera.
    pub camera_offset: [f32; 3],
    /// Vehicles to spawn.
    pub vehicles: Vec<VehicleConfig>,
    /// Axis bindings layered over the defaults.
    pub bindings: BTreeMap<String, BindingConfig>,
}

impl Default for SceneConfig {
    /// One vehicle on the single-player axes, steering at 45 degrees per
    /// second and switching cameras with `C`.
    fn default() -> Self {
        Self {
            camera_offset: FOLLOW_OFFSET.to_array(),
            vehicles: vec![VehicleConfig {
                turn_speed: 45.0,
                switch_key: Some("KeyC".to_owned()),
                ..VehicleConfig::default()
            }],
            bindings: BTreeMap::new(),
        }
    }
}

impl SceneConfig {
    /// Parses a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a scene file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid scene.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json_str(&text)?;
        debug!(
            "loaded scene {} with {} vehicle(s)",
            path.display(),
            scene.vehicles.len()
        );
        Ok(scene)
    }

    /// Follow-camera offset as a vector.
    #[must_use]
    pub const fn follow_offset(&self) -> Vec3 {
        let [x, y, z] = self.camera_offset;
        Vec3::new(x, y, z)
    }

    /// Default bindings with this scene's bindings layered on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for any unknown key name.
    pub fn axis_bindings(&self) -> Result<AxisBindings, ConfigError> {
        let mut bindings = AxisBindings::default();
        for (name, binding) in &self.bindings {
            bindings.insert(name.clone(), AxisBinding::try_from(binding)?);
        }
        Ok(bindings)
    }

    /// Checks every key name in the scene.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::UnknownKey`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for vehicle in &self.vehicles {
            vehicle.controller()?;
        }
        self.axis_bindings().map(|_| ())
    }
}
