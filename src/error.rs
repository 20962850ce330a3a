//! Error types for the driving systems and scene configuration.

use std::path::PathBuf;

use bevy_ecs::entity::Entity;
use thiserror::Error;

/// Which camera of a [`CameraPair`](crate::components::CameraPair) a fault
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRole {
    /// The third-person camera.
    Main,
    /// The camera mounted on the vehicle's hood.
    Hood,
}

impl std::fmt::Display for CameraRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Hood => f.write_str("hood"),
        }
    }
}

/// Faults raised while updating a follower or a vehicle.
///
/// These mirror unset references in the scene. They are never papered over
/// with defaults: the affected entity skips the rest of its tick and the
/// error is handed to Bevy's error handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    /// The follower has no target, or its target has no transform.
    #[error("camera follower {follower} has no target to follow")]
    MissingTarget {
        /// The follower entity.
        follower: Entity,
    },
    /// No axis with this name is known to the input table.
    #[error("input axis `{name}` is not mapped")]
    UnmappedAxis {
        /// Full axis name including the input id suffix.
        name: String,
    },
    /// The vehicle's camera reference is unset or points at an entity
    /// without a [`CameraEnabled`](crate::components::CameraEnabled) flag.
    #[error("vehicle {vehicle} has no {role} camera")]
    MissingCamera {
        /// The vehicle entity.
        vehicle: Entity,
        /// Which camera is missing.
        role: CameraRole,
    },
}

/// Failures while loading a scene description.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read scene config {path}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid scene JSON.
    #[error("invalid scene config")]
    Parse(#[from] serde_json::Error),
    /// A key binding names a key this crate does not know.
    #[error("unknown key name `{0}`")]
    UnknownKey(String),
}
