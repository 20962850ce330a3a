//! Keyboard and axis helpers.
//!
//! Keys are fed in as `KeyboardInput` messages, the way a window backend
//! delivers them, so Bevy's input systems set and clear press edges on the
//! next [`App::update`].

use bevy::prelude::*;
use bevy_input::keyboard::{Key, KeyCode, KeyboardInput, NativeKey};
use bevy_input::ButtonState;
use busride::AxisInput;

fn key_message(app: &mut App, key_code: KeyCode, state: ButtonState) {
    app.world_mut().write_message(KeyboardInput {
        key_code,
        logical_key: Key::Unidentified(NativeKey::Unidentified),
        state,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}

/// Presses `key`. The key stays held until [`release`] is called.
pub fn press(app: &mut App, key: KeyCode) {
    key_message(app, key, ButtonState::Pressed);
}

/// Releases `key`.
pub fn release(app: &mut App, key: KeyCode) {
    key_message(app, key, ButtonState::Released);
}

/// Writes both axes of player `input_id`.
pub fn set_axes(app: &mut App, input_id: &str, horizontal: f32, vertical: f32) {
    let mut axes = app.world_mut().resource_mut::<AxisInput>();
    axes.set(format!("Horizontal{input_id}"), horizontal);
    axes.set(format!("Vertical{input_id}"), vertical);
}
