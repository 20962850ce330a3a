//! Named analog input axes.
//!
//! Vehicles read their steering and throttle from [`AxisInput`], a table of
//! named values in `[-1, 1]`. Keyboard-driven axes are described by
//! [`AxisBindings`] and refreshed every tick by [`keyboard_axis_system`];
//! anything else (gamepads, scripted input, tests) may write the table
//! directly with [`AxisInput::set`].

use bevy_ecs::prelude::*;
use bevy_input::{keyboard::KeyCode, ButtonInput};
use bevy_time::Time;
use hashbrown::HashMap;

use crate::constants::{AXIS_GRAVITY, AXIS_SENSITIVITY, HORIZONTAL_AXIS, VERTICAL_AXIS};
use crate::error::ControlError;

/// Current value of every known axis.
#[derive(Resource, Debug, Default, Clone)]
pub struct AxisInput {
    values: HashMap<String, f32>,
}

impl AxisInput {
    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::UnmappedAxis`] when nothing has ever written
    /// the axis.
    pub fn get(&self, name: &str) -> Result<f32, ControlError> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ControlError::UnmappedAxis {
                name: name.to_owned(),
            })
    }

    /// Writes `value` to `name`, clamped to `[-1, 1]`.
    ///
    /// Non-finite values are stored as zero.
    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        let clamped = if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.values.insert(name.into(), clamped);
    }

    /// Whether `name` has been written at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Keyboard description of one virtual axis.
///
/// Holding a `positive` key pushes the axis toward `+1`, a `negative` key
/// toward `-1`; holding both cancels out.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBinding {
    /// Keys that push the axis toward `-1`.
    pub negative: Vec<KeyCode>,
    /// Keys that push the axis toward `+1`.
    pub positive: Vec<KeyCode>,
    /// Units per second the axis moves toward a held direction.
    pub sensitivity: f32,
    /// Units per second the axis falls back to zero when released.
    pub gravity: f32,
    /// Jump to zero before moving when the held direction reverses.
    pub snap: bool,
}

impl AxisBinding {
    /// Binding with default response rates.
    #[must_use]
    pub const fn new(negative: Vec<KeyCode>, positive: Vec<KeyCode>) -> Self {
        Self {
            negative,
            positive,
            sensitivity: AXIS_SENSITIVITY,
            gravity: AXIS_GRAVITY,
            snap: true,
        }
    }

    /// Direction currently requested by the keyboard: `-1`, `0` or `1`.
    #[must_use]
    pub fn target(&self, keyboard: &ButtonInput<KeyCode>) -> f32 {
        /// Maps a negative/positive key pair to an axis value.
        const fn axis(neg: bool, pos: bool) -> f32 {
            match (neg, pos) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            }
        }

        axis(
            keyboard.any_pressed(self.negative.iter().copied()),
            keyboard.any_pressed(self.positive.iter().copied()),
        )
    }
}

/// Advances an axis value toward `target` over `dt` seconds.
///
/// Moves at `binding.sensitivity` while a direction is held and at
/// `binding.gravity` back to zero once released. The result never leaves
/// `[-1, 1]` and never overshoots the target.
///
/// # Examples
///
/// ```
/// use bevy_input::keyboard::KeyCode;
/// use busride::axis::{step_axis, AxisBinding};
///
/// let binding = AxisBinding::new(vec![KeyCode::KeyA], vec![KeyCode::KeyD]);
/// let value = step_axis(0.0, 1.0, &binding, 0.1);
/// assert!((value - 0.3).abs() < 1e-6);
/// ```
#[must_use]
pub fn step_axis(current: f32, target: f32, binding: &AxisBinding, dt: f32) -> f32 {
    let start = if binding.snap && current * target < 0.0 {
        0.0
    } else {
        current
    };
    let rate = if target == 0.0 {
        binding.gravity
    } else {
        binding.sensitivity
    };
    let max_step = (rate * dt.max(0.0)).max(0.0);
    let delta = (target - start).clamp(-max_step, max_step);
    (start + delta).clamp(-1.0, 1.0)
}

/// Keyboard bindings for every keyboard-driven axis.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AxisBindings(pub HashMap<String, AxisBinding>);

impl AxisBindings {
    /// No bindings at all; every axis must be written by the caller.
    #[must_use]
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Adds or replaces the binding for `name`.
    pub fn insert(&mut self, name: impl Into<String>, binding: AxisBinding) {
        self.0.insert(name.into(), binding);
    }
}

impl Default for AxisBindings {
    /// Single-player axes on WASD and the arrow keys, plus a WASD player `1`
    /// and an arrow-key player `2`.
    fn default() -> Self {
        let wasd_x = || AxisBinding::new(vec![KeyCode::KeyA], vec![KeyCode::KeyD]);
        let wasd_y = || AxisBinding::new(vec![KeyCode::KeyS], vec![KeyCode::KeyW]);
        let arrows_x = || AxisBinding::new(vec![KeyCode::ArrowLeft], vec![KeyCode::ArrowRight]);
        let arrows_y = || AxisBinding::new(vec![KeyCode::ArrowDown], vec![KeyCode::ArrowUp]);

        let mut bindings = Self::empty();
        bindings.insert(
            HORIZONTAL_AXIS,
            AxisBinding::new(
                vec![KeyCode::KeyA, KeyCode::ArrowLeft],
                vec![KeyCode::KeyD, KeyCode::ArrowRight],
            ),
        );
        bindings.insert(
            VERTICAL_AXIS,
            AxisBinding::new(
                vec![KeyCode::KeyS, KeyCode::ArrowDown],
                vec![KeyCode::KeyW, KeyCode::ArrowUp],
            ),
        );
        bindings.insert(format!("{HORIZONTAL_AXIS}1"), wasd_x());
        bindings.insert(format!("{VERTICAL_AXIS}1"), wasd_y());
        bindings.insert(format!("{HORIZONTAL_AXIS}2"), arrows_x());
        bindings.insert(format!("{VERTICAL_AXIS}2"), arrows_y());
        bindings
    }
}

/// Refreshes every keyboard-bound axis from the current key state.
///
/// Axes without a binding are left untouched.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn keyboard_axis_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    bindings: Res<AxisBindings>,
    mut axes: ResMut<AxisInput>,
) {
    let dt = time.delta_secs();
    for (name, binding) in &bindings.0 {
        let current = axes.values.get(name).copied().unwrap_or(0.0);
        let next = step_axis(current, binding.target(&keyboard), binding, dt);
        axes.set(name.as_str(), next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn binding() -> AxisBinding {
        AxisBinding::new(vec![KeyCode::KeyA], vec![KeyCode::KeyD])
    }

    #[test]
    fn unknown_axis_is_an_error() {
        let axes = AxisInput::default();
        assert_eq!(
            axes.get("Horizontal9"),
            Err(ControlError::UnmappedAxis {
                name: "Horizontal9".to_owned()
            })
        );
    }

    #[rstest]
    #[case::in_range(0.25, 0.25)]
    #[case::above(3.0, 1.0)]
    #[case::below(-2.0, -1.0)]
    #[case::nan(f32::NAN, 0.0)]
    fn set_clamps_values(#[case] input: f32, #[case] stored: f32) {
        let mut axes = AxisInput::default();
        axes.set("Vertical", input);
        assert_relative_eq!(axes.get("Vertical").unwrap_or(f32::MAX), stored);
    }

    #[rstest]
    #[case::nothing_held(false, false, 0.0)]
    #[case::negative(true, false, -1.0)]
    #[case::positive(false, true, 1.0)]
    #[case::both_cancel(true, true, 0.0)]
    fn target_follows_held_keys(#[case] neg: bool, #[case] pos: bool, #[case] expected: f32) {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        if neg {
            keyboard.press(KeyCode::KeyA);
        }
        if pos {
            keyboard.press(KeyCode::KeyD);
        }
        assert_relative_eq!(binding().target(&keyboard), expected);
    }

    #[test]
    fn held_axis_reaches_full_deflection_after_one_over_sensitivity() {
        let b = binding();
        let mut value = 0.0;
        for _ in 0..10 {
            value = step_axis(value, 1.0, &b, 1.0 / 30.0);
        }
        assert_relative_eq!(value, 1.0, epsilon = 1e-5);
        assert_relative_eq!(step_axis(value, 1.0, &b, 1.0), 1.0);
    }

    #[test]
    fn released_axis_decays_to_zero() {
        let b = binding();
        let half = step_axis(1.0, 0.0, &b, 1.0 / 6.0);
        assert_relative_eq!(half, 0.5, epsilon = 1e-5);
        assert_relative_eq!(step_axis(half, 0.0, &b, 1.0), 0.0);
    }

    #[rstest]
    #[case::snaps(true, -0.3)]
    #[case::glides(false, 0.5)]
    fn reversing_direction_honours_snap(#[case] snap: bool, #[case] expected: f32) {
        let b = AxisBinding { snap, ..binding() };
        assert_relative_eq!(step_axis(0.8, -1.0, &b, 0.1), expected, epsilon = 1e-5);
    }

    #[test]
    fn zero_delta_keeps_value() {
        assert_relative_eq!(step_axis(0.4, 1.0, &binding(), 0.0), 0.4);
    }

    #[test]
    fn default_bindings_cover_both_players() {
        let bindings = AxisBindings::default();
        for name in [
            "Horizontal",
            "Vertical",
            "Horizontal1",
            "Vertical1",
            "Horizontal2",
            "Vertical2",
        ] {
            assert!(bindings.0.contains_key(name), "missing binding {name}");
        }
    }
}
