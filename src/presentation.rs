//! Presentation layer plugin owning the rendered scene and its cameras.
//!
//! `PresentationPlugin` spawns the scene described by [`SceneSpec`] and keeps
//! Bevy's `Camera::is_active` in step with each camera's [`CameraEnabled`]
//! flag. It is a passive observer: the driving systems decide which camera
//! is enabled, this layer only renders that decision.
//!
//! With several vehicles the window is split into side-by-side columns, one
//! per vehicle, shared by that vehicle's main and hood cameras.

use bevy::camera::Viewport;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use log::info;

use crate::components::{CameraEnabled, CameraFollower, CameraPair};
use crate::config::SceneConfig;
use crate::plugin::DriveSet;

/// Scene to spawn at startup.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SceneSpec(pub SceneConfig);

/// Hood camera mount point relative to the vehicle.
const HOOD_MOUNT: Vec3 = Vec3::new(0.0, 1.6, 1.4);
/// Vehicle body size (width, height, length).
const BODY_SIZE: Vec3 = Vec3::new(2.0, 1.5, 5.0);

/// Column of the window a camera renders into.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSlot {
    /// Zero-based column, left to right.
    pub index: u32,
    /// Number of columns the window is split into.
    pub count: u32,
}

impl ScreenSlot {
    /// Viewport of this slot inside a window of `window` physical pixels.
    ///
    /// Returns `None` for a single slot so the camera keeps the whole window.
    /// The last column absorbs any remainder of the width.
    #[must_use]
    pub fn viewport(self, window: UVec2) -> Option<Viewport> {
        if self.count <= 1 {
            return None;
        }
        let width = (window.x / self.count).max(1);
        let x = width * self.index.min(self.count - 1);
        let last = self.index.saturating_add(1) >= self.count;
        let slot_width = if last {
            window.x.saturating_sub(x).max(1)
        } else {
            width
        };
        Some(Viewport {
            physical_position: UVec2::new(x, 0),
            physical_size: UVec2::new(slot_width, window.y.max(1)),
            ..default()
        })
    }
}

fn same_rect(current: Option<&Viewport>, wanted: Option<&Viewport>) -> bool {
    match (current, wanted) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.physical_position == b.physical_position && a.physical_size == b.physical_size
        }
        _ => false,
    }
}

/// Fits each slotted camera's viewport to the primary window.
pub fn layout_viewports_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&ScreenSlot, &mut Camera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.physical_size();
    for (slot, mut camera) in &mut cameras {
        let viewport = slot.viewport(size);
        if !same_rect(camera.viewport.as_ref(), viewport.as_ref()) {
            camera.viewport = viewport;
        }
    }
}

/// Mirrors every [`CameraEnabled`] flag into `Camera::is_active`.
pub fn sync_camera_activity_system(
    mut cameras: Query<(&CameraEnabled, &mut Camera), Changed<CameraEnabled>>,
) {
    for (enabled, mut camera) in &mut cameras {
        camera.is_active = enabled.0;
    }
}

/// Spawns the ground, lights, and each configured vehicle with its cameras.
///
/// Every vehicle gets a follow camera, enabled, and a hood camera parented
/// to the vehicle, disabled, so each pair starts with exactly one camera
/// active. Both cameras of a vehicle share its [`ScreenSlot`].
///
/// # Errors
///
/// Returns a [`ConfigError`](crate::ConfigError) if a vehicle's switch key
/// is unknown.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_scene_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<SceneSpec>,
) -> Result {
    let offset = scene.0.follow_offset();

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(400.0, 400.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Name::new("Ground"),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, -4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let count = u32::try_from(scene.0.vehicles.len()).unwrap_or(u32::MAX);
    let body = meshes.add(Cuboid::new(BODY_SIZE.x, BODY_SIZE.y, BODY_SIZE.z));
    let paint = materials.add(Color::srgb(0.95, 0.75, 0.1));

    for (index, vehicle) in scene.0.vehicles.iter().enumerate() {
        let controller = vehicle.controller()?;
        let position = vehicle.spawn_position();
        let order = isize::try_from(index * 2).unwrap_or(isize::MAX - 1);
        let label = controller.input_id.clone();
        let slot = ScreenSlot {
            index: u32::try_from(index).unwrap_or(u32::MAX),
            count,
        };

        let vehicle_entity = commands
            .spawn((
                Mesh3d(body.clone()),
                MeshMaterial3d(paint.clone()),
                Transform::from_translation(position + Vec3::Y * BODY_SIZE.y / 2.0),
                controller,
                Name::new(format!("Vehicle{label}")),
            ))
            .id();

        let main = commands
            .spawn((
                Camera3d::default(),
                Camera {
                    is_active: true,
                    order,
                    ..default()
                },
                Tonemapping::None,
                slot,
                CameraEnabled(true),
                CameraFollower {
                    target: Some(vehicle_entity),
                    offset,
                },
                Transform::from_translation(position + offset).looking_at(position, Vec3::Y),
                Name::new(format!("MainCamera{label}")),
            ))
            .id();

        let hood = commands
            .spawn((
                Camera3d::default(),
                Camera {
                    is_active: false,
                    order: order + 1,
                    ..default()
                },
                Tonemapping::None,
                slot,
                CameraEnabled(false),
                Transform::from_translation(HOOD_MOUNT).looking_to(Vec3::Z, Vec3::Y),
                ChildOf(vehicle_entity),
                Name::new(format!("HoodCamera{label}")),
            ))
            .id();

        commands.entity(vehicle_entity).insert(CameraPair {
            main: Some(main),
            hood: Some(hood),
        });
        info!("spawned vehicle {vehicle_entity} reading axes with suffix {label:?}");
    }
    Ok(())
}

/// Plugin owning scene spawning and camera presentation.
///
/// Expects [`DrivePlugin`](crate::DrivePlugin) to be installed alongside it.
/// Uses [`SceneSpec`] if the host inserted one, otherwise the default scene.
#[derive(Debug)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSpec>();
        app.add_systems(Startup, spawn_scene_system);
        app.add_systems(
            Update,
            (
                sync_camera_activity_system.after(DriveSet::Drive),
                layout_viewports_system,
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleConfig;
    use rstest::rstest;

    fn columns(viewport: &Viewport) -> (u32, u32) {
        let start = viewport.physical_position.x;
        (start, start + viewport.physical_size.x)
    }

    #[test]
    fn camera_activity_follows_enabled_flag() {
        let mut app = App::new();
        app.add_systems(Update, sync_camera_activity_system);
        let camera = app
            .world_mut()
            .spawn((Camera::default(), CameraEnabled(false)))
            .id();

        app.update();
        let before = app.world().get::<Camera>(camera).map(|c| c.is_active);
        assert_eq!(before, Some(false));

        if let Some(mut flag) = app.world_mut().get_mut::<CameraEnabled>(camera) {
            flag.0 = true;
        }
        app.update();
        let after = app.world().get::<Camera>(camera).map(|c| c.is_active);
        assert_eq!(after, Some(true));
    }

    #[test]
    fn default_scene_spec_has_one_vehicle() {
        assert_eq!(SceneSpec::default().0.vehicles.len(), 1);
    }

    #[rstest]
    #[case::even(1280)]
    #[case::odd(1281)]
    fn two_slots_split_the_window_without_overlap(#[case] width: u32) {
        let window = UVec2::new(width, 720);
        let left = ScreenSlot { index: 0, count: 2 }.viewport(window);
        let right = ScreenSlot { index: 1, count: 2 }.viewport(window);
        let (Some(left), Some(right)) = (left, right) else {
            panic!("split slots must have viewports");
        };
        assert_eq!(columns(&left), (0, width / 2));
        assert_eq!(columns(&right), (width / 2, width));
        assert_eq!(left.physical_size.y, 720);
    }

    #[rstest]
    fn single_slot_keeps_the_whole_window() {
        let slot = ScreenSlot { index: 0, count: 1 };
        assert!(slot.viewport(UVec2::new(800, 600)).is_none());
    }

    #[rstest]
    fn each_vehicle_renders_to_its_own_column() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>();
        let scene = SceneConfig {
            vehicles: vec![
                VehicleConfig {
                    input_id: "1".to_owned(),
                    ..Default::default()
                },
                VehicleConfig {
                    input_id: "2".to_owned(),
                    position: [10.0, 0.0, 0.0],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        app.insert_resource(SceneSpec(scene));
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app.add_systems(Startup, spawn_scene_system);
        app.add_systems(Update, layout_viewports_system);
        app.update();

        let mut by_slot: Vec<(u32, (u32, u32))> = app
            .world_mut()
            .query::<(&ScreenSlot, &Camera)>()
            .iter(app.world())
            .map(|(slot, camera)| {
                let viewport = camera
                    .viewport
                    .as_ref()
                    .unwrap_or_else(|| panic!("split camera has no viewport"));
                (slot.index, columns(viewport))
            })
            .collect();
        by_slot.sort_unstable();

        assert_eq!(by_slot.len(), 4, "two cameras per vehicle");
        let [(0, first_main), (0, first_hood), (1, second_main), (1, second_hood)] =
            by_slot.as_slice()
        else {
            panic!("unexpected slots: {by_slot:?}");
        };
        assert_eq!(first_main, first_hood);
        assert_eq!(second_main, second_hood);
        assert!(first_main.1 <= second_main.0, "columns overlap: {by_slot:?}");
    }
}
