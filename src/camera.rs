//! Editor camera: an angled top-down rig with keyboard pan, yaw orbit, and
//! scroll zoom. The cursor stays visible and free for painting.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::view::Hdr;

use crate::math;

/// Configuration for the editor camera.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CameraConfig {
    /// Pan speed in world-units per second.
    pub pan_speed: f32,
    /// Yaw orbit speed in radians per second (Q/E).
    pub orbit_speed: f32,
    /// Zoom step in world-units per scroll line.
    pub zoom_speed: f32,
    /// Closest allowed camera height.
    pub min_height: f32,
    /// Farthest allowed camera height.
    pub max_height: f32,
    /// Initial camera height.
    pub spawn_height: f32,
    /// Downward pitch of the rig in radians.
    pub pitch: f32,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 18.0,
            orbit_speed: 1.5,
            zoom_speed: 2.0,
            min_height: 6.0,
            max_height: 60.0,
            spawn_height: 28.0,
            pitch: 0.9,
            bloom_intensity: 0.15,
        }
    }
}

/// Marker component for the editor camera entity.
#[derive(Component, Reflect)]
pub struct EditorCamera;

/// Editor camera plugin.
pub struct CameraPlugin(pub CameraConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EditorCamera>()
            .register_type::<CameraConfig>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, move_camera);
    }
}

/// Spawns the Camera3d entity with HDR, tonemapping, and bloom, aimed at the
/// map origin from the configured pitch.
fn spawn_camera(mut commands: Commands, cfg: Res<CameraConfig>) {
    let standoff = cfg.spawn_height / cfg.pitch.tan();
    commands.spawn((
        Name::new("EditorCamera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Transform::from_xyz(0.0, cfg.spawn_height, standoff).looking_at(Vec3::ZERO, Vec3::Y),
        EditorCamera,
    ));
}

/// WASD pan in the ground plane, Q/E yaw orbit around the ground focus,
/// scroll zoom along the view direction within the height band.
fn move_camera(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut scroll: MessageReader<MouseWheel>,
    cfg: Res<CameraConfig>,
    mut query: Query<&mut Transform, With<EditorCamera>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    // WASD movement in the camera's forward/right plane (XZ only)
    let forward = transform.forward();
    let forward_xz = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right = transform.right();
    let right_xz = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

    let mut direction = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        direction += forward_xz;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction -= forward_xz;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction += right_xz;
    }
    if keys.pressed(KeyCode::KeyA) {
        direction -= right_xz;
    }
    if direction != Vec3::ZERO {
        transform.translation += direction.normalize() * cfg.pan_speed * time.delta_secs();
    }

    // Q/E orbit around the point the camera looks at on the ground
    let mut yaw = 0.0;
    if keys.pressed(KeyCode::KeyQ) {
        yaw += cfg.orbit_speed * time.delta_secs();
    }
    if keys.pressed(KeyCode::KeyE) {
        yaw -= cfg.orbit_speed * time.delta_secs();
    }
    if yaw != 0.0
        && let Some(focus) = math::ray_plane_y(transform.translation, *transform.forward(), 0.0)
    {
        transform.rotate_around(focus, Quat::from_rotation_y(yaw));
    }

    // Scroll zoom along the view direction, clamped to the height band
    let mut lines = 0.0;
    for ev in scroll.read() {
        lines += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        };
    }
    if lines != 0.0 {
        let next = transform.translation + *transform.forward() * lines * cfg.zoom_speed;
        if (cfg.min_height..=cfg.max_height).contains(&next.y) {
            transform.translation = next;
        }
    }
}
