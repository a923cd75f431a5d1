//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec3` inputs, making them straightforward to unit-test.

use bevy::prelude::{Quat, Transform, Vec2, Vec3};

/// Maps a noise value from the standard `[-1, 1]` range into `[min, max]`.
///
/// Noise generators (e.g. `Fbm<Perlin>`) produce values centred around zero.
/// This linearly rescales to an arbitrary output range.
///
/// # Examples
/// ```
/// # use hex_map_editor::math::map_noise_to_range;
/// assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
/// assert_eq!(map_noise_to_range( 1.0, 0.0, 10.0), 10.0);
/// assert_eq!(map_noise_to_range( 0.0, 2.0, 6.0),  4.0);
/// ```
pub fn map_noise_to_range(noise_val: f64, min: f32, max: f32) -> f32 {
    min + ((noise_val as f32 + 1.0) / 2.0) * (max - min)
}

/// Intersects a ray with the horizontal plane at `plane_y`.
///
/// Returns `None` when the ray runs parallel to the plane or the plane lies
/// behind the ray origin. Used to resolve the cursor ray against the ground
/// and against a picked cell's surface height.
pub fn ray_plane_y(origin: Vec3, direction: Vec3, plane_y: f32) -> Option<Vec3> {
    if direction.y.abs() < 1e-6 {
        return None;
    }
    let t = (plane_y - origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// World-space height of a cell's top face.
///
/// `base` keeps elevation-0 cells visible as thin slabs rather than
/// degenerate geometry.
pub fn surface_height(elevation: i32, step: f32, base: f32) -> f32 {
    elevation as f32 * step + base
}

/// Transform for a cell's column mesh.
///
/// The shared mesh is a unit hexagonal prism centred at the origin, so the
/// column is scaled to `surface` vertically and lifted by half its height,
/// with the prism corners rotated onto the pointy-top corner angles.
pub fn column_transform(center: Vec2, surface: f32, radius: f32) -> Transform {
    Transform {
        translation: Vec3::new(center.x, surface / 2.0, center.y),
        rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_6),
        scale: Vec3::new(radius, surface, radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── map_noise_to_range ──────────────────────────────────────────

    #[test]
    fn noise_min_maps_to_range_min() {
        assert_eq!(map_noise_to_range(-1.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn noise_max_maps_to_range_max() {
        assert_eq!(map_noise_to_range(1.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn noise_zero_maps_to_midpoint() {
        let result = map_noise_to_range(0.0, 2.0, 6.0);
        assert!((result - 4.0).abs() < 1e-6);
    }

    // ── ray_plane_y ─────────────────────────────────────────────────

    #[test]
    fn straight_down_hits_directly_below() {
        let hit = ray_plane_y(Vec3::new(3.0, 10.0, -2.0), Vec3::NEG_Y, 0.0).unwrap();
        assert!((hit - Vec3::new(3.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn oblique_ray_lands_on_the_plane() {
        let hit = ray_plane_y(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0).unwrap();
        assert!((hit - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn elevated_plane_shortens_the_ray() {
        let hit = ray_plane_y(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 2.0).unwrap();
        assert!((hit - Vec3::new(2.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn parallel_ray_misses() {
        assert!(ray_plane_y(Vec3::new(0.0, 5.0, 0.0), Vec3::X, 0.0).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        assert!(ray_plane_y(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, 0.0).is_none());
    }

    // ── surface_height ──────────────────────────────────────────────

    #[test]
    fn zero_elevation_keeps_the_base_slab() {
        assert_eq!(surface_height(0, 1.5, 0.2), 0.2);
    }

    #[test]
    fn elevation_steps_stack_on_the_base() {
        assert_eq!(surface_height(4, 1.5, 0.2), 6.2);
    }

    // ── column_transform ────────────────────────────────────────────

    #[test]
    fn column_is_lifted_by_half_its_height() {
        let tf = column_transform(Vec2::new(1.0, -2.0), 6.0, 3.5);
        assert!((tf.translation - Vec3::new(1.0, 3.0, -2.0)).length() < 1e-6);
        assert!((tf.scale - Vec3::new(3.5, 6.0, 3.5)).length() < 1e-6);
    }
}
