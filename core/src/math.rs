//! Math type aliases and helper functions.
//!
//! Geometry (transforms, ray origins, distances) is kept in `f64` so that
//! ray/volume intersection stays stable far from the origin. Color data is
//! `f32`.

pub use nalgebra;

// ===== Color math (f32) =====

/// 2D vector (f32), used for texture coordinates.
pub type Vec2f = nalgebra::Vector2<f32>;

/// 3D vector (f32), used for rgb triplets.
pub type Vec3f = nalgebra::Vector3<f32>;

/// 4D vector (f32), used for rgba values and binding constants.
pub type Vec4f = nalgebra::Vector4<f32>;

// ===== Geometry math (f64) =====

/// 3D vector (f64).
pub type Vec3d = nalgebra::Vector3<f64>;

/// 3D point (f64).
pub type Point3d = nalgebra::Point3<f64>;

/// 4x4 matrix (f64).
pub type Mat4d = nalgebra::Matrix4<f64>;

// ===== Helper functions =====

/// Degrees to radians.
#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two matrices.
///
/// This is not a proper rotation interpolation, but it matches what the
/// renderer does for closely spaced motion samples.
pub fn mat4_lerp(a: &Mat4d, b: &Mat4d, t: f64) -> Mat4d {
    a + (b - a) * t
}

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3d) -> Mat4d {
    Mat4d::new_translation(&t)
}

/// Build a rotation around the X axis (angle in radians).
pub fn mat4_rotation_x(angle: f64) -> Mat4d {
    Mat4d::from_axis_angle(&Vec3d::x_axis(), angle)
}

/// Build a rotation around the Y axis (angle in radians).
pub fn mat4_rotation_y(angle: f64) -> Mat4d {
    Mat4d::from_axis_angle(&Vec3d::y_axis(), angle)
}

/// Invert a transform, falling back to identity for singular matrices.
pub fn mat4_inverse_or_identity(m: &Mat4d) -> Mat4d {
    m.try_inverse().unwrap_or_else(|| {
        log::warn!("Singular transform, using identity inverse");
        Mat4d::identity()
    })
}

/// Transform a point (w = 1) by a 4x4 matrix.
#[inline]
pub fn transform_point(m: &Mat4d, p: &Vec3d) -> Vec3d {
    m.transform_point(&Point3d::from(*p)).coords
}

/// Transform a direction (w = 0) by a 4x4 matrix.
#[inline]
pub fn transform_vector(m: &Mat4d, v: &Vec3d) -> Vec3d {
    m.transform_vector(v)
}

/// Translation column of an affine transform.
#[inline]
pub fn mat4_translation(m: &Mat4d) -> Vec3d {
    Vec3d::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn translation_matrix() {
        let m = mat4_from_translation(Vec3d::new(1.0, 2.0, 3.0));
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(1, 3)], 2.0);
        assert_eq!(m[(2, 3)], 3.0);
        assert_eq!(mat4_translation(&m), Vec3d::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn point_and_vector_transforms_differ_by_translation() {
        let m = mat4_from_translation(Vec3d::new(5.0, 0.0, 0.0));
        let p = transform_point(&m, &Vec3d::new(1.0, 1.0, 1.0));
        let v = transform_vector(&m, &Vec3d::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3d::new(6.0, 1.0, 1.0));
        assert_eq!(v, Vec3d::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn rotation_x_90_maps_minus_z_to_plus_y() {
        let m = mat4_rotation_x(FRAC_PI_2);
        let v = transform_vector(&m, &Vec3d::new(0.0, 0.0, -1.0));
        assert!((v - Vec3d::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        let a = Mat4d::identity();
        let b = mat4_from_translation(Vec3d::new(2.0, 0.0, 0.0));
        let m = mat4_lerp(&a, &b, 0.5);
        assert!((m[(0, 3)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn singular_inverse_falls_back_to_identity() {
        let m = Mat4d::zeros();
        assert_eq!(mat4_inverse_or_identity(&m), Mat4d::identity());
    }

    #[test]
    fn radians_conversion() {
        assert!((radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
    }
}
