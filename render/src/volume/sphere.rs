//! Point-light sphere volumes.

use prism_core::Aabb3d;
use prism_core::math::{
    Mat4d, Vec3d, lerp, mat4_inverse_or_identity, mat4_lerp, transform_point, transform_vector,
};

use super::{SampleBlend, VolumeSpan, clip_span};
use crate::error::VolumeError;
use crate::ray::Ray;

/// Sphere shells at one motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSample {
    /// Light to world.
    pub xform: Mat4d,
    /// World to light.
    pub inv_xform: Mat4d,
    /// Inner shell radius.
    pub near_radius: f64,
    /// Outer shell radius.
    pub far_radius: f64,
}

impl SphereSample {
    pub fn new(xform: Mat4d, near_radius: f64, far_radius: f64) -> Self {
        Self::from_transforms(xform, mat4_inverse_or_identity(&xform), near_radius, far_radius)
    }

    /// Builds a sample from a transform and its known inverse.
    pub fn from_transforms(xform: Mat4d, inv_xform: Mat4d, near_radius: f64, far_radius: f64) -> Self {
        let (near, far) = (near_radius.abs(), far_radius.abs());
        Self {
            xform,
            inv_xform,
            near_radius: near.min(far),
            far_radius: near.max(far),
        }
    }

    pub fn bbox(&self) -> Aabb3d {
        sphere_bbox(self.far_radius, &self.xform)
    }

    pub fn is_degenerate(&self) -> bool {
        self.far_radius < f64::EPSILON
    }
}

/// World-space bounds of a sphere of `radius` placed by `xform`.
pub fn sphere_bbox(radius: f64, xform: &Mat4d) -> Aabb3d {
    let r = radius;
    let corners = [
        Vec3d::new(-r, -r, -r),
        Vec3d::new(r, -r, -r),
        Vec3d::new(r, r, -r),
        Vec3d::new(-r, r, -r),
        Vec3d::new(-r, -r, r),
        Vec3d::new(r, -r, r),
        Vec3d::new(r, r, r),
        Vec3d::new(-r, r, r),
    ];
    Aabb3d::from_transformed_points(xform, &corners)
}

/// Intersects a ray, already in sphere space, with a sphere at the origin.
///
/// Returns the ascending entry and exit distances, `None` when the sphere
/// is missed or entirely behind the ray origin.
pub fn intersect_sphere(ro: &Vec3d, rd: &Vec3d, radius: f64) -> Option<(f64, f64)> {
    let a = rd.norm_squared();
    if a < f64::EPSILON {
        return None;
    }
    let b = 2.0 * rd.dot(ro);
    let c = ro.norm_squared() - radius * radius;
    let discrm = b * b - 4.0 * a * c;

    if discrm >= f64::EPSILON {
        let l = discrm.sqrt();
        let t_min = (-b - l) / (2.0 * a);
        let t_max = (-b + l) / (2.0 * a);
        if t_min < 0.0 && t_max < 0.0 {
            return None;
        }
        return Some((t_min, t_max));
    }
    if discrm.abs() < f64::EPSILON {
        let t = -b / (2.0 * a);
        if t < 0.0 {
            return None;
        }
        return Some((t, t));
    }
    None
}

/// Motion-blurred sphere light volume.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereVolume {
    object_index: usize,
    motion_times: Vec<f64>,
    samples: Vec<SphereSample>,
}

impl SphereVolume {
    /// One sample per entry in `motion_times`. Fails when `samples` is empty.
    pub fn new(
        object_index: usize,
        motion_times: Vec<f64>,
        samples: Vec<SphereSample>,
    ) -> Result<Self, VolumeError> {
        if samples.is_empty() {
            return Err(VolumeError::NoMotionSamples {
                object: object_index,
            });
        }
        debug_assert_eq!(motion_times.len(), samples.len());
        Ok(Self {
            object_index,
            motion_times,
            samples,
        })
    }

    pub fn object_index(&self) -> usize {
        self.object_index
    }

    pub fn motion_times(&self) -> &[f64] {
        &self.motion_times
    }

    pub fn samples(&self) -> &[SphereSample] {
        &self.samples
    }

    pub(super) fn intersect_at(&self, ray: &Ray, step: SampleBlend) -> Option<VolumeSpan> {
        let (inv_xform, radius) = match step {
            SampleBlend::Single(i) => {
                let s = &self.samples[i];
                if s.is_degenerate() {
                    return None;
                }
                (s.inv_xform, s.far_radius)
            }
            SampleBlend::Lerp(i, t) => {
                let (s0, s1) = (&self.samples[i], &self.samples[i + 1]);
                if s0.is_degenerate() || s1.is_degenerate() {
                    return None;
                }
                (
                    mat4_lerp(&s0.inv_xform, &s1.inv_xform, t),
                    lerp(s0.far_radius, s1.far_radius, t),
                )
            }
        };
        let ro = transform_point(&inv_xform, &ray.origin);
        let rd = transform_vector(&inv_xform, &ray.dir);
        let (t0, t1) = intersect_sphere(&ro, &rd, radius)?;
        clip_span(ray, t0, t1)
    }

    pub(super) fn bbox_at(&self, step: SampleBlend) -> Aabb3d {
        match step {
            SampleBlend::Single(i) => self.samples[i].bbox(),
            SampleBlend::Lerp(i, t) => {
                let (s0, s1) = (&self.samples[i], &self.samples[i + 1]);
                sphere_bbox(
                    lerp(s0.far_radius, s1.far_radius, t),
                    &mat4_lerp(&s0.xform, &s1.xform, t),
                )
            }
        }
    }
}
