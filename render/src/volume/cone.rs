//! Spotlight cone volumes.
//!
//! The cone apex sits at the light origin and opens down the light's -Z
//! axis. Intersection happens in a local frame rotated so the axis is +Y,
//! where the cone is `x^2 + z^2 = y^2 * (far_radius / far)^2` capped at
//! `y = near` and `y = far`.

use prism_core::Aabb3d;
use prism_core::math::{
    Mat4d, Vec3d, mat4_inverse_or_identity, mat4_lerp, mat4_rotation_x, radians, transform_point,
    transform_vector,
};

use super::{SampleBlend, VolumeSpan, clip_span};
use crate::error::VolumeError;
use crate::ray::Ray;

/// Cone shape and placement at one motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeSample {
    /// Full opening angle in degrees.
    pub angle: f64,
    /// Distance from the apex to the near cap.
    pub near: f64,
    pub near_radius: f64,
    /// Distance from the apex to the far cap.
    pub far: f64,
    pub far_radius: f64,
    /// Light to world.
    pub xform: Mat4d,
    /// World to the Y-up cone frame.
    pub inv_xform: Mat4d,
    far_radius_sq_by_far_sq: f64,
}

impl ConeSample {
    /// Builds a sample. `near` and `far` are ordered by magnitude.
    pub fn new(xform: Mat4d, angle: f64, near: f64, far: f64) -> Self {
        let inv_xform = mat4_rotation_x(radians(90.0)) * mat4_inverse_or_identity(&xform);
        let (near, far) = (near.abs().min(far.abs()), near.abs().max(far.abs()));
        let angle = angle.abs();
        let (near_radius, far_radius) = cone_radii(angle, near, far);
        let far_radius_sq_by_far_sq = if far > 0.0 {
            (far_radius * far_radius) / (far * far)
        } else {
            0.0
        };
        Self {
            angle,
            near,
            near_radius,
            far,
            far_radius,
            xform,
            inv_xform,
            far_radius_sq_by_far_sq,
        }
    }

    /// World-space bounds of this sample.
    pub fn bbox(&self) -> Aabb3d {
        cone_bbox(self.near, self.far, self.near_radius, self.far_radius, &self.xform)
    }

    /// Whether the cone is too thin to hit.
    pub fn is_degenerate(&self) -> bool {
        self.far_radius < f64::EPSILON
    }
}

/// Near and far cap radii for a cone with full opening `angle` degrees.
pub fn cone_radii(angle: f64, near: f64, far: f64) -> (f64, f64) {
    let lens = (1.0 / radians(angle / 2.0).tan()) / 2.0;
    let radius = |dist: f64| {
        if dist >= f64::EPSILON {
            dist / lens / 2.0
        } else {
            0.0
        }
    };
    (radius(near), radius(far))
}

/// World-space bounds of a cone frustum placed by `xform`.
///
/// Degenerate cones give an empty box.
pub fn cone_bbox(near: f64, far: f64, near_radius: f64, far_radius: f64, xform: &Mat4d) -> Aabb3d {
    if far < f64::EPSILON
        || (far - near) < f64::EPSILON
        || near_radius < f64::EPSILON
        || far_radius < f64::EPSILON
    {
        return Aabb3d::empty();
    }
    let corners = [(near_radius, -near), (far_radius, -far)]
        .into_iter()
        .flat_map(|(r, z)| {
            [
                Vec3d::new(-r, -r, z),
                Vec3d::new(r, -r, z),
                Vec3d::new(r, r, z),
                Vec3d::new(-r, r, z),
            ]
        })
        .collect::<Vec<_>>();
    Aabb3d::from_transformed_points(xform, &corners)
}

/// Intersects a ray, already in the cone frame, with the capped cone.
///
/// Returns the entry and exit distances in ascending order.
pub fn intersect_cone(ro: &Vec3d, rd: &Vec3d, cone: &ConeSample) -> Option<(f64, f64)> {
    let ordered = |a: f64, b: f64| Some((a.min(b), a.max(b)));

    // Distance of the first valid hit found so far.
    let mut first: Option<f64> = None;

    if rd.y.abs() >= f64::EPSILON {
        let t_far = (cone.far - ro.y) / rd.y;
        let p_far = ro + rd * t_far;
        if p_far.x * p_far.x + p_far.z * p_far.z <= cone.far_radius * cone.far_radius {
            first = Some(t_far);
        }
        if cone.near_radius >= f64::EPSILON {
            let t_near = (cone.near - ro.y) / rd.y;
            let p_near = ro + rd * t_near;
            if p_near.x * p_near.x + p_near.z * p_near.z <= cone.near_radius * cone.near_radius {
                if let Some(t_far) = first {
                    return ordered(t_near, t_far);
                }
                first = Some(t_near);
            }
        }
    }

    let k = cone.far_radius_sq_by_far_sq;
    let a = rd.x * rd.x + rd.z * rd.z - rd.y * rd.y * k;
    let b = (ro.x * rd.x + ro.z * rd.z - ro.y * rd.y * k) * 2.0;
    let c = ro.x * ro.x + ro.z * ro.z - ro.y * ro.y * k;
    let d = b * b - 4.0 * a * c;
    if d <= f64::EPSILON || a.abs() < f64::EPSILON {
        return None;
    }
    let d = d.sqrt();

    for t in [(-b + d) / (2.0 * a), (-b - d) / (2.0 * a)] {
        let y = ro.y + rd.y * t;
        if y >= cone.near && y <= cone.far {
            match first {
                Some(t0) => return ordered(t0, t),
                None => first = Some(t),
            }
        }
    }
    None
}

/// Motion-blurred cone light volume.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeVolume {
    object_index: usize,
    motion_times: Vec<f64>,
    samples: Vec<ConeSample>,
}

impl ConeVolume {
    /// One sample per entry in `motion_times`.
    ///
    /// Fails when `samples` is empty.
    pub fn new(
        object_index: usize,
        motion_times: Vec<f64>,
        samples: Vec<ConeSample>,
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

    pub fn samples(&self) -> &[ConeSample] {
        &self.samples
    }

    pub(super) fn intersect_at(&self, ray: &Ray, step: SampleBlend) -> Option<VolumeSpan> {
        let (cone0, inv_xform) = match step {
            SampleBlend::Single(i) => {
                let cone = &self.samples[i];
                (cone, cone.inv_xform)
            }
            SampleBlend::Lerp(i, t) => {
                let (c0, c1) = (&self.samples[i], &self.samples[i + 1]);
                if c1.is_degenerate() {
                    return None;
                }
                (c0, mat4_lerp(&c0.inv_xform, &c1.inv_xform, t))
            }
        };
        if cone0.is_degenerate() {
            return None;
        }
        let ro = transform_point(&inv_xform, &ray.origin);
        let rd = transform_vector(&inv_xform, &ray.dir);
        let (t0, t1) = intersect_cone(&ro, &rd, cone0)?;
        clip_span(ray, t0, t1)
    }

    pub(super) fn bbox_at(&self, step: SampleBlend) -> Aabb3d {
        match step {
            SampleBlend::Single(i) => self.samples[i].bbox(),
            SampleBlend::Lerp(i, t) => {
                let (c0, c1) = (&self.samples[i], &self.samples[i + 1]);
                cone_bbox(
                    c0.near,
                    c0.far,
                    c0.near_radius,
                    c0.far_radius,
                    &mat4_lerp(&c0.xform, &c1.xform, t),
                )
            }
        }
    }
}
