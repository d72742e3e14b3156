//! Light volume primitives and the handlers that generate them.
//!
//! During scene setup a [`SurfaceHandler`] reads the motion samples of a
//! light from its [`LightVolumeContext`] and appends one immutable
//! [`RenderPrimitive`] to the context. The lighting stage later queries
//! primitives for the span a ray spends inside them at a given shutter time.

mod cone;
mod context;
mod handler;
mod sphere;

pub use cone::{ConeSample, ConeVolume, cone_bbox, cone_radii, intersect_cone};
pub use context::{
    GeoInfoContext, LightParams, LightVolumeContext, LightVolumeSample, ObjectContext,
    SurfaceContext,
};
pub use handler::{ConeHandler, FOV_RANGE, NEAR_FAR_RANGE, SphereHandler, SurfaceHandler};
pub use sphere::{SphereSample, SphereVolume, intersect_sphere, sphere_bbox};

use prism_core::{Aabb3d, MotionStep, motion_step};

use crate::ray::Ray;

/// Distances along a ray where it enters and leaves a volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSpan {
    pub t_enter: f64,
    pub t_exit: f64,
}

impl VolumeSpan {
    pub fn length(&self) -> f64 {
        self.t_exit - self.t_enter
    }
}

/// Clips an ascending hit pair to the ray's valid interval.
fn clip_span(ray: &Ray, t0: f64, t1: f64) -> Option<VolumeSpan> {
    let t_enter = t0.max(ray.min_dist);
    let t_exit = t1.min(ray.max_dist);
    (t_enter <= t_exit).then_some(VolumeSpan { t_enter, t_exit })
}

/// Which stored sample(s) a query uses.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SampleBlend {
    Single(usize),
    Lerp(usize, f64),
}

impl SampleBlend {
    fn resolve(times: &[f64], num_samples: usize, frame_time: f64) -> Self {
        let last = num_samples.saturating_sub(1);
        match motion_step(times, frame_time) {
            MotionStep::Sample(i) => Self::Single(i.min(last)),
            MotionStep::Interpolate { step, t } if step < last => Self::Lerp(step, t),
            MotionStep::Interpolate { step, .. } => Self::Single(step.min(last)),
        }
    }
}

/// A generated light volume.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPrimitive {
    Cone(ConeVolume),
    Sphere(SphereVolume),
}

impl RenderPrimitive {
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Cone(_) => "ConeVolume",
            Self::Sphere(_) => "SphereVolume",
        }
    }

    /// Scene object this primitive was generated from.
    pub fn object_index(&self) -> usize {
        match self {
            Self::Cone(cone) => cone.object_index(),
            Self::Sphere(sphere) => sphere.object_index(),
        }
    }

    pub fn motion_times(&self) -> &[f64] {
        match self {
            Self::Cone(cone) => cone.motion_times(),
            Self::Sphere(sphere) => sphere.motion_times(),
        }
    }

    pub fn num_motion_samples(&self) -> usize {
        match self {
            Self::Cone(cone) => cone.samples().len(),
            Self::Sphere(sphere) => sphere.samples().len(),
        }
    }

    fn blend(&self, frame_time: f64) -> SampleBlend {
        SampleBlend::resolve(self.motion_times(), self.num_motion_samples(), frame_time)
    }

    /// Span of `ray` inside the volume at `frame_time`, clipped to the ray's
    /// distance interval.
    pub fn volume_intersection(&self, ray: &Ray, frame_time: f64) -> Option<VolumeSpan> {
        let blend = self.blend(frame_time);
        match self {
            Self::Cone(cone) => cone.intersect_at(ray, blend),
            Self::Sphere(sphere) => sphere.intersect_at(ray, blend),
        }
    }

    /// World-space bounds at `frame_time`.
    pub fn bbox_at_time(&self, frame_time: f64) -> Aabb3d {
        let blend = self.blend(frame_time);
        match self {
            Self::Cone(cone) => cone.bbox_at(blend),
            Self::Sphere(sphere) => sphere.bbox_at(blend),
        }
    }
}

impl From<ConeVolume> for RenderPrimitive {
    fn from(cone: ConeVolume) -> Self {
        Self::Cone(cone)
    }
}

impl From<SphereVolume> for RenderPrimitive {
    fn from(sphere: SphereVolume) -> Self {
        Self::Sphere(sphere)
    }
}
