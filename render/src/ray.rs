//! Rays and the per-hit shading context.

use bitflags::bitflags;
use prism_core::Channel;
use prism_core::math::{Vec2f, Vec3d, Vec4f};

use crate::context::RenderContext;

bitflags! {
    /// What kind of ray produced a hit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RayType: u32 {
        /// Primary ray from the camera.
        const CAMERA = 1 << 0;
        /// Shadow or light-visibility ray.
        const SHADOW = 1 << 1;
        /// Glossy or mirror reflection ray.
        const REFLECTION = 1 << 2;
        /// Diffuse bounce ray.
        const DIFFUSE = 1 << 3;
        /// Refraction or transmission ray.
        const TRANSMISSION = 1 << 4;
    }
}

impl Default for RayType {
    fn default() -> Self {
        Self::CAMERA
    }
}

/// A ray with a valid distance interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3d,
    /// Direction, not required to be normalized.
    pub dir: Vec3d,
    pub min_dist: f64,
    pub max_dist: f64,
    pub ray_type: RayType,
}

impl Ray {
    /// Camera ray from `origin` along `dir` with an unbounded interval.
    pub fn new(origin: Vec3d, dir: Vec3d) -> Self {
        Self {
            origin,
            dir,
            min_dist: 0.0,
            max_dist: f64::INFINITY,
            ray_type: RayType::CAMERA,
        }
    }

    /// Returns this ray tagged with `ray_type`.
    #[must_use]
    pub fn with_type(mut self, ray_type: RayType) -> Self {
        self.ray_type = ray_type;
        self
    }

    /// Point at distance `t`.
    #[inline]
    pub fn position_at(&self, t: f64) -> Vec3d {
        self.origin + self.dir * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3d::zeros(), Vec3d::new(0.0, 0.0, -1.0))
    }
}

/// Everything a shader knows about one ray hit.
///
/// Built by the renderer for a single evaluation and passed by reference.
/// Shaders never keep it.
#[derive(Debug, Clone, PartialEq)]
pub struct RayShaderContext {
    pub ray: Ray,
    /// Output pixel x.
    pub x: i32,
    /// Output pixel y.
    pub y: i32,
    /// Subsample index within the pixel.
    pub subsample: u32,
    /// Absolute shutter time of this sample.
    pub frame_time: f64,
    /// Cutout channel in effect for this render.
    pub cutout_channel: Channel,
    /// World-space hit point.
    pub pw: Vec3d,
    /// Shading normal.
    pub n: Vec3d,
    /// Geometric normal.
    pub ng: Vec3d,
    /// Surface texture coordinate.
    pub uv: Vec2f,
    /// Interpolated vertex color.
    pub cf: Vec4f,
}

impl RayShaderContext {
    /// Context for a camera ray hit at pixel `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            ray: Ray::default(),
            x,
            y,
            subsample: 0,
            frame_time: 0.0,
            cutout_channel: Channel::MASK,
            pw: Vec3d::zeros(),
            n: Vec3d::z(),
            ng: Vec3d::z(),
            uv: Vec2f::zeros(),
            cf: Vec4f::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Context for a hit at pixel `(x, y)` in the render described by `rtx`.
    ///
    /// Starts at shutter open and carries the render's cutout channel.
    pub fn for_render(rtx: &RenderContext, x: i32, y: i32) -> Self {
        Self {
            frame_time: rtx.shutter_open_time(),
            cutout_channel: rtx.settings().cutout_channel,
            ..Self::new(x, y)
        }
    }

    #[must_use]
    pub fn with_ray(mut self, ray: Ray) -> Self {
        self.ray = ray;
        self
    }

    #[must_use]
    pub fn with_frame_time(mut self, frame_time: f64) -> Self {
        self.frame_time = frame_time;
        self
    }

    #[must_use]
    pub fn with_cutout_channel(mut self, channel: Channel) -> Self {
        self.cutout_channel = channel;
        self
    }

    /// Sets the hit point and both normals.
    #[must_use]
    pub fn with_hit(mut self, pw: Vec3d, n: Vec3d) -> Self {
        self.pw = pw;
        self.n = n;
        self.ng = n;
        self
    }

    #[must_use]
    pub fn with_uv(mut self, uv: Vec2f) -> Self {
        self.uv = uv;
        self
    }

    /// Unit vector from the hit point back toward the ray origin.
    pub fn view_vector(&self) -> Vec3d {
        let v = -self.ray.dir;
        let len = v.norm();
        if len > 0.0 { v / len } else { v }
    }
}

impl Default for RayShaderContext {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_along_ray() {
        let ray = Ray::new(Vec3d::new(1.0, 0.0, 0.0), Vec3d::new(0.0, 2.0, 0.0));
        assert_eq!(ray.position_at(1.5), Vec3d::new(1.0, 3.0, 0.0));
        assert_eq!(ray.ray_type, RayType::CAMERA);
    }

    #[test]
    fn view_vector_is_normalized_and_reversed() {
        let ray = Ray::new(Vec3d::zeros(), Vec3d::new(0.0, 0.0, -4.0));
        let stx = RayShaderContext::new(3, 4).with_ray(ray);
        assert_eq!(stx.view_vector(), Vec3d::new(0.0, 0.0, 1.0));
        assert_eq!((stx.x, stx.y), (3, 4));
    }

    #[test]
    fn render_context_sets_cutout_channel_and_shutter_open() {
        let rtx = RenderContext::new(crate::config::RenderSettings {
            shutter_times: vec![0.25, 1.0],
            cutout_channel: Channel::FIRST_CUSTOM,
            ..Default::default()
        });
        let stx = RayShaderContext::for_render(&rtx, 5, 6);
        assert_eq!(stx.cutout_channel, Channel::FIRST_CUSTOM);
        assert_eq!(stx.frame_time, 0.25);
        assert_eq!((stx.x, stx.y), (5, 6));
    }

    #[test]
    fn ray_type_masks() {
        let mask = RayType::CAMERA | RayType::SHADOW;
        assert!(mask.contains(RayType::SHADOW));
        assert!(!mask.intersects(RayType::DIFFUSE));
    }
}
