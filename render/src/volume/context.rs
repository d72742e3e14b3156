//! Per-object contexts handed to surface handlers.

use prism_core::math::{Mat4d, mat4_inverse_or_identity};

use super::RenderPrimitive;

/// Light parameters at one motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Light-to-world transform. The light looks down its local -Z axis.
    pub transform: Mat4d,
    /// Horizontal field of view in degrees.
    pub hfov: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            transform: Mat4d::identity(),
            hfov: 45.0,
            near: 0.1,
            far: 10000.0,
        }
    }
}

/// One motion sample of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightVolumeSample {
    pub light: LightParams,
    /// Light to world.
    pub l2w: Mat4d,
    /// World to light.
    pub w2l: Mat4d,
}

impl LightVolumeSample {
    pub fn new(light: LightParams) -> Self {
        Self {
            light,
            l2w: light.transform,
            w2l: mat4_inverse_or_identity(&light.transform),
        }
    }
}

impl From<LightParams> for LightVolumeSample {
    fn from(light: LightParams) -> Self {
        Self::new(light)
    }
}

/// Motion samples of one light plus the volume primitives built from them.
#[derive(Debug, Clone, Default)]
pub struct LightVolumeContext {
    motion_lights: Vec<LightVolumeSample>,
    prims: Vec<RenderPrimitive>,
}

impl LightVolumeContext {
    pub fn new(motion_lights: Vec<LightVolumeSample>) -> Self {
        Self {
            motion_lights,
            prims: Vec::new(),
        }
    }

    /// Context for a light described by one parameter set per motion sample.
    pub fn from_lights(lights: impl IntoIterator<Item = LightParams>) -> Self {
        Self::new(lights.into_iter().map(LightVolumeSample::new).collect())
    }

    pub fn num_motion_samples(&self) -> usize {
        self.motion_lights.len()
    }

    /// # Panics
    ///
    /// Panics if `index >= num_motion_samples()`.
    pub fn light_volume_sample(&self, index: usize) -> &LightVolumeSample {
        &self.motion_lights[index]
    }

    pub fn motion_lights(&self) -> &[LightVolumeSample] {
        &self.motion_lights
    }

    /// Takes ownership of a generated primitive.
    pub fn add_prim(&mut self, prim: RenderPrimitive) {
        self.prims.push(prim);
    }

    pub fn prims(&self) -> &[RenderPrimitive] {
        &self.prims
    }

    pub fn into_prims(self) -> Vec<RenderPrimitive> {
        self.prims
    }
}

/// Motion-sampled transforms of a geometry object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoInfoContext {
    pub motion_xforms: Vec<Mat4d>,
}

impl GeoInfoContext {
    pub fn num_motion_samples(&self) -> usize {
        self.motion_xforms.len()
    }
}

/// What kind of scene object a [`SurfaceContext`] refers to.
#[derive(Debug, Clone)]
pub enum ObjectContext {
    GeoInfo(GeoInfoContext),
    LightVolume(LightVolumeContext),
}

impl ObjectContext {
    /// Short kind name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::GeoInfo(_) => "GeoInfo",
            Self::LightVolume(_) => "LightVolume",
        }
    }
}

/// A scene object being turned into render primitives.
#[derive(Debug, Clone)]
pub struct SurfaceContext {
    /// Index of the object in the scene.
    pub obj_index: usize,
    pub object: ObjectContext,
}

impl SurfaceContext {
    pub fn new(obj_index: usize, object: ObjectContext) -> Self {
        Self { obj_index, object }
    }

    /// Surface context for a light.
    pub fn light(obj_index: usize, lvctx: LightVolumeContext) -> Self {
        Self::new(obj_index, ObjectContext::LightVolume(lvctx))
    }

    pub fn light_volume_context(&self) -> Option<&LightVolumeContext> {
        match &self.object {
            ObjectContext::LightVolume(lvctx) => Some(lvctx),
            ObjectContext::GeoInfo(_) => None,
        }
    }

    pub fn light_volume_context_mut(&mut self) -> Option<&mut LightVolumeContext> {
        match &mut self.object {
            ObjectContext::LightVolume(lvctx) => Some(lvctx),
            ObjectContext::GeoInfo(_) => None,
        }
    }
}
