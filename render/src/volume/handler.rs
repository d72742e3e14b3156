//! Surface handlers that turn light objects into volume primitives.

use std::ops::RangeInclusive;

use super::{
    ConeSample, ConeVolume, LightVolumeContext, RenderPrimitive, SphereSample, SphereVolume,
    SurfaceContext,
};
use crate::context::RenderContext;
use crate::error::VolumeError;

/// Valid cone field of view in degrees.
pub const FOV_RANGE: RangeInclusive<f64> = 0.0001..=180.0;

/// Valid near and far distances.
pub const NEAR_FAR_RANGE: RangeInclusive<f64> = 0.0001..=f64::INFINITY;

fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

/// Generates render primitives for one kind of scene object.
pub trait SurfaceHandler: Send + Sync {
    /// Handler name used in diagnostics.
    fn class_name(&self) -> &'static str;

    /// Appends primitives for `stx` to its object context.
    ///
    /// Failures are reported to the render's diagnostics and returned. They
    /// never leave a partial primitive behind.
    fn generate_render_prims(
        &self,
        rtx: &RenderContext,
        stx: &mut SurfaceContext,
    ) -> Result<(), VolumeError>;
}

/// Reports `err` and hands it back.
fn report(rtx: &RenderContext, err: VolumeError) -> VolumeError {
    rtx.diagnostics().error(format!("{err}, ignoring"));
    err
}

/// Looks up the light context of `stx`, reporting a mismatch.
fn light_context<'a>(
    handler: &'static str,
    rtx: &RenderContext,
    stx: &'a mut SurfaceContext,
) -> Result<&'a mut LightVolumeContext, VolumeError> {
    let obj_index = stx.obj_index;
    let found = stx.object.kind_name();
    let lvctx = stx
        .light_volume_context_mut()
        .ok_or_else(|| report(rtx, VolumeError::WrongContextKind { handler, found }))?;
    if lvctx.num_motion_samples() == 0 {
        return Err(report(rtx, VolumeError::NoMotionSamples { object: obj_index }));
    }
    Ok(lvctx)
}

/// Shutter times for `n` motion samples.
///
/// Uses the render's shutter times when they line up with the light's
/// samples, otherwise spreads `n` samples evenly over the shutter.
fn sample_times(rtx: &RenderContext, n: usize) -> Vec<f64> {
    let shutter = rtx.shutter_times();
    if shutter.len() == n {
        return shutter.to_vec();
    }
    let (open, close) = (rtx.shutter_open_time(), rtx.shutter_close_time());
    if n <= 1 {
        return vec![open; n];
    }
    (0..n)
        .map(|i| open + (close - open) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Builds spotlight cones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConeHandler;

impl SurfaceHandler for ConeHandler {
    fn class_name(&self) -> &'static str {
        "ConeHandler"
    }

    fn generate_render_prims(
        &self,
        rtx: &RenderContext,
        stx: &mut SurfaceContext,
    ) -> Result<(), VolumeError> {
        let obj_index = stx.obj_index;
        let lvctx = light_context(self.class_name(), rtx, stx)?;

        let samples: Vec<ConeSample> = lvctx
            .motion_lights()
            .iter()
            .map(|sample| {
                let light = &sample.light;
                ConeSample::new(
                    sample.l2w,
                    clamp_to(light.hfov, &FOV_RANGE),
                    clamp_to(light.near, &NEAR_FAR_RANGE),
                    clamp_to(light.far, &NEAR_FAR_RANGE),
                )
            })
            .collect();

        log::debug!(
            "ConeHandler({obj_index}): {} motion samples",
            samples.len()
        );
        let times = sample_times(rtx, samples.len());
        let volume = ConeVolume::new(obj_index, times, samples).map_err(|e| report(rtx, e))?;
        lvctx.add_prim(RenderPrimitive::Cone(volume));
        Ok(())
    }
}

/// Builds point-light spheres.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereHandler;

impl SurfaceHandler for SphereHandler {
    fn class_name(&self) -> &'static str {
        "SphereHandler"
    }

    fn generate_render_prims(
        &self,
        rtx: &RenderContext,
        stx: &mut SurfaceContext,
    ) -> Result<(), VolumeError> {
        let obj_index = stx.obj_index;
        let lvctx = light_context(self.class_name(), rtx, stx)?;

        let samples: Vec<SphereSample> = lvctx
            .motion_lights()
            .iter()
            .map(|sample| {
                SphereSample::from_transforms(
                    sample.l2w,
                    sample.w2l,
                    clamp_to(sample.light.near, &NEAR_FAR_RANGE),
                    clamp_to(sample.light.far, &NEAR_FAR_RANGE),
                )
            })
            .collect();

        log::debug!(
            "SphereHandler({obj_index}): {} motion samples",
            samples.len()
        );
        let times = sample_times(rtx, samples.len());
        let volume = SphereVolume::new(obj_index, times, samples).map_err(|e| report(rtx, e))?;
        lvctx.add_prim(RenderPrimitive::Sphere(volume));
        Ok(())
    }
}
