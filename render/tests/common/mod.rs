//! Shared fixtures for the render integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use prism_core::math::{Mat4d, Vec3d, Vec4f, mat4_from_translation};
use prism_render::{
    LightParams, LightVolumeContext, RayShader, RayShaderContext, RenderContext, RenderSettings,
    UvTexture,
};

/// Installs a test logger once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A render context with the given shutter times.
pub fn render_context(shutter_times: &[f64]) -> RenderContext {
    init_logging();
    RenderContext::new(RenderSettings {
        shutter_times: shutter_times.to_vec(),
        ..Default::default()
    })
}

/// A validated upstream shader that writes `rgba` everywhere.
pub fn solid_color(rtx: &RenderContext, rgba: Vec4f) -> Arc<RayShader> {
    let mut shader = RayShader::from(UvTexture::new());
    shader
        .set_constant(UvTexture::MAP, rgba)
        .expect("UVTexture has a map input");
    shader.validated(rtx)
}

/// A hit context for pixel `(x, y)`.
pub fn hit(x: i32, y: i32) -> RayShaderContext {
    RayShaderContext::new(x, y)
}

/// One light sample per entry of `offsets`, translated along X.
pub fn moving_light(offsets: &[f64], hfov: f64, near: f64, far: f64) -> LightVolumeContext {
    LightVolumeContext::from_lights(offsets.iter().map(|&x| LightParams {
        transform: mat4_from_translation(Vec3d::new(x, 0.0, 0.0)),
        hfov,
        near,
        far,
    }))
}

/// A static light at the origin looking down -Z.
pub fn static_light(hfov: f64, near: f64, far: f64) -> LightVolumeContext {
    LightVolumeContext::from_lights([LightParams {
        transform: Mat4d::identity(),
        hfov,
        near,
        far,
    }])
}
