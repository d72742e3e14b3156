//! Input bindings: where a shader input gets its value from.
//!
//! A binding is either connected to an upstream source (another shader or
//! a texture sampler) or falls back to a constant. Unconnected inputs are
//! never an error; they just read the constant.

use std::fmt;
use std::sync::Arc;

use prism_core::math::{Vec2f, Vec4f};
use prism_core::{ChannelSet, Pixel};

use crate::ray::RayShaderContext;
use crate::shader::RayShader;

/// A texture that can be sampled at a uv coordinate.
///
/// Implementations are shared between render threads.
pub trait TextureSampler: Send + Sync + fmt::Debug {
    /// Samples rgba at `uv`.
    fn sample(&self, uv: &Vec2f) -> Vec4f;

    /// Channels this texture provides.
    fn channels(&self) -> ChannelSet {
        ChannelSet::RGBA
    }
}

/// Upstream source of a binding.
#[derive(Debug, Clone, Default)]
pub enum BindingSource {
    /// Not connected.
    #[default]
    None,
    /// Output of an upstream shader. Validated before it was bound.
    Shader(Arc<RayShader>),
    /// A texture map.
    Texture(Arc<dyn TextureSampler>),
}

/// One input slot of a shader instance.
#[derive(Debug, Clone)]
pub struct InputBinding {
    source: BindingSource,
    constant: Vec4f,
}

impl Default for InputBinding {
    fn default() -> Self {
        Self {
            source: BindingSource::None,
            constant: Vec4f::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl InputBinding {
    /// An unconnected binding reading `constant`.
    pub fn constant(constant: Vec4f) -> Self {
        Self {
            source: BindingSource::None,
            constant,
        }
    }

    /// Whether an upstream source is attached.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self.source, BindingSource::None)
    }

    pub fn source(&self) -> &BindingSource {
        &self.source
    }

    pub fn constant_value(&self) -> Vec4f {
        self.constant
    }

    /// The bound shader, if the source is one.
    pub fn as_shader(&self) -> Option<&RayShader> {
        match &self.source {
            BindingSource::Shader(shader) => Some(shader),
            _ => None,
        }
    }

    /// The bound texture, if the source is one.
    pub fn as_texture(&self) -> Option<&dyn TextureSampler> {
        match &self.source {
            BindingSource::Texture(texture) => Some(texture.as_ref()),
            _ => None,
        }
    }

    /// Attaches an upstream shader.
    pub fn set_shader(&mut self, shader: Arc<RayShader>) {
        self.source = BindingSource::Shader(shader);
    }

    /// Attaches a texture.
    pub fn set_texture(&mut self, texture: Arc<dyn TextureSampler>) {
        self.source = BindingSource::Texture(texture);
    }

    /// Sets the fallback constant. Does not disconnect the source.
    pub fn set_constant(&mut self, constant: Vec4f) {
        self.constant = constant;
    }

    /// Disconnects the source.
    pub fn clear(&mut self) {
        self.source = BindingSource::None;
    }

    /// Channels the source produces. Empty when unconnected.
    pub fn channels(&self) -> ChannelSet {
        match &self.source {
            BindingSource::None => ChannelSet::EMPTY,
            BindingSource::Shader(shader) => shader.output_channels(),
            BindingSource::Texture(texture) => texture.channels(),
        }
    }

    /// Evaluates the binding as an rgba value.
    ///
    /// Shader sources are evaluated into a scratch pixel on the stack.
    pub fn value(&self, stx: &RayShaderContext) -> Vec4f {
        match &self.source {
            BindingSource::None => self.constant,
            BindingSource::Texture(texture) => texture.sample(&stx.uv),
            BindingSource::Shader(shader) => {
                let mut scratch = Pixel::new();
                shader.evaluate_surface(stx, &mut scratch);
                scratch.rgba()
            }
        }
    }
}

/// A texture of a single color. Handy for tests and constant maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTexture(pub Vec4f);

impl TextureSampler for ConstantTexture {
    fn sample(&self, _uv: &Vec2f) -> Vec4f {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_reads_constant() {
        let binding = InputBinding::constant(Vec4f::new(0.5, 0.5, 0.5, 1.0));
        assert!(!binding.is_active());
        assert!(binding.channels().is_empty());
        let stx = RayShaderContext::default();
        assert_eq!(binding.value(&stx), Vec4f::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn texture_source_is_sampled() {
        let mut binding = InputBinding::default();
        binding.set_texture(Arc::new(ConstantTexture(Vec4f::new(0.25, 0.0, 0.0, 1.0))));
        assert!(binding.is_active());
        assert!(binding.as_texture().is_some());
        assert!(binding.as_shader().is_none());
        assert_eq!(binding.channels(), ChannelSet::RGBA);
        let stx = RayShaderContext::default();
        assert_eq!(binding.value(&stx).x, 0.25);

        binding.clear();
        assert!(!binding.is_active());
    }
}
