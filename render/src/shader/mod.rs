//! Ray shaders.
//!
//! A shader graph is built from a closed set of [`RayShader`] variants. Each
//! variant implements [`ShaderNode`], the capability interface the renderer
//! drives:
//!
//! 1. **Setup** (single-threaded): inputs are bound, then
//!    [`RayShader::validate_shader`] caches derived state such as the output
//!    channel set. A validated shader is frozen into an `Arc<RayShader>`
//!    before it is bound downstream, so upstream nodes cannot change once
//!    something depends on them.
//! 2. **Evaluation** (many threads): [`RayShader::evaluate_shading`] or
//!    [`RayShader::evaluate_surface`] is called per ray hit with a
//!    caller-owned [`Pixel`]. Evaluation only takes `&self`.

mod ambient_volume;
mod attribute_reader;
mod cutout;
mod uv_texture;

use std::fmt;
use std::sync::Arc;

use prism_core::math::Vec4f;
use prism_core::{ChannelSet, Pixel};
use serde::{Deserialize, Serialize};

pub use ambient_volume::AmbientVolume;
pub use attribute_reader::AttributeReader;
pub use cutout::Cutout;
pub use uv_texture::UvTexture;

use crate::binding::{BindingSource, InputBinding, TextureSampler};
use crate::context::RenderContext;
use crate::error::{ShaderError, ShaderResult};
use crate::knob::KnobDescriptor;
use crate::ray::{RayShaderContext, RayType};

/// Which sides of a surface a shader responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidesMode {
    #[default]
    Both,
    /// Only hits where the ray travels against the normal.
    Front,
    /// Only hits where the ray travels along the normal.
    Back,
}

/// Per-shader visibility switches checked before evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayControls {
    /// `None` inherits the render's sides mode at validation.
    pub sides_mode: Option<SidesMode>,
    pub camera_visibility: bool,
    pub shadow_visibility: bool,
    pub specular_visibility: bool,
    pub diffuse_visibility: bool,
    pub transmission_visibility: bool,
}

impl Default for RayControls {
    fn default() -> Self {
        Self {
            sides_mode: None,
            camera_visibility: true,
            shadow_visibility: true,
            specular_visibility: true,
            diffuse_visibility: true,
            transmission_visibility: true,
        }
    }
}

impl RayControls {
    /// Ray types this shader hides from.
    pub fn hidden_ray_types(&self) -> RayType {
        let mut hidden = RayType::empty();
        hidden.set(RayType::CAMERA, !self.camera_visibility);
        hidden.set(RayType::SHADOW, !self.shadow_visibility);
        hidden.set(RayType::REFLECTION, !self.specular_visibility);
        hidden.set(RayType::DIFFUSE, !self.diffuse_visibility);
        hidden.set(RayType::TRANSMISSION, !self.transmission_visibility);
        hidden
    }
}

/// State shared by every shader variant.
#[derive(Debug, Clone)]
pub struct ShaderBase {
    bindings: Vec<InputBinding>,
    output_channels: ChannelSet,
    texture_channels: ChannelSet,
    sides_mode: SidesMode,
    pub controls: RayControls,
}

impl ShaderBase {
    /// One unconnected binding per input knob.
    pub fn new(inputs: &[KnobDescriptor]) -> Self {
        Self {
            bindings: vec![InputBinding::default(); inputs.len()],
            output_channels: ChannelSet::EMPTY,
            texture_channels: ChannelSet::EMPTY,
            sides_mode: SidesMode::Both,
            controls: RayControls::default(),
        }
    }

    pub fn bindings(&self) -> &[InputBinding] {
        &self.bindings
    }

    pub fn binding(&self, slot: usize) -> Option<&InputBinding> {
        self.bindings.get(slot)
    }

    pub fn binding_mut(&mut self, slot: usize) -> Option<&mut InputBinding> {
        self.bindings.get_mut(slot)
    }

    pub fn output_channels(&self) -> ChannelSet {
        self.output_channels
    }

    pub fn set_output_channels(&mut self, channels: ChannelSet) {
        self.output_channels = channels;
    }

    pub fn texture_channels(&self) -> ChannelSet {
        self.texture_channels
    }

    pub fn set_texture_channels(&mut self, channels: ChannelSet) {
        self.texture_channels = channels;
    }

    /// Sides mode resolved at the last validation.
    pub fn sides_mode(&self) -> SidesMode {
        self.sides_mode
    }

    /// Work common to all variants: resolves the sides mode and collects the
    /// channels of every bound texture.
    pub fn validate(&mut self, rtx: &RenderContext) {
        self.sides_mode = self
            .controls
            .sides_mode
            .unwrap_or(rtx.settings().sides_mode);
        self.texture_channels = self
            .bindings
            .iter()
            .filter_map(|b| b.as_texture())
            .fold(ChannelSet::EMPTY, |acc, t| acc.union(t.channels()));
    }

    /// Whether a hit passes the sides and visibility controls.
    pub fn accepts(&self, stx: &RayShaderContext) -> bool {
        if self.sides_mode != SidesMode::Both {
            let rd_dot_n = stx.ray.dir.dot(&stx.n);
            match self.sides_mode {
                SidesMode::Front if rd_dot_n >= 0.0 => return false,
                SidesMode::Back if rd_dot_n < 0.0 => return false,
                _ => {}
            }
        }
        !self
            .controls
            .hidden_ray_types()
            .intersects(stx.ray.ray_type)
    }
}

/// Capability interface every shader variant implements.
pub trait ShaderNode: Send + Sync + fmt::Debug {
    /// Registry name of the variant.
    fn class_name(&self) -> &'static str;

    fn input_knob_definitions(&self) -> &'static [KnobDescriptor];

    fn output_knob_definitions(&self) -> &'static [KnobDescriptor];

    fn base(&self) -> &ShaderBase;

    fn base_mut(&mut self) -> &mut ShaderBase;

    /// Caches derived state from the bindings and render settings.
    ///
    /// Must be idempotent. `for_real == false` is a cheap pre-pass.
    fn validate_shader(&mut self, for_real: bool, rtx: &RenderContext);

    /// Shades one hit into `out`.
    fn evaluate_surface(&self, stx: &RayShaderContext, out: &mut Pixel);

    /// Whether this shader describes a participating medium.
    fn is_volume_shader(&self) -> bool {
        false
    }
}

/// A shader graph node.
#[derive(Debug, Clone)]
pub enum RayShader {
    AttributeReader(AttributeReader),
    Cutout(Cutout),
    AmbientVolume(AmbientVolume),
    UvTexture(UvTexture),
}

impl RayShader {
    fn node(&self) -> &dyn ShaderNode {
        match self {
            Self::AttributeReader(s) => s,
            Self::Cutout(s) => s,
            Self::AmbientVolume(s) => s,
            Self::UvTexture(s) => s,
        }
    }

    fn node_mut(&mut self) -> &mut dyn ShaderNode {
        match self {
            Self::AttributeReader(s) => s,
            Self::Cutout(s) => s,
            Self::AmbientVolume(s) => s,
            Self::UvTexture(s) => s,
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.node().class_name()
    }

    pub fn input_knob_definitions(&self) -> &'static [KnobDescriptor] {
        self.node().input_knob_definitions()
    }

    pub fn output_knob_definitions(&self) -> &'static [KnobDescriptor] {
        self.node().output_knob_definitions()
    }

    /// Number of input slots.
    pub fn num_inputs(&self) -> usize {
        self.node().base().bindings().len()
    }

    pub fn validate_shader(&mut self, for_real: bool, rtx: &RenderContext) {
        log::debug!(
            "Validating {} shader (for_real: {for_real})",
            self.class_name()
        );
        self.node_mut().validate_shader(for_real, rtx);
    }

    /// Validates and freezes the shader so it can be bound downstream.
    pub fn validated(mut self, rtx: &RenderContext) -> Arc<Self> {
        self.validate_shader(true, rtx);
        Arc::new(self)
    }

    pub fn evaluate_surface(&self, stx: &RayShaderContext, out: &mut Pixel) {
        self.node().evaluate_surface(stx, out);
    }

    /// Applies the sides and visibility controls, then shades.
    ///
    /// Returns `false` and leaves `out` untouched when the hit is skipped.
    pub fn evaluate_shading(&self, stx: &RayShaderContext, out: &mut Pixel) -> bool {
        if !self.node().base().accepts(stx) {
            return false;
        }
        self.evaluate_surface(stx, out);
        true
    }

    pub fn output_channels(&self) -> ChannelSet {
        self.node().base().output_channels()
    }

    pub fn texture_channels(&self) -> ChannelSet {
        self.node().base().texture_channels()
    }

    pub fn controls(&self) -> &RayControls {
        &self.node().base().controls
    }

    pub fn controls_mut(&mut self) -> &mut RayControls {
        &mut self.node_mut().base_mut().controls
    }

    pub fn is_volume_shader(&self) -> bool {
        self.node().is_volume_shader()
    }

    /// Binding at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not a declared input.
    pub fn input_binding(&self, slot: usize) -> &InputBinding {
        let count = self.num_inputs();
        match self.node().base().binding(slot) {
            Some(binding) => binding,
            None => panic!("input slot {slot} out of range for {count} inputs"),
        }
    }

    /// Mutable binding at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not a declared input.
    pub fn input_binding_mut(&mut self, slot: usize) -> &mut InputBinding {
        let count = self.num_inputs();
        match self.node_mut().base_mut().binding_mut(slot) {
            Some(binding) => binding,
            None => panic!("input slot {slot} out of range for {count} inputs"),
        }
    }

    pub fn try_input_binding(&self, slot: usize) -> ShaderResult<&InputBinding> {
        let count = self.num_inputs();
        self.node()
            .base()
            .binding(slot)
            .ok_or(ShaderError::IndexOutOfRange { slot, count })
    }

    pub fn try_input_binding_mut(&mut self, slot: usize) -> ShaderResult<&mut InputBinding> {
        let count = self.num_inputs();
        self.node_mut()
            .base_mut()
            .binding_mut(slot)
            .ok_or(ShaderError::IndexOutOfRange { slot, count })
    }

    /// Connects an upstream shader to `slot`.
    pub fn bind_shader(&mut self, slot: usize, shader: Arc<RayShader>) -> ShaderResult<()> {
        self.try_input_binding_mut(slot)?.set_shader(shader);
        Ok(())
    }

    /// Connects a texture to `slot`.
    pub fn bind_texture(
        &mut self,
        slot: usize,
        texture: Arc<dyn TextureSampler>,
    ) -> ShaderResult<()> {
        self.try_input_binding_mut(slot)?.set_texture(texture);
        Ok(())
    }

    /// Sets the fallback constant of `slot`.
    pub fn set_constant(&mut self, slot: usize, value: Vec4f) -> ShaderResult<()> {
        self.try_input_binding_mut(slot)?.set_constant(value);
        Ok(())
    }

    /// Upstream shaders bound to this one, in slot order.
    pub fn upstream_shaders(&self) -> impl Iterator<Item = &RayShader> {
        self.node()
            .base()
            .bindings()
            .iter()
            .filter_map(|b| match b.source() {
                BindingSource::Shader(shader) => Some(shader.as_ref()),
                _ => None,
            })
    }
}

impl From<AttributeReader> for RayShader {
    fn from(shader: AttributeReader) -> Self {
        Self::AttributeReader(shader)
    }
}

impl From<Cutout> for RayShader {
    fn from(shader: Cutout) -> Self {
        Self::Cutout(shader)
    }
}

impl From<AmbientVolume> for RayShader {
    fn from(shader: AmbientVolume) -> Self {
        Self::AmbientVolume(shader)
    }
}

impl From<UvTexture> for RayShader {
    fn from(shader: UvTexture) -> Self {
        Self::UvTexture(shader)
    }
}
