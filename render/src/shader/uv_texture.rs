use prism_core::{Channel, ChannelSet, Pixel};

use super::{ShaderBase, ShaderNode};
use crate::context::RenderContext;
use crate::knob::{KnobDescriptor, KnobType};
use crate::ray::RayShaderContext;

const INPUTS: &[KnobDescriptor] = &[KnobDescriptor::new("map", KnobType::Color4)];

const OUTPUTS: &[KnobDescriptor] = &[
    KnobDescriptor::new("rgb", KnobType::Color3),
    KnobDescriptor::new("rgba", KnobType::Color4),
    KnobDescriptor::new("r", KnobType::Float),
    KnobDescriptor::new("g", KnobType::Float),
    KnobDescriptor::new("b", KnobType::Float),
    KnobDescriptor::new("a", KnobType::Float),
];

/// Writes its `map` input into rgba.
///
/// A bound texture is sampled at the hit's uv. Textures without alpha
/// shade as opaque. An unbound map writes the binding constant, opaque
/// black by default.
#[derive(Debug, Clone)]
pub struct UvTexture {
    base: ShaderBase,
}

impl UvTexture {
    pub const MAP: usize = 0;

    pub fn new() -> Self {
        Self {
            base: ShaderBase::new(INPUTS),
        }
    }
}

impl Default for UvTexture {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderNode for UvTexture {
    fn class_name(&self) -> &'static str {
        "UVTexture"
    }

    fn input_knob_definitions(&self) -> &'static [KnobDescriptor] {
        INPUTS
    }

    fn output_knob_definitions(&self) -> &'static [KnobDescriptor] {
        OUTPUTS
    }

    fn base(&self) -> &ShaderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShaderBase {
        &mut self.base
    }

    fn validate_shader(&mut self, _for_real: bool, rtx: &RenderContext) {
        self.base.validate(rtx);
        self.base.set_output_channels(ChannelSet::RGBA);
    }

    fn evaluate_surface(&self, stx: &RayShaderContext, out: &mut Pixel) {
        let map = &self.base.bindings()[Self::MAP];
        let value = map.value(stx);
        out.set_rgba(value.x, value.y, value.z, value.w);
        if map.as_texture().is_some() && !map.channels().contains(Channel::ALPHA) {
            out.set_alpha(1.0);
        }
    }
}
