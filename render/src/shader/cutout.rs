use prism_core::{Channel, ChannelSet, Pixel};

use super::{ShaderBase, ShaderNode};
use crate::context::RenderContext;
use crate::knob::{KnobDescriptor, KnobType};
use crate::ray::RayShaderContext;

const INPUTS: &[KnobDescriptor] = &[KnobDescriptor::new("bg", KnobType::Pixel)];

const MAP_INPUTS: &[KnobDescriptor] = &[
    KnobDescriptor::new("bg", KnobType::Pixel),
    KnobDescriptor::new("map", KnobType::Color3),
];

const OUTPUTS: &[KnobDescriptor] = &[
    KnobDescriptor::new("surface", KnobType::Pixel),
    KnobDescriptor::new("rgba", KnobType::Color4),
    KnobDescriptor::new("rgb", KnobType::Color3),
    KnobDescriptor::new("r", KnobType::Double),
    KnobDescriptor::new("g", KnobType::Double),
    KnobDescriptor::new("b", KnobType::Double),
    KnobDescriptor::new("a", KnobType::Double),
];

/// Marks surfaces as cut out of the final image.
///
/// The background is shaded first so its coverage survives, then every
/// channel except alpha is cleared and the cutout channel is set. A
/// texture-modulated cutout reads the cutout amount from its `map` input
/// instead of always writing `1.0`.
#[derive(Debug, Clone)]
pub struct Cutout {
    base: ShaderBase,
    cutout_channel: Channel,
    texture_modulated: bool,
}

impl Cutout {
    /// Background input slot.
    pub const BG: usize = 0;
    /// Cutout map slot, present only when texture-modulated.
    pub const MAP: usize = 1;

    pub fn new() -> Self {
        Self::build(false)
    }

    /// A cutout whose amount comes from a `map` input.
    pub fn texture_modulated() -> Self {
        Self::build(true)
    }

    fn build(texture_modulated: bool) -> Self {
        let inputs = if texture_modulated { MAP_INPUTS } else { INPUTS };
        Self {
            base: ShaderBase::new(inputs),
            cutout_channel: Channel::MASK,
            texture_modulated,
        }
    }

    /// Returns this shader writing into `channel`.
    #[must_use]
    pub fn with_cutout_channel(mut self, channel: Channel) -> Self {
        self.cutout_channel = channel;
        self
    }

    /// Configured cutout channel.
    pub fn cutout_channel(&self) -> Channel {
        self.cutout_channel
    }

    pub fn is_texture_modulated(&self) -> bool {
        self.texture_modulated
    }

    /// Cutout amount for this hit, `None` to write a full cutout.
    fn map_amount(&self, stx: &RayShaderContext) -> Option<f32> {
        if !self.texture_modulated {
            return None;
        }
        let map = self.base.binding(Self::MAP)?;
        map.is_active()
            .then(|| map.value(stx).x.clamp(0.0, 1.0))
    }
}

impl Default for Cutout {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderNode for Cutout {
    fn class_name(&self) -> &'static str {
        if self.texture_modulated {
            "CutoutMap"
        } else {
            "Cutout"
        }
    }

    fn input_knob_definitions(&self) -> &'static [KnobDescriptor] {
        if self.texture_modulated {
            MAP_INPUTS
        } else {
            INPUTS
        }
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

        let bg = &self.base.bindings()[Self::BG];
        if bg.is_active() && bg.as_shader().is_none() {
            rtx.diagnostics()
                .warning("Cutout bg input is not a shader, treating it as unbound");
        }

        let texture_channels = if self.texture_modulated {
            self.base.bindings()[Self::MAP].channels()
        } else {
            ChannelSet::EMPTY
        };
        self.base.set_texture_channels(texture_channels);
        self.base
            .set_output_channels(ChannelSet::from(self.cutout_channel));
    }

    fn evaluate_surface(&self, stx: &RayShaderContext, out: &mut Pixel) {
        match self.base.bindings()[Self::BG].as_shader() {
            Some(bg) => bg.evaluate_surface(stx, out),
            None => out.set_rgba(0.0, 0.0, 0.0, 1.0),
        }

        out.erase_except(Channel::ALPHA);

        let amount = self.map_amount(stx).unwrap_or(1.0);
        if self.cutout_channel != stx.cutout_channel {
            out[self.cutout_channel] = amount;
        } else {
            out[stx.cutout_channel] = amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::RayShader;

    #[test]
    fn unbound_is_opaque_full_cutout() {
        let rtx = RenderContext::default();
        let mut shader = RayShader::from(Cutout::new());
        shader.validate_shader(true, &rtx);

        let mut out = Pixel::new();
        out.set_rgba(0.9, 0.9, 0.9, 0.1);
        out[Channel::Z] = 4.0;
        shader.evaluate_surface(&RayShaderContext::default(), &mut out);

        assert_eq!(out.rgb(), prism_core::math::Vec3f::zeros());
        assert_eq!(out.alpha(), 1.0);
        assert_eq!(out[Channel::MASK], 1.0);
        assert_eq!(out[Channel::Z], 0.0);
    }

    #[test]
    fn output_channels_are_the_configured_channel() {
        let rtx = RenderContext::default();
        let custom = Channel::new(30).unwrap();
        let mut shader = RayShader::from(Cutout::new().with_cutout_channel(custom));
        shader.validate_shader(false, &rtx);
        assert_eq!(shader.output_channels(), ChannelSet::from(custom));
    }

    #[test]
    fn modulated_without_map_is_full_cutout() {
        let rtx = RenderContext::default();
        let mut shader = RayShader::from(Cutout::texture_modulated());
        shader.validate_shader(true, &rtx);
        assert_eq!(shader.class_name(), "CutoutMap");

        let mut out = Pixel::new();
        shader.evaluate_surface(&RayShaderContext::default(), &mut out);
        assert_eq!(out[Channel::MASK], 1.0);
        assert!(shader.texture_channels().is_empty());
    }
}
