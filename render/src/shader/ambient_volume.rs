use prism_core::{ChannelSet, Pixel};

use super::{ShaderBase, ShaderNode};
use crate::context::RenderContext;
use crate::knob::KnobDescriptor;
use crate::ray::RayShaderContext;

/// Uniform ambient medium filling light volumes.
///
/// Has no ports. Surface evaluation is a no-op; the medium only matters to
/// a volume integrator.
#[derive(Debug, Clone)]
pub struct AmbientVolume {
    base: ShaderBase,
}

impl AmbientVolume {
    pub fn new() -> Self {
        Self {
            base: ShaderBase::new(&[]),
        }
    }
}

impl Default for AmbientVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderNode for AmbientVolume {
    fn class_name(&self) -> &'static str {
        "AmbientVolume"
    }

    fn input_knob_definitions(&self) -> &'static [KnobDescriptor] {
        &[]
    }

    fn output_knob_definitions(&self) -> &'static [KnobDescriptor] {
        &[]
    }

    fn base(&self) -> &ShaderBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShaderBase {
        &mut self.base
    }

    fn validate_shader(&mut self, _for_real: bool, rtx: &RenderContext) {
        self.base.validate(rtx);
        self.base.set_output_channels(ChannelSet::EMPTY);
    }

    fn evaluate_surface(&self, _stx: &RayShaderContext, _out: &mut Pixel) {}

    fn is_volume_shader(&self) -> bool {
        true
    }
}
