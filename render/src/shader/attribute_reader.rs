use prism_core::math::Vec4f;
use prism_core::{ChannelSet, Pixel};

use super::{ShaderBase, ShaderNode};
use crate::context::RenderContext;
use crate::knob::{KnobDescriptor, KnobType};
use crate::ray::RayShaderContext;

const INPUTS: &[KnobDescriptor] = &[
    KnobDescriptor::new("attrib_name", KnobType::String),
    KnobDescriptor::new("attrib_group", KnobType::String),
];

const OUTPUTS: &[KnobDescriptor] = &[
    KnobDescriptor::new("surface", KnobType::String),
    KnobDescriptor::new("displacement", KnobType::String),
];

/// Emits a named primitive attribute as a color.
///
/// Attribute lookup is not wired to geometry yet, so every hit shades as
/// opaque black.
#[derive(Debug, Clone)]
pub struct AttributeReader {
    base: ShaderBase,
    attrib_name: String,
    attrib_group: String,
}

impl AttributeReader {
    pub const ATTRIB_NAME: usize = 0;
    pub const ATTRIB_GROUP: usize = 1;

    pub fn new() -> Self {
        Self {
            base: ShaderBase::new(INPUTS),
            attrib_name: String::new(),
            attrib_group: String::new(),
        }
    }

    /// Returns this shader reading `name` from `group`.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, group: impl Into<String>) -> Self {
        self.attrib_name = name.into();
        self.attrib_group = group.into();
        self
    }

    pub fn attrib_name(&self) -> &str {
        &self.attrib_name
    }

    pub fn attrib_group(&self) -> &str {
        &self.attrib_group
    }

    /// Looks up the configured attribute at the hit.
    pub fn lookup_attribute(&self, _stx: &RayShaderContext) -> Option<Vec4f> {
        None
    }
}

impl Default for AttributeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderNode for AttributeReader {
    fn class_name(&self) -> &'static str {
        "AttributeReader"
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
        self.base.set_output_channels(ChannelSet::EMPTY);
    }

    fn evaluate_surface(&self, stx: &RayShaderContext, out: &mut Pixel) {
        let value = self
            .lookup_attribute(stx)
            .unwrap_or_else(|| Vec4f::new(0.0, 0.0, 0.0, 1.0));
        out.set_rgba(value.x, value.y, value.z, value.w);
    }
}
