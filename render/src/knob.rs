//! Typed shader port descriptors.
//!
//! Each shader type publishes two static lists of [`KnobDescriptor`]s, one
//! for its inputs and one for its outputs. The lists are `&'static` and
//! shared by every instance of the type; the host graph layer reads them to
//! know which ports exist and what they carry.

use std::fmt;

/// Semantic type of a knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnobType {
    /// Text (attribute names, group names).
    String,
    /// A full channel-indexed [`Pixel`](prism_core::Pixel).
    Pixel,
    /// rgba color.
    Color4,
    /// rgb color.
    Color3,
    /// Double-precision scalar.
    Double,
    /// Single-precision scalar.
    Float,
    /// Integer.
    Int,
    /// Boolean.
    Bool,
    /// 2-component vector.
    Vec2,
    /// 3-component vector.
    Vec3,
}

impl KnobType {
    /// Lower-case name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Pixel => "pixel",
            Self::Color4 => "color4",
            Self::Color3 => "color3",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
        }
    }
}

impl fmt::Display for KnobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, typed port on a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnobDescriptor {
    /// Port name, unique within its list.
    pub name: &'static str,
    /// What the port carries.
    pub knob_type: KnobType,
}

impl KnobDescriptor {
    /// Creates a descriptor. `const` so shader types can declare static lists.
    pub const fn new(name: &'static str, knob_type: KnobType) -> Self {
        Self { name, knob_type }
    }
}

/// Slot index of the knob called `name`.
pub fn find_knob(knobs: &[KnobDescriptor], name: &str) -> Option<usize> {
    knobs.iter().position(|k| k.name == name)
}
