//! Shader type registry.
//!
//! Maps class names to factories. The registry is an ordinary value: build
//! one at startup, register the shader types you need, then share it
//! read-only with whatever assembles shader graphs.

use std::collections::HashMap;

use crate::error::{ShaderError, ShaderResult};
use crate::shader::{AmbientVolume, AttributeReader, Cutout, RayShader, UvTexture};

/// Builds a default-constructed shader.
pub type ShaderFactory = fn() -> RayShader;

/// Registration record for one shader type.
#[derive(Debug, Clone, Copy)]
pub struct ShaderDescription {
    pub class_name: &'static str,
    pub factory: ShaderFactory,
}

impl ShaderDescription {
    pub const fn new(class_name: &'static str, factory: ShaderFactory) -> Self {
        Self {
            class_name,
            factory,
        }
    }
}

/// Descriptions of every shader type this crate provides.
pub const BUILTIN_SHADERS: &[ShaderDescription] = &[
    ShaderDescription::new("AttributeReader", || AttributeReader::new().into()),
    ShaderDescription::new("Cutout", || Cutout::new().into()),
    ShaderDescription::new("CutoutMap", || Cutout::texture_modulated().into()),
    ShaderDescription::new("AmbientVolume", || AmbientVolume::new().into()),
    ShaderDescription::new("UVTexture", || UvTexture::new().into()),
];

/// Class name to factory map.
#[derive(Debug, Clone, Default)]
pub struct ShaderRegistry {
    descriptions: HashMap<&'static str, ShaderDescription>,
}

impl ShaderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`BUILTIN_SHADERS`].
    pub fn with_builtin_shaders() -> Self {
        let mut registry = Self::new();
        for description in BUILTIN_SHADERS {
            registry.register(*description);
        }
        registry
    }

    /// Registers a shader type. A later registration of the same name
    /// replaces the earlier one.
    pub fn register(&mut self, description: ShaderDescription) {
        if self
            .descriptions
            .insert(description.class_name, description)
            .is_some()
        {
            log::debug!("Replaced shader registration '{}'", description.class_name);
        } else {
            log::debug!("Registered shader '{}'", description.class_name);
        }
    }

    /// Creates a default instance of `class_name`.
    pub fn create(&self, class_name: &str) -> ShaderResult<RayShader> {
        self.descriptions
            .get(class_name)
            .map(|d| (d.factory)())
            .ok_or_else(|| ShaderError::UnknownShaderType(class_name.to_string()))
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.descriptions.contains_key(class_name)
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.descriptions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
