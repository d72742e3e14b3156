//! Render settings loaded from TOML.
//!
//! ```toml
//! shutter_times = [0.0, 0.5, 1.0]
//! cutout_channel = "mask"
//! motion_blur = true
//! sides_mode = "both"
//! ```

use std::path::Path;

use prism_core::Channel;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ShaderError, ShaderResult};
use crate::shader::SidesMode;

/// Global render settings shared by every shader and light handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Absolute shutter times, one per motion sample. Sorted ascending.
    pub shutter_times: Vec<f64>,
    /// Channel that cutout shaders write their mask into.
    #[serde(
        serialize_with = "serialize_channel",
        deserialize_with = "deserialize_channel"
    )]
    pub cutout_channel: Channel,
    /// When off only the first shutter time is used.
    pub motion_blur: bool,
    /// Default sides mode for new shaders.
    pub sides_mode: SidesMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shutter_times: vec![0.0],
            cutout_channel: Channel::MASK,
            motion_blur: true,
            sides_mode: SidesMode::Both,
        }
    }
}

impl RenderSettings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(source: &str) -> ShaderResult<Self> {
        let settings: Self =
            toml::from_str(source).map_err(|e| ShaderError::Config(e.to_string()))?;
        settings.normalized()
    }

    /// Serializes settings to a TOML string.
    pub fn to_toml_string(&self) -> ShaderResult<String> {
        toml::to_string_pretty(self).map_err(|e| ShaderError::Config(e.to_string()))
    }

    /// Sorts shutter times and applies the motion blur switch.
    pub fn normalized(mut self) -> ShaderResult<Self> {
        if let Some(bad) = self.shutter_times.iter().find(|t| !t.is_finite()) {
            return Err(ShaderError::Config(format!(
                "shutter time {bad} is not finite"
            )));
        }
        self.shutter_times.sort_by(f64::total_cmp);
        self.shutter_times.dedup();
        if self.shutter_times.is_empty() {
            self.shutter_times.push(0.0);
        }
        if !self.motion_blur {
            self.shutter_times.truncate(1);
        }
        Ok(self)
    }
}

/// Reads and parses a settings file.
pub fn load_settings(path: impl AsRef<Path>) -> ShaderResult<RenderSettings> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .map_err(|e| ShaderError::Config(format!("{}: {e}", path.display())))?;
    let settings = RenderSettings::from_toml_str(&source)?;
    log::debug!(
        "Loaded render settings from {} ({} shutter samples)",
        path.display(),
        settings.shutter_times.len()
    );
    Ok(settings)
}

fn serialize_channel<S: Serializer>(channel: &Channel, serializer: S) -> Result<S::Ok, S::Error> {
    match channel.name() {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_u8(channel.index() as u8),
    }
}

/// Accepts either a standard channel name or a raw channel index.
fn deserialize_channel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Channel, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChannelRepr {
        Name(String),
        Index(u8),
    }

    match ChannelRepr::deserialize(deserializer)? {
        ChannelRepr::Name(name) => Channel::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown channel '{name}'"))),
        ChannelRepr::Index(index) => Channel::new(index)
            .ok_or_else(|| serde::de::Error::custom(format!("channel index {index} out of range"))),
    }
}
