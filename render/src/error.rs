//! Shader and volume error types.

use thiserror::Error;

/// Errors raised while building or configuring a shader graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    #[error("Unknown shader type: {0}")]
    UnknownShaderType(String),
    #[error("Input slot {slot} out of range, shader declares {count} inputs")]
    IndexOutOfRange { slot: usize, count: usize },
    #[error("Invalid render settings: {0}")]
    Config(String),
}

pub type ShaderResult<T> = Result<T, ShaderError>;

/// Errors raised while generating light volume primitives.
///
/// These never abort a render: the handler reports them and the light
/// simply contributes no volume.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    #[error("Zero light motion samples for object {object}")]
    NoMotionSamples { object: usize },
    #[error("{handler} expects a light volume context, found {found}")]
    WrongContextKind {
        handler: &'static str,
        found: &'static str,
    },
}
