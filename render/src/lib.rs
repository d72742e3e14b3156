//! # Prism Render
//!
//! Ray shader graphs and light volume generation for the Prism shading
//! engine.
//!
//! ## Shader graphs
//!
//! Shaders are created by class name from a [`ShaderRegistry`], wired up
//! through their [`InputBinding`]s, validated once against a
//! [`RenderContext`] and then evaluated per ray hit from any number of
//! threads:
//!
//! ```ignore
//! let rtx = RenderContext::new(load_settings("render.toml")?);
//! let registry = ShaderRegistry::with_builtin_shaders();
//!
//! let bg = registry.create("AttributeReader")?.validated(&rtx);
//! let mut cutout = registry.create("Cutout")?;
//! cutout.bind_shader(Cutout::BG, bg)?;
//! let cutout = cutout.validated(&rtx);
//!
//! let mut out = Pixel::new();
//! cutout.evaluate_shading(&RayShaderContext::for_render(&rtx, x, y), &mut out);
//! ```
//!
//! ## Light volumes
//!
//! [`ConeHandler`] and [`SphereHandler`] turn the motion samples in a
//! [`LightVolumeContext`] into [`RenderPrimitive`]s. Setup problems are
//! logged and recorded in the context's [`Diagnostics`] without aborting
//! the render.

pub mod binding;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod knob;
pub mod ray;
pub mod registry;
pub mod shader;
pub mod volume;

pub use binding::{BindingSource, ConstantTexture, InputBinding, TextureSampler};
pub use config::{RenderSettings, load_settings};
pub use context::RenderContext;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ShaderError, ShaderResult, VolumeError};
pub use knob::{KnobDescriptor, KnobType};
pub use ray::{Ray, RayShaderContext, RayType};
pub use registry::{ShaderDescription, ShaderFactory, ShaderRegistry};
pub use shader::{
    AmbientVolume, AttributeReader, Cutout, RayControls, RayShader, ShaderNode, SidesMode,
    UvTexture,
};
pub use volume::{
    ConeHandler, LightParams, LightVolumeContext, ObjectContext, RenderPrimitive, SphereHandler,
    SurfaceContext, SurfaceHandler, VolumeSpan,
};

pub use prism_core::{Channel, ChannelSet, Pixel};

/// Render library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup.
pub fn init() {
    prism_core::init();
    log::info!("Prism Render v{} initialized", VERSION);
}
