//! # Prism Core
//!
//! Core crate for the Prism shading engine: math aliases, pixel channels,
//! bounding boxes and motion-sample timing. Nothing in here knows about
//! shaders; `prism-render` builds on these types.

pub mod bbox;
pub mod channel;
pub mod math;
pub mod motion;
pub mod pixel;

pub use bbox::Aabb3d;
pub use channel::{Channel, ChannelSet};
pub use motion::{MotionStep, motion_step};
pub use pixel::Pixel;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core version once at startup.
pub fn init() {
    log::info!("Prism Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
