//! Channel-indexed shading result.

use std::ops::{Index, IndexMut};

use crate::channel::{Channel, ChannelSet};
use crate::math::{Vec3f, Vec4f};

/// A shaded sample: one `f32` per [`Channel`].
///
/// Owned by whoever calls the shader and mutated in place. The array lives
/// inline so that evaluating a sample never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    values: [f32; Channel::COUNT],
}

impl Pixel {
    /// Creates a pixel with every channel at zero.
    pub const fn new() -> Self {
        Self {
            values: [0.0; Channel::COUNT],
        }
    }

    /// Resets every channel to zero.
    pub fn erase(&mut self) {
        self.values = [0.0; Channel::COUNT];
    }

    /// Resets every channel except `keep` to zero.
    pub fn erase_except(&mut self, keep: Channel) {
        let saved = self[keep];
        self.erase();
        self[keep] = saved;
    }

    /// Resets the channels in `channels` to zero.
    pub fn erase_channels(&mut self, channels: ChannelSet) {
        for c in channels.iter() {
            self[c] = 0.0;
        }
    }

    /// Alpha value.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self[Channel::ALPHA]
    }

    /// Sets the alpha value.
    #[inline]
    pub fn set_alpha(&mut self, a: f32) {
        self[Channel::ALPHA] = a;
    }

    /// Red, green and blue.
    #[inline]
    pub fn rgb(&self) -> Vec3f {
        Vec3f::new(self[Channel::RED], self[Channel::GREEN], self[Channel::BLUE])
    }

    /// Sets red, green and blue.
    #[inline]
    pub fn set_rgb(&mut self, r: f32, g: f32, b: f32) {
        self[Channel::RED] = r;
        self[Channel::GREEN] = g;
        self[Channel::BLUE] = b;
    }

    /// Red, green, blue and alpha.
    #[inline]
    pub fn rgba(&self) -> Vec4f {
        Vec4f::new(
            self[Channel::RED],
            self[Channel::GREEN],
            self[Channel::BLUE],
            self[Channel::ALPHA],
        )
    }

    /// Sets red, green, blue and alpha.
    #[inline]
    pub fn set_rgba(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.set_rgb(r, g, b);
        self[Channel::ALPHA] = a;
    }

    /// Channels holding a non-zero value.
    pub fn nonzero_channels(&self) -> ChannelSet {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .filter_map(|(i, _)| Channel::new(i as u8))
            .collect()
    }

    /// Raw channel values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Channel> for Pixel {
    type Output = f32;

    #[inline]
    fn index(&self, channel: Channel) -> &f32 {
        &self.values[channel.index()]
    }
}

impl IndexMut<Channel> for Pixel {
    #[inline]
    fn index_mut(&mut self, channel: Channel) -> &mut f32 {
        &mut self.values[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pixel_is_black() {
        let p = Pixel::new();
        assert!(p.nonzero_channels().is_empty());
        assert_eq!(p.as_slice().len(), Channel::COUNT);
    }

    #[test]
    fn named_accessors() {
        let mut p = Pixel::new();
        p.set_rgba(0.2, 0.3, 0.4, 0.7);
        assert_eq!(p.rgb(), Vec3f::new(0.2, 0.3, 0.4));
        assert_eq!(p.alpha(), 0.7);
        assert_eq!(p.rgba(), Vec4f::new(0.2, 0.3, 0.4, 0.7));
    }

    #[test]
    fn erase_except_keeps_one_channel() {
        let mut p = Pixel::new();
        p.set_rgba(1.0, 1.0, 1.0, 0.5);
        p[Channel::MASK] = 1.0;
        p.erase_except(Channel::ALPHA);
        assert_eq!(p.nonzero_channels(), ChannelSet::from(Channel::ALPHA));
        assert_eq!(p.alpha(), 0.5);
    }

    #[test]
    fn erase_channels_only_touches_the_set() {
        let mut p = Pixel::new();
        p.set_rgba(1.0, 1.0, 1.0, 1.0);
        p.erase_channels(ChannelSet::RGB);
        assert_eq!(p.rgb(), Vec3f::zeros());
        assert_eq!(p.alpha(), 1.0);
    }
}
