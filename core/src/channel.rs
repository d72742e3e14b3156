//! Pixel channel identifiers and channel sets.
//!
//! A [`Channel`] is an index into a [`Pixel`](crate::Pixel). The first few
//! indices are reserved for the standard layers (rgba, depth, cutout mask);
//! anything above [`Channel::FIRST_CUSTOM`] is free for AOVs.
//!
//! [`ChannelSet`] is a fixed 64-bit mask, so it is `Copy` and cheap to read
//! from many render threads.

use std::fmt;

/// Index of one channel in a [`Pixel`](crate::Pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Maximum number of channels a pixel can carry.
    pub const COUNT: usize = 64;

    /// The always-zero channel.
    pub const BLACK: Self = Self(0);
    /// Red.
    pub const RED: Self = Self(1);
    /// Green.
    pub const GREEN: Self = Self(2);
    /// Blue.
    pub const BLUE: Self = Self(3);
    /// Alpha (coverage).
    pub const ALPHA: Self = Self(4);
    /// Depth.
    pub const Z: Self = Self(5);
    /// Default cutout mask channel.
    pub const MASK: Self = Self(6);
    /// First index available for user channels.
    pub const FIRST_CUSTOM: Self = Self(7);

    /// Creates a channel from a raw index.
    ///
    /// Returns `None` if the index does not fit in a pixel.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Raw index of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Name of a standard channel, `None` for custom ones.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("black"),
            1 => Some("red"),
            2 => Some("green"),
            3 => Some("blue"),
            4 => Some("alpha"),
            5 => Some("depth"),
            6 => Some("mask"),
            _ => None,
        }
    }

    /// Looks up a standard channel by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Self::BLACK),
            "red" | "r" => Some(Self::RED),
            "green" | "g" => Some(Self::GREEN),
            "blue" | "b" => Some(Self::BLUE),
            "alpha" | "a" => Some(Self::ALPHA),
            "depth" | "z" => Some(Self::Z),
            "mask" | "cutout" => Some(Self::MASK),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "channel{}", self.0),
        }
    }
}

/// Set of channels stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelSet(u64);

impl ChannelSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Red, green and blue.
    pub const RGB: Self =
        Self((1 << Channel::RED.0) | (1 << Channel::GREEN.0) | (1 << Channel::BLUE.0));

    /// Red, green, blue and alpha.
    pub const RGBA: Self = Self(Self::RGB.0 | (1 << Channel::ALPHA.0));

    /// Creates an empty set.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Adds a channel.
    #[inline]
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= 1 << channel.0;
    }

    /// Removes a channel.
    #[inline]
    pub fn remove(&mut self, channel: Channel) {
        self.0 &= !(1 << channel.0);
    }

    /// Returns this set with `channel` added.
    #[must_use]
    pub const fn with(self, channel: Channel) -> Self {
        Self(self.0 | (1 << channel.0))
    }

    /// Whether `channel` is in the set.
    #[inline]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & (1 << channel.0) != 0
    }

    /// Number of channels in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Iterates the channels in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        (0..Channel::COUNT as u8)
            .map(Channel)
            .filter(move |c| self.contains(*c))
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        Self::EMPTY.with(channel)
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bounds() {
        assert!(Channel::new(63).is_some());
        assert!(Channel::new(64).is_none());
        assert_eq!(Channel::ALPHA.index(), 4);
    }

    #[test]
    fn channel_names_roundtrip() {
        for c in [Channel::RED, Channel::ALPHA, Channel::MASK] {
            assert_eq!(Channel::from_name(c.name().unwrap()), Some(c));
        }
        assert_eq!(Channel::from_name("cutout"), Some(Channel::MASK));
        assert_eq!(Channel::new(20).unwrap().to_string(), "channel20");
    }

    #[test]
    fn set_operations() {
        let mut set = ChannelSet::new();
        assert!(set.is_empty());
        set.insert(Channel::MASK);
        set.insert(Channel::RED);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Channel::MASK));
        assert!(!set.contains(Channel::ALPHA));

        set.remove(Channel::RED);
        assert_eq!(set, ChannelSet::from(Channel::MASK));

        let rgba = ChannelSet::RGBA;
        assert_eq!(rgba.len(), 4);
        assert_eq!(rgba.intersection(ChannelSet::RGB), ChannelSet::RGB);
        assert_eq!(rgba.union(set).len(), 5);
    }

    #[test]
    fn set_iterates_in_order() {
        let set: ChannelSet = [Channel::MASK, Channel::RED, Channel::ALPHA]
            .into_iter()
            .collect();
        let channels: Vec<_> = set.iter().collect();
        assert_eq!(channels, vec![Channel::RED, Channel::ALPHA, Channel::MASK]);
    }
}
