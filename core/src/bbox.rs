//! Axis-aligned bounding boxes in double precision.

use crate::math::{Mat4d, Vec3d, transform_point};

/// Axis-Aligned Bounding Box for world-space bounds queries.
///
/// An empty box has `min > max` on every axis, so expanding it by a single
/// point yields a degenerate box at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3d {
    /// Minimum corner of the bounding box.
    pub min: Vec3d,
    /// Maximum corner of the bounding box.
    pub max: Vec3d,
}

impl Aabb3d {
    /// The empty box.
    pub fn empty() -> Self {
        Self {
            min: Vec3d::repeat(f64::INFINITY),
            max: Vec3d::repeat(f64::NEG_INFINITY),
        }
    }

    /// Creates a new AABB from min and max corners.
    #[inline]
    pub const fn new(min: Vec3d, max: Vec3d) -> Self {
        Self { min, max }
    }

    /// Whether the box contains no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to include `p`.
    #[inline]
    pub fn expand(&mut self, p: &Vec3d) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Builds the box enclosing `points` after transforming them by `xform`.
    pub fn from_transformed_points<'a>(
        xform: &Mat4d,
        points: impl IntoIterator<Item = &'a Vec3d>,
    ) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand(&transform_point(xform, p));
        }
        bbox
    }

    /// Returns the center point of the AABB.
    #[inline]
    pub fn center(&self) -> Vec3d {
        (self.min + self.max) * 0.5
    }

    /// Returns the size (full extents) of the AABB.
    #[inline]
    pub fn size(&self) -> Vec3d {
        self.max - self.min
    }

    /// Checks if a point is inside the AABB.
    #[inline]
    pub fn contains_point(&self, point: &Vec3d) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Returns the union of this AABB with another.
    #[inline]
    pub fn union(&self, other: &Aabb3d) -> Aabb3d {
        Aabb3d {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}

impl Default for Aabb3d {
    fn default() -> Self {
        Self::empty()
    }
}
