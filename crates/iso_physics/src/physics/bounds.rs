//! Axis-aligned bounding cube primitive
//!
//! Provides the box geometry that bodies and the world bounds share:
//! point containment, box intersection and corner enumeration.

use crate::foundation::math::Point3;

/// An axis-aligned box in isometric world space
///
/// `(x, y, z)` is the near-bottom-back corner; the extents run along +X
/// (`width_x`), +Y (`width_y`) and +Z (`height`). Extents are assumed
/// non-negative; callers are responsible for supplying valid sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCube {
    /// Back face coordinate along X
    pub x: f32,
    /// Back face coordinate along Y
    pub y: f32,
    /// Bottom face coordinate along Z
    pub z: f32,
    /// Extent along +X
    pub width_x: f32,
    /// Extent along +Y
    pub width_y: f32,
    /// Extent along +Z
    pub height: f32,
}

impl BoundingCube {
    /// Create a cube from its back corner coordinates and extents
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, width_x: f32, width_y: f32, height: f32) -> Self {
        Self {
            x,
            y,
            z,
            width_x,
            width_y,
            height,
        }
    }

    /// Create a cube from a corner point and extents
    #[must_use]
    pub fn from_corner(corner: Point3, width_x: f32, width_y: f32, height: f32) -> Self {
        Self::new(corner.x, corner.y, corner.z, width_x, width_y, height)
    }

    /// Front face coordinate along X
    #[must_use]
    pub fn front_x(&self) -> f32 {
        self.x + self.width_x
    }

    /// Front face coordinate along Y
    #[must_use]
    pub fn front_y(&self) -> f32 {
        self.y + self.width_y
    }

    /// Top face coordinate along Z
    #[must_use]
    pub fn top(&self) -> f32 {
        self.z + self.height
    }

    /// Test whether a point lies within the closed box
    ///
    /// Points exactly on a face count as contained.
    #[must_use]
    pub fn contains(&self, point: Point3) -> bool {
        point.x >= self.x
            && point.x <= self.front_x()
            && point.y >= self.y
            && point.y <= self.front_y()
            && point.z >= self.z
            && point.z <= self.top()
    }

    /// Test whether this box overlaps another
    ///
    /// Boxes that merely share a face count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x <= other.front_x()
            && self.front_x() >= other.x
            && self.y <= other.front_y()
            && self.front_y() >= other.y
            && self.z <= other.top()
            && self.top() >= other.z
    }

    /// Corner of the box by canonical index
    ///
    /// The index is a 3-bit code: bit 0 selects the top face (+`height`),
    /// bit 1 the front Y face (+`width_y`), bit 2 the front X face
    /// (+`width_x`). Corner 0 is therefore `(x, y, z)` and corner 7 is
    /// `(x + width_x, y + width_y, z + height)`. Callers depend on this
    /// ordering being stable.
    #[must_use]
    pub fn corner(&self, index: usize) -> Point3 {
        let x = if index & 0b100 == 0 {
            self.x
        } else {
            self.front_x()
        };
        let y = if index & 0b010 == 0 {
            self.y
        } else {
            self.front_y()
        };
        let z = if index & 0b001 == 0 { self.z } else { self.top() };
        Point3::new(x, y, z)
    }
}
