//! Debug outline generation for physics bodies
//!
//! Produces projected 2D outline data from a body's corner cache; actual
//! drawing is left to the host renderer. The silhouette of an axis-aligned
//! cube under isometric projection is a hexagon, with three internal edges
//! radiating from the projected near-top corner.

use crate::foundation::math::{Point3, Vec2};
use crate::physics::body::Body;

/// Corner indices tracing the hexagonal silhouette, wound for polygon filling
const SILHOUETTE: [usize; 6] = [1, 3, 2, 6, 4, 5];

/// Corner pairs for the internal edges; corner 7 is the near-top corner and
/// 3, 5, 6 are its single-bit neighbors on the silhouette
const INTERNAL_EDGES: [(usize, usize); 3] = [(7, 3), (7, 5), (7, 6)];

/// Projects isometric world points into 2D screen space
pub trait IsoProjector {
    /// Project a world-space point to screen space
    fn project(&self, point: Point3) -> Vec2;
}

/// Classic 2:1 dimetric projection
///
/// X and Y run along the screen diagonals; Z maps straight up the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimetricProjector {
    /// Screen-space origin the projection is anchored to
    pub origin: Vec2,
}

impl DimetricProjector {
    /// Create a projector anchored at the given screen origin
    #[must_use]
    pub const fn new(origin: Vec2) -> Self {
        Self { origin }
    }
}

impl IsoProjector for DimetricProjector {
    fn project(&self, point: Point3) -> Vec2 {
        Vec2::new(
            self.origin.x + (point.x - point.y),
            self.origin.y + (point.x + point.y) * 0.5 - point.z,
        )
    }
}

/// Projected outline of a body's bounding cube
///
/// Snapshot of the eight projected corners; query it for either a filled
/// silhouette polygon or the wireframe edge set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyOutline {
    points: [Vec2; 8],
}

impl BodyOutline {
    /// Project `body`'s current corners through `projector`
    pub fn new(body: &mut Body, projector: &impl IsoProjector) -> Self {
        let mut points = [Vec2::zeros(); 8];
        for (point, corner) in points.iter_mut().zip(body.corners()) {
            *point = projector.project(*corner);
        }
        Self { points }
    }

    /// All eight projected corners in canonical corner order
    #[must_use]
    pub const fn points(&self) -> &[Vec2; 8] {
        &self.points
    }

    /// Hexagonal silhouette polygon
    #[must_use]
    pub fn silhouette(&self) -> [Vec2; 6] {
        SILHOUETTE.map(|index| self.points[index])
    }

    /// Edges interior to the silhouette, for wireframe rendering
    #[must_use]
    pub fn internal_edges(&self) -> [[Vec2; 2]; 3] {
        INTERNAL_EDGES.map(|(a, b)| [self.points[a], self.points[b]])
    }
}
