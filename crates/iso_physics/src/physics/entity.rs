//! Host-entity capability consumed by physics bodies
//!
//! A [`crate::physics::Body`] never reaches into a concrete sprite type;
//! it reads and writes the visual transform through the [`EntityView`]
//! trait, passed in per call. [`EntityState`] is a plain-data
//! implementation for hosts without their own entity type and for tests.

use crate::foundation::math::Point3;

/// Read/write view of the visual entity a body moves
///
/// The body reads the transform during its pre-update step and writes the
/// integrated deltas back during post-update; everything else on the
/// entity is opaque to the physics core.
pub trait EntityView {
    /// Isometric world position of the entity
    fn iso_position(&self) -> Point3;

    /// Move the entity by the given world-space deltas
    fn translate_iso(&mut self, dx: f32, dy: f32, dz: f32);

    /// Rendered width, after scaling
    fn render_width(&self) -> f32;

    /// Rendered height, after scaling
    fn render_height(&self) -> f32;

    /// Horizontal scale factor
    fn scale_x(&self) -> f32;

    /// Vertical scale factor
    fn scale_y(&self) -> f32;

    /// Horizontal rendering anchor in `[0, 1]`
    fn anchor_x(&self) -> f32;

    /// Vertical rendering anchor in `[0, 1]`
    fn anchor_y(&self) -> f32;

    /// Visual angle in degrees
    fn angle(&self) -> f32;

    /// Add a delta to the visual angle
    fn rotate_by(&mut self, degrees: f32);

    /// True exactly once after creation or a teleport
    fn fresh(&self) -> bool;

    /// Whether the entity wants to be destroyed once it leaves the world bounds
    fn out_of_bounds_kill(&self) -> bool;

    /// Ask the owner to destroy this entity
    ///
    /// The body issues the request and takes no further action that frame;
    /// honoring it is the owner's responsibility.
    fn request_destroy(&mut self);

    /// Notification that the physics position changed outside the normal
    /// frame update (for example via a body reset)
    fn notify_position_changed(&mut self);
}

/// Plain-data entity state
///
/// Pure data, no logic: a minimal transform record that satisfies
/// [`EntityView`] for hosts that have no sprite system of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    /// Isometric world X position
    pub iso_x: f32,
    /// Isometric world Y position
    pub iso_y: f32,
    /// Isometric world Z position
    pub iso_z: f32,
    /// Rendered width, after scaling
    pub width: f32,
    /// Rendered height, after scaling
    pub height: f32,
    /// Horizontal scale factor
    pub scale_x: f32,
    /// Vertical scale factor
    pub scale_y: f32,
    /// Horizontal rendering anchor in `[0, 1]`
    pub anchor_x: f32,
    /// Vertical rendering anchor in `[0, 1]`
    pub anchor_y: f32,
    /// Visual angle in degrees
    pub angle: f32,
    /// True until the first frame update consumes it
    pub fresh: bool,
    /// Destroy this entity when it leaves the world bounds
    pub out_of_bounds_kill: bool,
    /// Set once a body has requested destruction
    pub destroy_requested: bool,
    /// Set when the physics position changed outside the frame update
    pub position_dirty: bool,
}

impl EntityState {
    /// Create an entity at the given iso position with the given rendered size
    #[must_use]
    pub fn new(iso_x: f32, iso_y: f32, iso_z: f32, width: f32, height: f32) -> Self {
        Self {
            iso_x,
            iso_y,
            iso_z,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_x: 0.0,
            anchor_y: 0.0,
            angle: 0.0,
            fresh: true,
            out_of_bounds_kill: false,
            destroy_requested: false,
            position_dirty: false,
        }
    }
}

impl Default for EntityState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }
}

impl EntityView for EntityState {
    fn iso_position(&self) -> Point3 {
        Point3::new(self.iso_x, self.iso_y, self.iso_z)
    }

    fn translate_iso(&mut self, dx: f32, dy: f32, dz: f32) {
        self.iso_x += dx;
        self.iso_y += dy;
        self.iso_z += dz;
    }

    fn render_width(&self) -> f32 {
        self.width
    }

    fn render_height(&self) -> f32 {
        self.height
    }

    fn scale_x(&self) -> f32 {
        self.scale_x
    }

    fn scale_y(&self) -> f32 {
        self.scale_y
    }

    fn anchor_x(&self) -> f32 {
        self.anchor_x
    }

    fn anchor_y(&self) -> f32 {
        self.anchor_y
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn rotate_by(&mut self, degrees: f32) {
        self.angle += degrees;
    }

    fn fresh(&self) -> bool {
        self.fresh
    }

    fn out_of_bounds_kill(&self) -> bool {
        self.out_of_bounds_kill
    }

    fn request_destroy(&mut self) {
        self.destroy_requested = true;
    }

    fn notify_position_changed(&mut self) {
        self.position_dirty = true;
    }
}
