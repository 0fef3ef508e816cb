//! Per-entity physics body and its frame-update protocol
//!
//! A [`Body`] owns the position, velocity and bounding geometry of one
//! entity. Each frame the owning loop drives a two-phase protocol:
//!
//! 1. [`Body::pre_update`] reads the host entity's transform, asks the
//!    [`MotionIntegrator`] to advance velocity, integrates position and
//!    resolves world-bounds collisions.
//! 2. An external collision pass may mutate the body (position, velocity,
//!    `touching`, `blocked`, overlap depths, `embedded`).
//! 3. [`Body::post_update`] infers the facing direction, clamps and writes
//!    the frame's deltas back to the entity, and commits the position as
//!    the baseline for the next frame.
//!
//! The body raises no errors: a disabled body skips all work, a repeated
//! post-update in the same frame is absorbed by the phase guard, and an
//! out-of-bounds entity only receives a destruction request.

use log::debug;

use crate::foundation::math::{Point3, Vec3};
use crate::physics::bounds::BoundingCube;
use crate::physics::direction::{DirectionFlags, Facing, UpdatePhase};
use crate::physics::entity::EntityView;
use crate::physics::world::MotionIntegrator;

/// Default symmetric clamp on per-axis velocity
const DEFAULT_MAX_VELOCITY: f32 = 10_000.0;

/// Default clamp on angular velocity
const DEFAULT_MAX_ANGULAR: f32 = 1_000.0;

/// Default bounding extents for a host entity of rendered size `(w, h)`
///
/// The two ground extents take the diamond half-width; the height is what
/// remains of the sprite above the diamond. Negative rendered sizes are
/// treated by magnitude.
fn derived_extents(render_width: f32, render_height: f32) -> (f32, f32, f32) {
    let w = render_width.abs();
    let h = render_height.abs();
    let half = (w * 0.5).ceil();
    (half, half, (h - w * 0.5).ceil())
}

/// Per-entity physics state and per-frame integrator
///
/// All fields an external collision pass needs are public and may be
/// mutated between [`Body::pre_update`] and [`Body::post_update`].
/// Extents are assumed non-negative; [`Body::set_size`] does not validate
/// them, so that caller bugs surface instead of being masked.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Master enable; a disabled body skips every update entry point
    pub enable: bool,
    /// Whether integration moves this body (false = position driven externally)
    pub moves: bool,
    /// Immovable bodies are never displaced by pairwise separation
    pub immovable: bool,
    /// Whether post-update applies rotation deltas to the entity
    pub allow_rotation: bool,
    /// Whether the integrator applies gravity to this body
    pub allow_gravity: bool,
    /// Rebound from the world bounds instead of leaving them
    pub collide_world_bounds: bool,
    /// Let the owner run its own X-axis separation instead of the built-in pass
    pub custom_separate_x: bool,
    /// Let the owner run its own Y-axis separation instead of the built-in pass
    pub custom_separate_y: bool,
    /// Let the owner run its own Z-axis separation instead of the built-in pass
    pub custom_separate_z: bool,
    /// Exclude this body from the broad-phase tree
    pub skip_tree: bool,

    /// Near-bottom-back corner of the bounding cube (authoritative location)
    pub position: Point3,
    /// Position at the start of the current integration cycle
    pub prev: Point3,
    /// Constant local displacement from the entity origin
    pub offset: Vec3,
    /// Box extent along +X
    pub width_x: f32,
    /// Box extent along +Y
    pub width_y: f32,
    /// Box extent along +Z
    pub height: f32,
    /// `floor(width_x / 2)`, kept in sync by every size mutation
    pub half_width_x: f32,
    /// `floor(width_y / 2)`, kept in sync by every size mutation
    pub half_width_y: f32,
    /// `floor(height / 2)`, kept in sync by every size mutation
    pub half_height: f32,
    /// Geometric center: `position` plus the half extents
    pub center: Point3,

    /// Linear velocity in units per second
    pub velocity: Vec3,
    /// Velocity scaled by the frame's time step (scratch)
    pub new_velocity: Vec3,
    /// Linear acceleration in units per second squared
    pub acceleration: Vec3,
    /// Per-axis drag, applied while there is no acceleration on the axis
    pub drag: Vec3,
    /// Per-body gravity, added to the world's gravity
    pub gravity: Vec3,
    /// Per-axis restitution applied on world-bounds collision, conventionally in `[0, 1]`
    pub bounce: Vec3,
    /// Per-axis symmetric velocity clamp; zero disables clamping on the axis
    pub max_velocity: Vec3,
    /// Per-axis clamp on the per-frame displacement written back to the entity;
    /// zero disables clamping on the axis
    pub delta_max: Vec3,
    /// Angular velocity in degrees per second
    pub angular_velocity: f32,
    /// Angular acceleration in degrees per second squared
    pub angular_acceleration: f32,
    /// Angular drag, applied while there is no angular acceleration
    pub angular_drag: f32,
    /// Clamp on angular velocity; zero disables clamping
    pub max_angular: f32,
    /// Mass, consumed by pairwise separation
    pub mass: f32,

    /// Rotation in degrees, synced from the entity each pre-update
    pub rotation: f32,
    /// Rotation at the last sync point; [`Body::delta_r`] measures against it
    pub pre_rotation: f32,
    /// Direction of travel in radians, derived from velocity (not visual rotation)
    pub angle: f32,
    /// Magnitude of the velocity
    pub speed: f32,

    /// Directions in which this body checks collision
    pub check_collision: DirectionFlags,
    /// Faces in contact with another body this frame
    pub touching: DirectionFlags,
    /// Faces that were in contact last frame
    pub was_touching: DirectionFlags,
    /// Directions in which movement was prevented this frame
    pub blocked: DirectionFlags,
    /// Penetration depth along X from the last resolved collision
    pub overlap_x: f32,
    /// Penetration depth along Y from the last resolved collision
    pub overlap_y: f32,
    /// Penetration depth along Z from the last resolved collision
    pub overlap_z: f32,
    /// Both bodies overlapping with zero relative motion
    pub embedded: bool,

    /// Last-inferred dominant axis and direction of motion
    pub facing: Facing,

    phase: UpdatePhase,
    source_width_x: f32,
    source_width_y: f32,
    source_height: f32,
    sx: f32,
    sy: f32,
    dx: f32,
    dy: f32,
    dz: f32,
    reset_pending: bool,
    corners: [Point3; 8],
}

impl Body {
    /// Create a body bound to `entity`, capturing its transform and scale as baseline
    #[must_use]
    pub fn new(entity: &impl EntityView) -> Self {
        let sx = entity.scale_x().abs();
        let sy = entity.scale_y().abs();
        let (width_x, width_y, height) = derived_extents(entity.render_width(), entity.render_height());

        let mut body = Self {
            enable: true,
            moves: true,
            immovable: false,
            allow_rotation: true,
            allow_gravity: true,
            collide_world_bounds: false,
            custom_separate_x: false,
            custom_separate_y: false,
            custom_separate_z: false,
            skip_tree: false,

            position: Point3::origin(),
            prev: Point3::origin(),
            offset: Vec3::zeros(),
            width_x,
            width_y,
            height,
            half_width_x: (width_x / 2.0).floor(),
            half_width_y: (width_y / 2.0).floor(),
            half_height: (height / 2.0).floor(),
            center: Point3::origin(),

            velocity: Vec3::zeros(),
            new_velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            drag: Vec3::zeros(),
            gravity: Vec3::zeros(),
            bounce: Vec3::zeros(),
            max_velocity: Vec3::new(DEFAULT_MAX_VELOCITY, DEFAULT_MAX_VELOCITY, DEFAULT_MAX_VELOCITY),
            delta_max: Vec3::zeros(),
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            angular_drag: 0.0,
            max_angular: DEFAULT_MAX_ANGULAR,
            mass: 1.0,

            rotation: entity.angle(),
            pre_rotation: entity.angle(),
            angle: 0.0,
            speed: 0.0,

            check_collision: DirectionFlags::all(),
            touching: DirectionFlags::empty(),
            was_touching: DirectionFlags::empty(),
            blocked: DirectionFlags::empty(),
            overlap_x: 0.0,
            overlap_y: 0.0,
            overlap_z: 0.0,
            embedded: false,

            facing: Facing::None,

            phase: UpdatePhase::Idle,
            source_width_x: if sx > 0.0 { width_x / sx } else { width_x },
            source_width_y: if sx > 0.0 { width_y / sx } else { width_y },
            source_height: if sy > 0.0 { height / sy } else { height },
            sx,
            sy,
            dx: 0.0,
            dy: 0.0,
            dz: 0.0,
            reset_pending: true,
            corners: [Point3::origin(); 8],
        };

        body.position = body.anchored_position(entity, entity.iso_position());
        body.prev = body.position;
        body.update_center();
        body
    }

    /// Current frame-phase marker
    #[must_use]
    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    /// Recompute the bounding extents if the entity's scale changed
    ///
    /// No-op while the absolute scale matches the cached factors. On a
    /// change, the extents are rederived from the entity's current
    /// rendered size, the cache is updated, and the next position delta is
    /// suppressed so the resize cannot read as a one-frame teleport.
    pub fn update_bounds(&mut self, entity: &impl EntityView) {
        let sx = entity.scale_x().abs();
        let sy = entity.scale_y().abs();

        if sx != self.sx || sy != self.sy {
            let (width_x, width_y, height) =
                derived_extents(entity.render_width(), entity.render_height());
            self.width_x = width_x;
            self.width_y = width_y;
            self.height = height;
            self.update_half_extents();
            self.sx = sx;
            self.sy = sy;
            self.update_center();
            self.reset_pending = true;
        }
    }

    /// Set the body's unscaled extents, keeping the current offset
    ///
    /// The stored extents are the sources multiplied by the cached scale
    /// factors; both ground extents scale with the horizontal factor.
    pub fn set_size(&mut self, width_x: f32, width_y: f32, height: f32) {
        self.set_size_with_offset(width_x, width_y, height, self.offset);
    }

    /// Set the body's unscaled extents and its offset from the entity origin
    pub fn set_size_with_offset(&mut self, width_x: f32, width_y: f32, height: f32, offset: Vec3) {
        self.source_width_x = width_x;
        self.source_width_y = width_y;
        self.source_height = height;
        self.width_x = width_x * self.sx;
        self.width_y = width_y * self.sx;
        self.height = height * self.sy;
        self.update_half_extents();
        self.offset = offset;
        self.update_center();
    }

    /// Pre-update step: sync from the entity and integrate motion
    ///
    /// No-op when the body is disabled. `dt_ms` is the frame time in
    /// milliseconds. Contact and blocked state are reset (the previous
    /// contact set is kept in `was_touching`), the position is recomputed
    /// from the entity's transform, the integrator advances velocity, and
    /// the velocity is integrated into the position. Bodies with
    /// `collide_world_bounds` then rebound from the world bounds, and an
    /// entity flagged for out-of-bounds destruction is asked to destroy
    /// itself once its body no longer intersects them.
    pub fn pre_update(
        &mut self,
        entity: &mut impl EntityView,
        world: &impl MotionIntegrator,
        dt_ms: f32,
    ) {
        if !self.enable {
            return;
        }
        self.phase = UpdatePhase::Pre;

        self.was_touching = self.touching;
        self.touching = DirectionFlags::empty();
        self.blocked = DirectionFlags::empty();
        self.embedded = false;

        self.update_bounds(&*entity);
        self.position = self.anchored_position(&*entity, entity.iso_position());
        self.rotation = entity.angle();
        self.pre_rotation = self.rotation;

        if self.reset_pending || entity.fresh() {
            self.prev = self.position;
        }

        if self.moves {
            let dt = dt_ms / 1000.0;
            world.update_motion(self, dt);

            self.new_velocity = self.velocity * dt;
            self.position += self.new_velocity;
            if self.position != self.prev {
                self.speed = self.velocity.magnitude();
                self.angle = self.velocity.y.atan2(self.velocity.x);
            }

            if self.collide_world_bounds {
                self.check_world_bounds(world);
            }

            if entity.out_of_bounds_kill() && !world.bounds().intersects(&self.bounding_cube()) {
                debug!("body left the world bounds; requesting entity destruction");
                entity.request_destroy();
            }
        }

        self.dx = self.delta_x();
        self.dy = self.delta_y();
        self.dz = self.delta_z();
        self.update_center();
        self.reset_pending = false;
    }

    /// Post-update step: infer facing and write the frame's deltas back
    ///
    /// No-op when the body is disabled or the post-update already ran this
    /// frame; the phase guard makes a repeated call a pure no-op, not an
    /// error. Per-axis deltas are clamped to `delta_max` (where non-zero)
    /// before being applied to the entity's transform; this is the one
    /// place the body writes position back to the entity.
    pub fn post_update(&mut self, entity: &mut impl EntityView) {
        if !self.enable || self.phase == UpdatePhase::Post {
            return;
        }
        self.phase = UpdatePhase::Post;

        if self.reset_pending {
            self.prev = self.position;
        }

        self.infer_facing();

        if self.moves {
            self.dx = self.delta_x();
            self.dy = self.delta_y();
            self.dz = self.delta_z();

            if self.delta_max.x != 0.0 && self.dx.abs() > self.delta_max.x {
                self.dx = self.delta_max.x.copysign(self.dx);
            }
            if self.delta_max.y != 0.0 && self.dy.abs() > self.delta_max.y {
                self.dy = self.delta_max.y.copysign(self.dy);
            }
            if self.delta_max.z != 0.0 && self.dz.abs() > self.delta_max.z {
                self.dz = self.delta_max.z.copysign(self.dz);
            }

            entity.translate_iso(self.dx, self.dy, self.dz);
        }

        self.update_center();

        if self.allow_rotation {
            entity.rotate_by(self.delta_r());
        }

        self.prev = self.position;
        self.reset_pending = false;
    }

    /// Resolve collisions against the world bounds
    ///
    /// Each axis is checked independently; simultaneous violations resolve
    /// on every violated axis in the same call. A crossed edge clamps the
    /// position to the boundary, scales the axis velocity by the negated
    /// bounce coefficient, and marks the direction blocked. Only
    /// directions enabled in the world's collision set are considered.
    pub fn check_world_bounds(&mut self, world: &impl MotionIntegrator) {
        let bounds = world.bounds();
        let check = world.collision_axes();

        if self.position.x < bounds.x && check.contains(DirectionFlags::BACK_X) {
            self.position.x = bounds.x;
            self.velocity.x *= -self.bounce.x;
            self.blocked.insert(DirectionFlags::BACK_X);
        } else if self.front_x() > bounds.front_x() && check.contains(DirectionFlags::FRONT_X) {
            self.position.x = bounds.front_x() - self.width_x;
            self.velocity.x *= -self.bounce.x;
            self.blocked.insert(DirectionFlags::FRONT_X);
        }

        if self.position.y < bounds.y && check.contains(DirectionFlags::BACK_Y) {
            self.position.y = bounds.y;
            self.velocity.y *= -self.bounce.y;
            self.blocked.insert(DirectionFlags::BACK_Y);
        } else if self.front_y() > bounds.front_y() && check.contains(DirectionFlags::FRONT_Y) {
            self.position.y = bounds.front_y() - self.width_y;
            self.velocity.y *= -self.bounce.y;
            self.blocked.insert(DirectionFlags::FRONT_Y);
        }

        if self.position.z < bounds.z && check.contains(DirectionFlags::DOWN) {
            self.position.z = bounds.z;
            self.velocity.z *= -self.bounce.z;
            self.blocked.insert(DirectionFlags::DOWN);
        } else if self.top() > bounds.top() && check.contains(DirectionFlags::UP) {
            self.position.z = bounds.top() - self.height;
            self.velocity.z *= -self.bounce.z;
            self.blocked.insert(DirectionFlags::UP);
        }
    }

    /// Full state reset at the given iso coordinates
    ///
    /// Zeroes all linear and angular motion, recomputes the position with
    /// the same anchor correction the pre-update uses, commits it as the
    /// delta baseline, resyncs rotation and scale from the entity, and
    /// notifies the entity that its physics position changed externally.
    pub fn reset(&mut self, entity: &mut impl EntityView, x: f32, y: f32, z: f32) {
        debug!("body reset to ({x}, {y}, {z})");
        self.stop();

        self.position = self.anchored_position(&*entity, Point3::new(x, y, z));
        self.prev = self.position;
        self.rotation = entity.angle();
        self.pre_rotation = self.rotation;
        self.sx = entity.scale_x().abs();
        self.sy = entity.scale_y().abs();
        self.update_center();
        self.reset_pending = true;

        entity.notify_position_changed();
    }

    /// Zero all linear and angular motion
    pub fn stop(&mut self) {
        self.velocity = Vec3::zeros();
        self.acceleration = Vec3::zeros();
        self.speed = 0.0;
        self.angular_velocity = 0.0;
        self.angular_acceleration = 0.0;
    }

    /// Test whether the given world point lies within the body's closed box
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32, z: f32) -> bool {
        self.bounding_cube().contains(Point3::new(x, y, z))
    }

    /// True when downward movement was blocked this frame
    #[must_use]
    pub fn on_floor(&self) -> bool {
        self.blocked.contains(DirectionFlags::DOWN)
    }

    /// True when movement was blocked in any horizontal direction this frame
    #[must_use]
    pub fn on_wall(&self) -> bool {
        self.blocked.horizontal()
    }

    /// Front face coordinate along X
    #[must_use]
    pub fn front_x(&self) -> f32 {
        self.position.x + self.width_x
    }

    /// Front face coordinate along Y
    #[must_use]
    pub fn front_y(&self) -> f32 {
        self.position.y + self.width_y
    }

    /// Top face coordinate along Z
    #[must_use]
    pub fn top(&self) -> f32 {
        self.position.z + self.height
    }

    /// Signed X displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_x(&self) -> f32 {
        self.position.x - self.prev.x
    }

    /// Signed Y displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_y(&self) -> f32 {
        self.position.y - self.prev.y
    }

    /// Signed Z displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_z(&self) -> f32 {
        self.position.z - self.prev.z
    }

    /// Absolute X displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_abs_x(&self) -> f32 {
        self.delta_x().abs()
    }

    /// Absolute Y displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_abs_y(&self) -> f32 {
        self.delta_y().abs()
    }

    /// Absolute Z displacement since the start of the integration cycle
    #[must_use]
    pub fn delta_abs_z(&self) -> f32 {
        self.delta_z().abs()
    }

    /// Rotation change since the last sync point
    #[must_use]
    pub fn delta_r(&self) -> f32 {
        self.rotation - self.pre_rotation
    }

    /// The body's bounding cube at its current position
    #[must_use]
    pub fn bounding_cube(&self) -> BoundingCube {
        BoundingCube::from_corner(self.position, self.width_x, self.width_y, self.height)
    }

    /// Recompute and return the eight bounding-cube corners
    ///
    /// The array is a cache recomputed in place on each call, never
    /// reallocated, in the canonical order of
    /// [`BoundingCube::corner`]: corner 0 is the body position and corner
    /// 7 is the position plus all three extents.
    pub fn corners(&mut self) -> &[Point3; 8] {
        let cube = self.bounding_cube();
        for (index, corner) in self.corners.iter_mut().enumerate() {
            *corner = cube.corner(index);
        }
        &self.corners
    }

    /// Anchor-corrected body position for the given entity iso position
    ///
    /// Both isometric ground axes project onto the horizontal screen axis,
    /// so the horizontal anchor governs the X and Y shifts alike, mirrored
    /// in sign; the vertical anchor shifts the box down the Z axis.
    fn anchored_position(&self, entity: &impl EntityView, iso: Point3) -> Point3 {
        let anchor_x = entity.anchor_x();
        let anchor_y = entity.anchor_y();
        Point3::new(
            iso.x + self.width_x * (0.5 - anchor_x) + self.offset.x,
            iso.y + self.width_y * (anchor_x - 0.5) + self.offset.y,
            iso.z - self.height * (1.0 - anchor_y) + self.offset.z,
        )
    }

    /// Infer the facing direction from the current deltas
    ///
    /// The axis with the largest absolute delta wins, ties resolving X
    /// first, then Y, then Z; the delta's sign picks the direction. A zero
    /// delta on the dominant axis keeps the previous facing.
    fn infer_facing(&mut self) {
        let dx = self.delta_x();
        let dy = self.delta_y();
        let dz = self.delta_z();
        let (abs_x, abs_y, abs_z) = (dx.abs(), dy.abs(), dz.abs());

        if abs_x >= abs_y && abs_x >= abs_z {
            if dx > 0.0 {
                self.facing = Facing::ForwardX;
            } else if dx < 0.0 {
                self.facing = Facing::BackwardX;
            }
        } else if abs_y >= abs_z {
            if dy > 0.0 {
                self.facing = Facing::ForwardY;
            } else if dy < 0.0 {
                self.facing = Facing::BackwardY;
            }
        } else if dz > 0.0 {
            self.facing = Facing::Up;
        } else if dz < 0.0 {
            self.facing = Facing::Down;
        }
    }

    fn update_half_extents(&mut self) {
        self.half_width_x = (self.width_x / 2.0).floor();
        self.half_width_y = (self.width_y / 2.0).floor();
        self.half_height = (self.height / 2.0).floor();
    }

    fn update_center(&mut self) {
        self.center = Point3::new(
            self.position.x + self.half_width_x,
            self.position.y + self.half_width_y,
            self.position.z + self.half_height,
        );
    }
}
