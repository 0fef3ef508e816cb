//! World-side motion integration and world bounds
//!
//! The body integrates position; everything that shapes velocity
//! (gravity, acceleration, drag, clamping) lives behind the
//! [`MotionIntegrator`] capability. [`IsoWorld`] is the standard
//! implementation.

use crate::foundation::math::Vec3;
use crate::physics::body::Body;
use crate::physics::bounds::BoundingCube;
use crate::physics::direction::DirectionFlags;

/// Capability that advances a body's velocity state each frame
///
/// Implementations mutate the body's velocity and rotation for a time
/// step and expose the world bounds bodies rebound from. They must be
/// callable synchronously and must not retain the body beyond the call.
pub trait MotionIntegrator {
    /// Advance `body`'s linear and angular velocity by `dt` seconds
    fn update_motion(&self, body: &mut Body, dt: f32);

    /// World bounds that bodies with world collision enabled rebound from
    fn bounds(&self) -> BoundingCube;

    /// Directions in which world-bounds collision is enabled globally
    fn collision_axes(&self) -> DirectionFlags;
}

/// Standard integrator: gravity, acceleration, drag and velocity clamping
///
/// Per axis and per frame: gravity (world plus per-body override, gated by
/// the body's `allow_gravity`), then acceleration, otherwise drag decaying
/// the velocity towards zero, then a symmetric clamp to the body's maximum
/// velocity. Angular velocity is integrated the same way and accumulated
/// into the body's rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoWorld {
    /// World gravity, applied to every body that allows it
    pub gravity: Vec3,
    /// World bounds for [`Body::check_world_bounds`](crate::physics::Body::check_world_bounds)
    pub bounds: BoundingCube,
    /// Global per-direction world-bounds collision enables
    pub check_collision: DirectionFlags,
}

impl IsoWorld {
    /// Create a world with the given gravity and bounds, colliding in all directions
    #[must_use]
    pub fn new(gravity: Vec3, bounds: BoundingCube) -> Self {
        Self {
            gravity,
            bounds,
            check_collision: DirectionFlags::all(),
        }
    }

    /// Advance one velocity component by `dt` seconds
    ///
    /// Drag only applies while there is no acceleration on the axis, and
    /// never flips the velocity's sign. A `max` of zero disables clamping.
    fn compute_velocity(
        velocity: f32,
        acceleration: f32,
        drag: f32,
        max: f32,
        gravity: f32,
        dt: f32,
    ) -> f32 {
        let mut velocity = velocity + gravity * dt;

        if acceleration != 0.0 {
            velocity += acceleration * dt;
        } else if drag != 0.0 {
            let drag = drag * dt;
            if velocity - drag > 0.0 {
                velocity -= drag;
            } else if velocity + drag < 0.0 {
                velocity += drag;
            } else {
                velocity = 0.0;
            }
        }

        if max > 0.0 {
            velocity = velocity.clamp(-max, max);
        }
        velocity
    }
}

impl Default for IsoWorld {
    fn default() -> Self {
        Self::new(Vec3::zeros(), BoundingCube::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0))
    }
}

impl MotionIntegrator for IsoWorld {
    fn update_motion(&self, body: &mut Body, dt: f32) {
        // Angular motion first, so rotation deltas are visible to the same
        // frame's post-update.
        body.angular_velocity = Self::compute_velocity(
            body.angular_velocity,
            body.angular_acceleration,
            body.angular_drag,
            body.max_angular,
            0.0,
            dt,
        );
        body.rotation += body.angular_velocity * dt;

        let gravity = if body.allow_gravity {
            self.gravity + body.gravity
        } else {
            Vec3::zeros()
        };

        for axis in 0..3 {
            body.velocity[axis] = Self::compute_velocity(
                body.velocity[axis],
                body.acceleration[axis],
                body.drag[axis],
                body.max_velocity[axis],
                gravity[axis],
                dt,
            );
        }
    }

    fn bounds(&self) -> BoundingCube {
        self.bounds
    }

    fn collision_axes(&self) -> DirectionFlags {
        self.check_collision
    }
}
