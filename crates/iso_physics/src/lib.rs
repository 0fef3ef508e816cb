//! # Iso Physics
//!
//! Per-entity physics bodies for isometric (pseudo-3D) worlds.
//!
//! ## Features
//!
//! - **Two-Phase Frame Update**: pre-update integrates motion, post-update
//!   writes deltas back to the host entity, with an external collision pass
//!   free to mutate bodies in between
//! - **World-Bounds Response**: per-axis clamp and bounce against an
//!   axis-aligned world box
//! - **Stable Bounding Geometry**: corner enumeration and hit testing for
//!   broad- and narrow-phase collision routines
//! - **Pluggable Collaborators**: host entities and motion integrators are
//!   trait capabilities, not concrete types
//!
//! ## Quick Start
//!
//! ```rust
//! use iso_physics::prelude::*;
//!
//! let mut entity = EntityState::new(100.0, 100.0, 50.0, 32.0, 64.0);
//! let world = IsoWorld::new(
//!     Vec3::new(0.0, 0.0, -50.0),
//!     BoundingCube::new(0.0, 0.0, 0.0, 512.0, 512.0, 256.0),
//! );
//!
//! let mut body = Body::new(&entity);
//! body.collide_world_bounds = true;
//!
//! // One frame at roughly 60 fps. An external collision pass would run
//! // between the two update calls.
//! body.pre_update(&mut entity, &world, 16.0);
//! body.post_update(&mut entity);
//!
//! // Gravity pulled the entity down.
//! assert!(entity.iso_z < 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

pub use config::{Config, ConfigError, PhysicsConfig};
pub use physics::{Body, BoundingCube, DirectionFlags, EntityState, EntityView, Facing, IsoWorld,
    MotionIntegrator, UpdatePhase};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, PhysicsConfig},
        foundation::math::{Point3, Vec2, Vec3},
        physics::{
            Body, BodyOutline, BoundingCube, DimetricProjector, DirectionFlags, EntityState,
            EntityView, Facing, IsoProjector, IsoWorld, MotionIntegrator, UpdatePhase,
        },
    };
}
