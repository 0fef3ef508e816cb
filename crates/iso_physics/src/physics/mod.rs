//! Physics module for isometric body simulation
//!
//! Provides the per-entity [`Body`] with its two-phase frame update,
//! the [`BoundingCube`] geometry it exposes to collision routines, and
//! the world-side [`MotionIntegrator`] that shapes velocity.

pub mod body;
pub mod bounds;
pub mod debug;
pub mod direction;
pub mod entity;
pub mod world;

pub use body::Body;
pub use bounds::BoundingCube;
pub use debug::{BodyOutline, DimetricProjector, IsoProjector};
pub use direction::{DirectionFlags, Facing, UpdatePhase};
pub use entity::{EntityState, EntityView};
pub use world::{IsoWorld, MotionIntegrator};
