//! Math utilities and types
//!
//! Provides the fundamental math types used by the physics simulation.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type, used for projected screen-space coordinates
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;
